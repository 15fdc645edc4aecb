//! Procflow Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Procflow
//! diagram generator and its front ends. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: The process definition consumed by the generator ([`model`] module)
//! - **Graph**: The positioned node/edge graph it produces ([`graph`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod model;

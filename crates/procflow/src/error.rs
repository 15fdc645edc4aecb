//! Error types for Procflow operations.
//!
//! This module provides the main error type [`ProcflowError`]. Data-shape
//! problems in a process (unresolved interfaces, missing actors) are never
//! errors; they are skipped during generation. The variants here cover
//! configuration mistakes and the I/O around the engine.

use std::io;

use thiserror::Error;

/// The main error type for Procflow operations.
#[derive(Debug, Error)]
pub enum ProcflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input document: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Diagram store error: {0}")]
    Store(String),
}

impl ProcflowError {
    /// Create a new `Input` error with the associated document text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}

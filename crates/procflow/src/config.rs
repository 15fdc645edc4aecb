//! Configuration types for Procflow diagram generation.
//!
//! This module provides configuration structures that control how process
//! diagrams are laid out. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources, and every field falls back to
//! its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Spacing, offsets and margins used by the layout engine.
//!
//! # Example
//!
//! ```
//! # use procflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().x_spacing(), 300.0);
//! assert!(config.layout().validate().is_ok());
//! ```

use serde::Deserialize;

use crate::ProcflowError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Layout constants for the sequence diagram.
///
/// Horizontal values place actor lifelines, vertical values place timeline
/// slots. Units are diagram pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between adjacent actor lifelines.
    x_spacing: f32,
    /// X coordinate of the first actor lifeline.
    x_offset: f32,
    /// Y coordinate of the actor header (top lifeline node).
    y_top: f32,
    /// Y coordinate of the first timeline slot.
    y_initial_offset: f32,
    /// Vertical distance between timeline slots.
    y_spacing: f32,
    /// Lower bound for the canvas height.
    min_canvas_height: f32,
    /// Space kept below the last timeline slot.
    trailing_margin: f32,
    /// Height of the actor header box.
    header_height: f32,
    /// Extra lane width beyond the lifelines.
    lane_margin: f32,
    /// Distance of the lanes from the first and last slot.
    lane_offset: f32,
    /// X coordinate of both lanes.
    lane_x: f32,
    /// Height of a lane marker.
    lane_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_spacing: 300.0,
            x_offset: 100.0,
            y_top: 50.0,
            y_initial_offset: 250.0,
            y_spacing: 120.0,
            min_canvas_height: 600.0,
            trailing_margin: 200.0,
            header_height: 80.0,
            lane_margin: 300.0,
            lane_offset: 80.0,
            lane_x: 0.0,
            lane_height: 60.0,
        }
    }
}

impl LayoutConfig {
    pub fn x_spacing(&self) -> f32 {
        self.x_spacing
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn y_top(&self) -> f32 {
        self.y_top
    }

    pub fn y_initial_offset(&self) -> f32 {
        self.y_initial_offset
    }

    pub fn y_spacing(&self) -> f32 {
        self.y_spacing
    }

    pub fn min_canvas_height(&self) -> f32 {
        self.min_canvas_height
    }

    pub fn trailing_margin(&self) -> f32 {
        self.trailing_margin
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn lane_margin(&self) -> f32 {
        self.lane_margin
    }

    pub fn lane_offset(&self) -> f32 {
        self.lane_offset
    }

    pub fn lane_x(&self) -> f32 {
        self.lane_x
    }

    pub fn lane_height(&self) -> f32 {
        self.lane_height
    }

    /// Set the horizontal spacing between lifelines
    pub fn with_x_spacing(mut self, spacing: f32) -> Self {
        self.x_spacing = spacing;
        self
    }

    /// Set the x coordinate of the first lifeline
    pub fn with_x_offset(mut self, offset: f32) -> Self {
        self.x_offset = offset;
        self
    }

    /// Set the y coordinate of the first timeline slot
    pub fn with_y_initial_offset(mut self, offset: f32) -> Self {
        self.y_initial_offset = offset;
        self
    }

    /// Set the vertical spacing between timeline slots
    pub fn with_y_spacing(mut self, spacing: f32) -> Self {
        self.y_spacing = spacing;
        self
    }

    /// Set the minimum canvas height
    pub fn with_min_canvas_height(mut self, height: f32) -> Self {
        self.min_canvas_height = height;
        self
    }

    /// Checks that the constants describe a usable layout.
    ///
    /// Spacings must be strictly positive so that coordinates are strictly
    /// increasing; sizes and margins must be non-negative; offsets may be any
    /// finite value.
    ///
    /// # Errors
    ///
    /// Returns [`ProcflowError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ProcflowError> {
        let fields = [
            ("x_spacing", self.x_spacing, Bound::Positive),
            ("y_spacing", self.y_spacing, Bound::Positive),
            ("min_canvas_height", self.min_canvas_height, Bound::NonNegative),
            ("trailing_margin", self.trailing_margin, Bound::NonNegative),
            ("header_height", self.header_height, Bound::NonNegative),
            ("lane_margin", self.lane_margin, Bound::NonNegative),
            ("lane_offset", self.lane_offset, Bound::NonNegative),
            ("lane_height", self.lane_height, Bound::NonNegative),
            ("x_offset", self.x_offset, Bound::Finite),
            ("y_top", self.y_top, Bound::Finite),
            ("y_initial_offset", self.y_initial_offset, Bound::Finite),
            ("lane_x", self.lane_x, Bound::Finite),
        ];

        for (name, value, bound) in fields {
            if !value.is_finite() {
                return Err(ProcflowError::Config(format!(
                    "layout.{name} must be a finite number, got {value}"
                )));
            }
            match bound {
                Bound::Positive if value <= 0.0 => {
                    return Err(ProcflowError::Config(format!(
                        "layout.{name} must be greater than zero, got {value}"
                    )));
                }
                Bound::NonNegative if value < 0.0 => {
                    return Err(ProcflowError::Config(format!(
                        "layout.{name} must not be negative, got {value}"
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Positive,
    NonNegative,
    Finite,
}

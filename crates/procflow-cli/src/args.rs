//! Command-line argument definitions for the Procflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the diagram store, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Procflow diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input process document (JSON)
    #[arg(help = "Path to the input process document")]
    pub input: String,

    /// Path to the output diagram file (JSON)
    #[arg(short, long, default_value = "diagram.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding persisted diagrams
    #[arg(short, long)]
    pub store: Option<String>,

    /// Discard the persisted diagram and regenerate it
    #[arg(long, requires = "store")]
    pub refresh: bool,

    /// Write the resulting diagram back to the store
    #[arg(long, requires = "store")]
    pub save: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

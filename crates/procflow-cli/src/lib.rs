//! CLI logic for the Procflow diagram tool.
//!
//! This module contains the core CLI logic: read a process document, open or
//! regenerate its diagram, and write the graph as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use procflow::{
    DiagramGenerator, ProcflowError,
    catalog::ProcessDocument,
    persist::{self, DiagramOrigin, DiagramStore as _, FileStore, StoredDiagram},
};

/// Run the Procflow CLI application
///
/// Without a store the diagram is always generated. With a store the
/// persisted diagram is preferred unless `--refresh` is given.
///
/// # Errors
///
/// Returns `ProcflowError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Malformed input documents
/// - Store failures
pub fn run(args: &Args) -> Result<(), ProcflowError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing process document"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let generator = DiagramGenerator::new(app_config)?;

    let source = fs::read_to_string(&args.input)?;
    let (process, catalog) = ProcessDocument::from_json(&source)?.into_parts();

    let graph = match &args.store {
        None => generator.generate(&process, &catalog),
        Some(root) => {
            let store = FileStore::new(root);
            if args.refresh {
                persist::refresh_diagram(&store, &generator, &process, &catalog)?
            } else {
                let opened = persist::open_diagram(&store, &generator, &process, &catalog)?;
                if args.save && opened.origin() == DiagramOrigin::Generated {
                    store.save(StoredDiagram::from_graph(process.id(), opened.graph())?)?;
                    info!(process_id:% = process.id(); "Generated diagram stored");
                }
                opened.into_graph()
            }
        }
    };

    let json = serde_json::to_string_pretty(&graph)
        .map_err(|err| ProcflowError::Store(format!("cannot serialize diagram: {err}")))?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}

//! Persisted diagrams and the open/refresh policy.
//!
//! A diagram exists in two states. The *generated* graph is computed from the
//! current process data. The *persisted* graph was saved earlier and may have
//! been rearranged by hand. Opening a process prefers the persisted graph and
//! only generates when none exists or it cannot be parsed. Refreshing always
//! discards the persisted positions and stores a fresh generation.
//!
//! Stores hold an opaque JSON blob per process id; the generator never sees
//! them.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use dashmap::DashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use procflow_core::{graph::DiagramGraph, identifier::Id, model::ProcessDefinition};

use crate::{DiagramGenerator, ProcflowError, catalog::Catalog};

/// A diagram as kept by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDiagram {
    process_id: Id,
    /// Serialized [`DiagramGraph`]; opaque to the store.
    diagram_data: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    created_by: Option<String>,
    #[serde(default)]
    last_modified_by: Option<String>,
}

impl StoredDiagram {
    /// Creates a record holding an arbitrary blob.
    pub fn new(process_id: Id, diagram_data: impl Into<String>) -> Self {
        Self {
            process_id,
            diagram_data: diagram_data.into(),
            notes: None,
            created_by: None,
            last_modified_by: None,
        }
    }

    /// Serializes `graph` into a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ProcflowError::Store`] if the graph cannot be serialized.
    pub fn from_graph(process_id: Id, graph: &DiagramGraph) -> Result<Self, ProcflowError> {
        let data = serde_json::to_string(graph)
            .map_err(|err| ProcflowError::Store(format!("cannot serialize diagram: {err}")))?;
        Ok(Self::new(process_id, data))
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Records `author` as the last modifier, and as creator if none is set.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        if self.created_by.is_none() {
            self.created_by = Some(author.clone());
        }
        self.last_modified_by = Some(author);
        self
    }

    pub fn process_id(&self) -> Id {
        self.process_id
    }

    pub fn diagram_data(&self) -> &str {
        &self.diagram_data
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub fn last_modified_by(&self) -> Option<&str> {
        self.last_modified_by.as_deref()
    }

    /// Parses the stored blob, returning `None` when it is not a valid graph.
    pub fn graph(&self) -> Option<DiagramGraph> {
        match serde_json::from_str(&self.diagram_data) {
            Ok(graph) => Some(graph),
            Err(err) => {
                warn!(process_id:% = self.process_id, err:%; "Stored diagram is unparsable");
                None
            }
        }
    }

    /// Replaces the blob with `graph`, keeping notes and authorship.
    fn replace_graph(mut self, graph: &DiagramGraph) -> Result<Self, ProcflowError> {
        self.diagram_data = StoredDiagram::from_graph(self.process_id, graph)?.diagram_data;
        Ok(self)
    }
}

/// Storage for diagrams keyed by process id.
pub trait DiagramStore: Send + Sync {
    /// Loads the diagram of a process, or `None` if there is none.
    fn load(&self, process_id: Id) -> Result<Option<StoredDiagram>, ProcflowError>;

    /// Inserts or replaces the diagram of `diagram.process_id()`.
    fn save(&self, diagram: StoredDiagram) -> Result<(), ProcflowError>;

    /// Removes the diagram of a process. Returns whether one existed.
    fn delete(&self, process_id: Id) -> Result<bool, ProcflowError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    diagrams: DashMap<Id, StoredDiagram>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }
}

impl DiagramStore for MemoryStore {
    fn load(&self, process_id: Id) -> Result<Option<StoredDiagram>, ProcflowError> {
        Ok(self
            .diagrams
            .get(&process_id)
            .map(|entry| entry.value().clone()))
    }

    fn save(&self, diagram: StoredDiagram) -> Result<(), ProcflowError> {
        self.diagrams.insert(diagram.process_id(), diagram);
        Ok(())
    }

    fn delete(&self, process_id: Id) -> Result<bool, ProcflowError> {
        Ok(self.diagrams.remove(&process_id).is_some())
    }
}

/// Directory-backed store with one file per diagram.
///
/// Writes go through a temporary file in the same directory and are renamed
/// into place, so readers never observe a partially written diagram.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of a process's diagram.
    ///
    /// Ids made of `[A-Za-z0-9_-]` map to `<id>.json`. Any other id is hex
    /// encoded as `<hex>.hex.json`; plain names never contain a second `.`,
    /// so distinct ids never share a file.
    pub fn path_for(&self, process_id: Id) -> PathBuf {
        let id = process_id.to_string();
        let plain = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));

        let name = if plain {
            format!("{id}.json")
        } else {
            format!("{}.hex.json", hex::encode(id.as_bytes()))
        };
        self.root.join(name)
    }
}

impl DiagramStore for FileStore {
    fn load(&self, process_id: Id) -> Result<Option<StoredDiagram>, ProcflowError> {
        let path = self.path_for(process_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = path.display().to_string(); "No stored diagram");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<StoredDiagram>(&content) {
            Ok(diagram) if diagram.process_id() == process_id => Ok(Some(diagram)),
            Ok(diagram) => {
                warn!(
                    path = path.display().to_string(),
                    expected:% = process_id,
                    found:% = diagram.process_id();
                    "Diagram file belongs to another process, ignoring"
                );
                Ok(None)
            }
            Err(err) => {
                warn!(path = path.display().to_string(), err:%; "Ignoring unreadable diagram file");
                Ok(None)
            }
        }
    }

    fn save(&self, diagram: StoredDiagram) -> Result<(), ProcflowError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(diagram.process_id());

        let content = serde_json::to_string_pretty(&diagram)
            .map_err(|err| ProcflowError::Store(format!("cannot serialize record: {err}")))?;

        let mut temp_file = NamedTempFile::new_in(&self.root)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&path).map_err(|err| err.error)?;

        debug!(path = path.display().to_string(); "Diagram stored");
        Ok(())
    }

    fn delete(&self, process_id: Id) -> Result<bool, ProcflowError> {
        match fs::remove_file(self.path_for(process_id)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Where an opened diagram came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramOrigin {
    /// Loaded from the store.
    Persisted,
    /// Freshly generated from the process definition.
    Generated,
}

/// Result of [`open_diagram`].
#[derive(Debug, Clone)]
pub struct OpenedDiagram {
    graph: DiagramGraph,
    origin: DiagramOrigin,
}

impl OpenedDiagram {
    pub fn graph(&self) -> &DiagramGraph {
        &self.graph
    }

    pub fn origin(&self) -> DiagramOrigin {
        self.origin
    }

    pub fn into_graph(self) -> DiagramGraph {
        self.graph
    }
}

/// Opens the diagram of `process`.
///
/// Returns the persisted graph when the store has a parsable one. Otherwise
/// generates a fresh graph; nothing is written to the store.
///
/// # Errors
///
/// Only store I/O failures are reported. A missing or malformed blob falls
/// back to generation.
pub fn open_diagram(
    store: &dyn DiagramStore,
    generator: &DiagramGenerator,
    process: &ProcessDefinition,
    catalog: &Catalog,
) -> Result<OpenedDiagram, ProcflowError> {
    if let Some(graph) = store.load(process.id())?.and_then(|stored| stored.graph()) {
        info!(process_id:% = process.id(); "Opened persisted diagram");
        return Ok(OpenedDiagram {
            graph,
            origin: DiagramOrigin::Persisted,
        });
    }

    info!(process_id:% = process.id(); "No usable persisted diagram, generating");
    Ok(OpenedDiagram {
        graph: generator.generate(process, catalog),
        origin: DiagramOrigin::Generated,
    })
}

/// Regenerates the diagram of `process` and replaces the persisted one.
///
/// Any hand-edited positions are discarded. Notes and authorship of an
/// existing record are kept.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn refresh_diagram(
    store: &dyn DiagramStore,
    generator: &DiagramGenerator,
    process: &ProcessDefinition,
    catalog: &Catalog,
) -> Result<DiagramGraph, ProcflowError> {
    let graph = generator.generate(process, catalog);

    let record = match store.load(process.id())? {
        Some(existing) => existing.replace_graph(&graph)?,
        None => StoredDiagram::from_graph(process.id(), &graph)?,
    };
    store.save(record)?;

    info!(process_id:% = process.id(); "Diagram regenerated and stored");
    Ok(graph)
}

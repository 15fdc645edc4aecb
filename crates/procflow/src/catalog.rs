//! Resolved interface and activity records.
//!
//! Looking records up in the inventory is the caller's job; the [`Catalog`]
//! only holds what was resolved. Lookups for ids that were not resolved
//! return `None` and the generator skips the usage.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use procflow_core::{
    identifier::Id,
    model::{ActivityRecord, InterfaceRecord, ProcessDefinition},
};

use crate::ProcflowError;

/// Interface and activity records keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    interfaces: IndexMap<Id, InterfaceRecord>,
    activities: IndexMap<Id, ActivityRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from record lists. Later records replace earlier
    /// ones with the same id.
    pub fn from_records(
        interfaces: impl IntoIterator<Item = InterfaceRecord>,
        activities: impl IntoIterator<Item = ActivityRecord>,
    ) -> Self {
        let mut catalog = Self::new();
        for record in interfaces {
            catalog.insert_interface(record);
        }
        for record in activities {
            catalog.insert_activity(record);
        }
        catalog
    }

    pub fn insert_interface(&mut self, record: InterfaceRecord) {
        if let Some(previous) = self.interfaces.insert(record.id(), record) {
            debug!(interface_id:% = previous.id(); "Replacing duplicate interface record");
        }
    }

    pub fn insert_activity(&mut self, record: ActivityRecord) {
        if let Some(previous) = self.activities.insert(record.id(), record) {
            debug!(activity_id:% = previous.id(); "Replacing duplicate activity record");
        }
    }

    pub fn interface(&self, id: Id) -> Option<&InterfaceRecord> {
        self.interfaces.get(&id)
    }

    pub fn activity(&self, id: Id) -> Option<&ActivityRecord> {
        self.activities.get(&id)
    }
}

/// A process together with the records it references, as exchanged in JSON.
///
/// ```json
/// {
///   "process": { "id": 1, "name": "Payments", "interfaceUsages": [], "activityUsages": [] },
///   "interfaces": [],
///   "activities": []
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessDocument {
    process: ProcessDefinition,
    #[serde(default)]
    interfaces: Vec<InterfaceRecord>,
    #[serde(default)]
    activities: Vec<ActivityRecord>,
}

impl ProcessDocument {
    /// Parses a process document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ProcflowError::Input`] when the text is not a valid document.
    pub fn from_json(source: &str) -> Result<Self, ProcflowError> {
        serde_json::from_str(source).map_err(|err| ProcflowError::new_input_error(err, source))
    }

    pub fn process(&self) -> &ProcessDefinition {
        &self.process
    }

    /// Splits the document into the process and its catalog.
    pub fn into_parts(self) -> (ProcessDefinition, Catalog) {
        let catalog = Catalog::from_records(self.interfaces, self.activities);
        (self.process, catalog)
    }
}

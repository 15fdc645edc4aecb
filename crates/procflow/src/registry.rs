//! Actor registry: the ordered set of lifelines in a diagram.
//!
//! Actors are registered in order of first encounter and never re-sorted.
//! The registry ordinal decides the horizontal slot of each lifeline.

use indexmap::IndexMap;
use log::debug;

use procflow_core::{
    identifier::Id,
    model::{Actor, ProcessDefinition},
};

use crate::catalog::Catalog;

/// Insertion-ordered actors with id → ordinal lookup.
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry {
    actors: IndexMap<Id, Actor>,
}

impl ActorRegistry {
    /// Discovers every actor participating in `process`.
    ///
    /// Scan order is the process owner, then each interface usage in input
    /// order (provider before consumer). Activities run on the owner, which
    /// is already registered. Usages whose interface is not in the catalog
    /// contribute nothing.
    pub fn build(process: &ProcessDefinition, catalog: &Catalog) -> Self {
        let mut registry = Self::default();

        if let Some(owner) = process.owner() {
            registry.insert(owner);
        }

        for usage in process.interface_usages() {
            let Some(record) = catalog.interface(usage.interface_id()) else {
                debug!(
                    interface_id:% = usage.interface_id();
                    "Interface not in catalog, skipping for actor discovery"
                );
                continue;
            };
            for actor in [record.provider(), record.consumer()].into_iter().flatten() {
                registry.insert(actor);
            }
        }

        registry
    }

    /// Registers `actor`. A known id keeps its ordinal but takes the latest
    /// display name.
    fn insert(&mut self, actor: &Actor) {
        self.actors.insert(actor.id(), actor.clone());
    }

    /// Returns the 0-based ordinal of an actor, if registered.
    pub fn ordinal(&self, id: Id) -> Option<usize> {
        self.actors.get_index_of(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.actors.contains_key(&id)
    }

    /// Actors in ordinal order.
    pub fn actors(&self) -> impl ExactSizeIterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use procflow_core::model::{InterfaceKind, InterfaceRecord, InterfaceUsage};

    use super::*;

    fn ids(registry: &ActorRegistry) -> Vec<String> {
        registry.actors().map(|a| a.id().to_string()).collect()
    }

    #[test]
    fn test_owner_comes_first() {
        let catalog = Catalog::from_records(
            [InterfaceRecord::new("IF1", InterfaceKind::Rest, "IF1")
                .with_provider(Actor::new("B", "Billing"))
                .with_consumer(Actor::new("A", "Accounts"))],
            [],
        );
        let process = ProcessDefinition::new("P", "Process")
            .with_owner(Actor::new("A", "Accounts"))
            .with_interface_usage(InterfaceUsage::new("IF1", 1));

        let registry = ActorRegistry::build(&process, &catalog);
        assert_eq!(ids(&registry), ["A", "B"]);
        assert_eq!(registry.ordinal(Id::new("A")), Some(0));
        assert_eq!(registry.ordinal(Id::new("B")), Some(1));
    }

    #[test]
    fn test_provider_precedes_consumer_and_duplicates_keep_their_slot() {
        let catalog = Catalog::from_records(
            [
                InterfaceRecord::new("IF1", InterfaceKind::File, "IF1")
                    .with_provider(Actor::new("X", "X"))
                    .with_consumer(Actor::new("Y", "Y")),
                InterfaceRecord::new("IF2", InterfaceKind::Soap, "IF2")
                    .with_provider(Actor::new("Z", "Z"))
                    .with_consumer(Actor::new("X", "X renamed")),
            ],
            [],
        );
        let process = ProcessDefinition::new("P", "Process")
            .with_interface_usage(InterfaceUsage::new("IF1", 5))
            .with_interface_usage(InterfaceUsage::new("IF2", 1));

        let registry = ActorRegistry::build(&process, &catalog);
        // Usage input order decides, not sequence numbers
        assert_eq!(ids(&registry), ["X", "Y", "Z"]);
        // Last name seen wins
        assert_eq!(registry.actors().next().unwrap().display_name(), "X renamed");
    }

    #[test]
    fn test_unresolved_interfaces_and_missing_actors_are_skipped() {
        let catalog = Catalog::from_records(
            [InterfaceRecord::new("IF1", InterfaceKind::Rest, "IF1")
                .with_consumer(Actor::new("C", "Consumer"))],
            [],
        );
        let process = ProcessDefinition::new("P", "Process")
            .with_interface_usage(InterfaceUsage::new("MISSING", 1))
            .with_interface_usage(InterfaceUsage::new("IF1", 2));

        let registry = ActorRegistry::build(&process, &catalog);
        assert_eq!(ids(&registry), ["C"]);
        assert!(!registry.contains(Id::new("MISSING")));
    }

    #[test]
    fn test_empty_process_has_no_actors() {
        let process = ProcessDefinition::new("P", "Process");
        let registry = ActorRegistry::build(&process, &Catalog::new());
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}

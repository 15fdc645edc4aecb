//! Procflow - sequence diagrams for technical processes.
//!
//! Given a technical process (ordered interface usages and internal
//! activities) and the catalogue records it references, Procflow synthesizes
//! a positioned node/edge graph: one lifeline per participating application,
//! a directed call edge per interface usage, a self-loop per activity, and
//! two lane markers framing the process.
//!
//! Generation is a pure function of its inputs. Choosing between a generated
//! and a previously persisted diagram is handled by the [`persist`] module.

pub mod catalog;
pub mod config;
pub mod direction;
pub mod lane;
pub mod layout;
pub mod persist;
pub mod registry;
pub mod sequence;

mod error;

pub use procflow_core::{geometry, graph, identifier, model};

pub use error::ProcflowError;

use log::{debug, info};

use procflow_core::{graph::DiagramGraph, model::ProcessDefinition};

use catalog::Catalog;
use config::{AppConfig, LayoutConfig};
use layout::Coordinates;
use registry::ActorRegistry;

/// Generator for technical-process sequence diagrams.
///
/// The generator holds validated layout constants and nothing else, so one
/// instance can serve any number of processes from any number of threads.
///
/// # Examples
///
/// ```
/// use procflow::{
///     DiagramGenerator,
///     catalog::Catalog,
///     model::{Actor, ActivityRecord, ActivityUsage, ProcessDefinition},
/// };
///
/// let process = ProcessDefinition::new("P", "Nightly close")
///     .with_owner(Actor::new("A", "Ledger"))
///     .with_activity_usage(ActivityUsage::new("ACT1", 1));
/// let catalog = Catalog::from_records([], [ActivityRecord::new("ACT1", "Validate", "validate")]);
///
/// let graph = DiagramGenerator::default().generate(&process, &catalog);
/// assert_eq!(graph.edges()[0].label(), "1. Validate");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramGenerator {
    layout: LayoutConfig,
}

impl DiagramGenerator {
    /// Create a new diagram generator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProcflowError::Config`] if the layout constants are invalid.
    pub fn new(config: AppConfig) -> Result<Self, ProcflowError> {
        config.layout().validate()?;
        Ok(Self {
            layout: config.layout().clone(),
        })
    }

    /// Returns the layout constants in use.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Generate the diagram of `process`.
    ///
    /// Actors are discovered and the timeline is merged independently; the
    /// layout then places lifelines and one edge per resolvable timeline
    /// item, and two lanes frame the result. Usages that cannot be resolved
    /// are omitted without failing the generation.
    ///
    /// Node order is: top and bottom node of each actor in first-seen order,
    /// then the start lane, then the end lane. Edges follow timeline order.
    pub fn generate(&self, process: &ProcessDefinition, catalog: &Catalog) -> DiagramGraph {
        info!(process_id:% = process.id(); "Generating process diagram");

        let registry = ActorRegistry::build(process, catalog);
        let timeline = sequence::merge(process, catalog);
        debug!(
            actors = registry.len(),
            timeline_items = timeline.len();
            "Actors and timeline resolved"
        );

        let coords = Coordinates::new(&self.layout, timeline.len());

        let mut nodes = coords.lifeline_nodes(&registry);
        let [start_lane, end_lane] = lane::frame(process, registry.len(), &coords);

        let edges: Vec<_> = timeline
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                direction::resolve_edge(item, position, coords.slot_y(position), process, &registry)
            })
            .collect();

        nodes.push(start_lane);
        nodes.push(end_lane);

        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            skipped = timeline.len() - edges.len();
            "Diagram generated"
        );

        DiagramGraph::new(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use procflow_core::{
        graph::NodeKind,
        model::{Actor, ActivityRecord, ActivityUsage, InterfaceKind, InterfaceRecord, InterfaceUsage},
    };

    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        let layout = LayoutConfig::default().with_x_spacing(-10.0);
        let result = DiagramGenerator::new(AppConfig::new(layout));
        assert!(matches!(result, Err(ProcflowError::Config(_))));
    }

    #[test]
    fn test_custom_spacing_is_used() {
        let layout = LayoutConfig::default().with_x_spacing(200.0).with_x_offset(0.0);
        let generator = DiagramGenerator::new(AppConfig::new(layout)).unwrap();

        let catalog = Catalog::from_records(
            [InterfaceRecord::new("IF1", InterfaceKind::Rest, "IF1")
                .with_provider(Actor::new("B", "B"))
                .with_consumer(Actor::new("A", "A"))],
            [],
        );
        let process = ProcessDefinition::new("P", "P")
            .with_owner(Actor::new("A", "A"))
            .with_interface_usage(InterfaceUsage::new("IF1", 1));

        let graph = generator.generate(&process, &catalog);
        let xs: Vec<_> = graph
            .nodes_of_kind(NodeKind::ActorTop)
            .map(|node| node.position().x())
            .collect();
        assert_eq!(xs, [0.0, 200.0]);
    }

    #[test]
    fn test_empty_process_yields_lanes_only() {
        let process = ProcessDefinition::new("P", "Empty");
        let graph = DiagramGenerator::default().generate(&process, &Catalog::new());

        assert_eq!(graph.nodes().len(), 2);
        assert!(graph.edges().is_empty());
        assert!(graph.nodes().iter().all(|node| node.kind() == NodeKind::Lane));
    }

    #[test]
    fn test_owner_only_process_has_lifeline_and_lanes() {
        let process = ProcessDefinition::new("P", "Idle").with_owner(Actor::new("A", "A"));
        let graph = DiagramGenerator::default().generate(&process, &Catalog::new());

        let kinds: Vec<_> = graph.nodes().iter().map(|node| node.kind()).collect();
        assert_eq!(
            kinds,
            [NodeKind::ActorTop, NodeKind::ActorBottom, NodeKind::Lane, NodeKind::Lane]
        );
        // Minimum canvas: 50 + 80 + 600
        assert_eq!(graph.nodes()[1].position().y(), 730.0);
    }

    #[test]
    fn test_skipped_items_keep_their_slot() {
        let catalog = Catalog::from_records(
            [InterfaceRecord::new("IF1", InterfaceKind::Rest, "IF1")
                .with_provider(Actor::new("B", "B"))],
            [ActivityRecord::new("ACT1", "Check", "check")],
        );
        let process = ProcessDefinition::new("P", "P")
            .with_owner(Actor::new("A", "A"))
            .with_interface_usage(InterfaceUsage::new("IF1", 1))
            .with_activity_usage(ActivityUsage::new("ACT1", 2));

        let graph = DiagramGenerator::default().generate(&process, &catalog);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].y_position(), 370.0);
    }
}

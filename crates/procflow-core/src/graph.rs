//! Positioned node/edge graph produced by the generator.
//!
//! The graph is renderer-agnostic: nodes carry a kind, an absolute position
//! and an optional size; edges reference nodes by id. Any generic node/edge
//! graph component can draw it, and it round-trips through serde so that a
//! hand-edited copy can be persisted and loaded back.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    identifier::Id,
    model::{InterfaceKind, UsageType},
};

/// Role of a node in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Head of an actor lifeline.
    ActorTop,
    /// Foot of an actor lifeline.
    ActorBottom,
    /// Start or end boundary of the process.
    Lane,
}

/// Which boundary a lane node marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LaneKind {
    Start,
    End,
}

/// Descriptive payload attached to an actor lifeline node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorData {
    display_name: String,
    lifeline_height: f32,
}

impl ActorData {
    pub fn new(display_name: impl Into<String>, lifeline_height: f32) -> Self {
        Self {
            display_name: display_name.into(),
            lifeline_height,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Vertical extent of the lifeline, equal to the canvas height.
    pub fn lifeline_height(&self) -> f32 {
        self.lifeline_height
    }
}

/// Descriptive payload attached to a lane node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneData {
    lane_kind: LaneKind,
    process_name: String,
    process_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl LaneData {
    pub fn new(
        lane_kind: LaneKind,
        process_name: impl Into<String>,
        process_level: impl Into<String>,
    ) -> Self {
        Self {
            lane_kind,
            process_name: process_name.into(),
            process_level: process_level.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn lane_kind(&self) -> LaneKind {
        self.lane_kind
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn process_level(&self) -> &str {
        &self.process_level
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Kind-specific node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeData {
    Actor(ActorData),
    Lane(LaneData),
}

/// A positioned node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    id: Id,
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actor_id: Option<Id>,
    position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
    data: NodeData,
}

impl LayoutNode {
    /// Creates a lifeline node (top or bottom) for an actor.
    pub fn actor(id: Id, kind: NodeKind, actor_id: Id, position: Point, data: ActorData) -> Self {
        Self {
            id,
            kind,
            actor_id: Some(actor_id),
            position,
            size: None,
            data: NodeData::Actor(data),
        }
    }

    /// Creates a lane marker node.
    pub fn lane(id: Id, position: Point, size: Size, data: LaneData) -> Self {
        Self {
            id,
            kind: NodeKind::Lane,
            actor_id: None,
            position,
            size: Some(size),
            data: NodeData::Lane(data),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn actor_id(&self) -> Option<Id> {
        self.actor_id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }
}

/// Visual role of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// A call or transfer between two lifelines.
    Call,
    /// An internal activity drawn as a loop on one lifeline.
    SelfLoop,
}

/// An edge between two lifeline nodes at a given timeline position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    id: Id,
    source: Id,
    target: Id,
    kind: EdgeKind,
    label: String,
    sequence_number: i64,
    y_position: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage_type: Option<UsageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface_kind: Option<InterfaceKind>,
}

impl LayoutEdge {
    /// Creates a call edge for an interface usage.
    pub fn call(
        id: Id,
        source: Id,
        target: Id,
        label: String,
        sequence_number: i64,
        y_position: f32,
    ) -> Self {
        Self {
            id,
            source,
            target,
            kind: EdgeKind::Call,
            label,
            sequence_number,
            y_position,
            usage_type: None,
            interface_kind: None,
        }
    }

    /// Creates a self-loop on a single node.
    pub fn self_loop(
        id: Id,
        node: Id,
        label: String,
        sequence_number: i64,
        y_position: f32,
    ) -> Self {
        Self {
            id,
            source: node,
            target: node,
            kind: EdgeKind::SelfLoop,
            label,
            sequence_number,
            y_position,
            usage_type: None,
            interface_kind: None,
        }
    }

    pub fn with_usage_type(mut self, usage_type: Option<UsageType>) -> Self {
        self.usage_type = usage_type;
        self
    }

    pub fn with_interface_kind(mut self, kind: InterfaceKind) -> Self {
        self.interface_kind = Some(kind);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    /// Y coordinate of the timeline slot this edge is drawn at.
    pub fn y_position(&self) -> f32 {
        self.y_position
    }

    pub fn usage_type(&self) -> Option<UsageType> {
        self.usage_type
    }

    pub fn interface_kind(&self) -> Option<&InterfaceKind> {
        self.interface_kind.as_ref()
    }
}

/// The generated diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramGraph {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
}

impl DiagramGraph {
    pub fn new(nodes: Vec<LayoutNode>, edges: Vec<LayoutEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns the nodes of the given kind, in graph order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }
}

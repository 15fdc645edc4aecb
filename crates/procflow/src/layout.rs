//! Coordinate assignment for lifelines and timeline slots.
//!
//! Horizontal slots come from the actor registry ordinal, vertical slots from
//! the position in the merged timeline. Neither depends on how often an actor
//! participates, so the layout is a closed-form function of two counts.

use log::debug;

use procflow_core::{
    geometry::Point,
    graph::{ActorData, LayoutNode, NodeKind},
    identifier::Id,
};

use crate::{config::LayoutConfig, registry::ActorRegistry};

/// Node id of the top lifeline node of an actor.
///
/// Top and bottom ids use sibling prefixes, neither of which starts the
/// other, so no actor id can produce another actor's node id.
pub fn actor_top_id(actor: Id) -> Id {
    actor.with_prefix("app-top")
}

/// Node id of the bottom lifeline node of an actor.
pub fn actor_bottom_id(actor: Id) -> Id {
    actor.with_prefix("app-bottom")
}

/// Computed coordinates of one diagram.
#[derive(Debug, Clone, Copy)]
pub struct Coordinates<'c> {
    config: &'c LayoutConfig,
    item_count: usize,
    canvas_height: f32,
}

impl<'c> Coordinates<'c> {
    /// Computes the canvas for a timeline of `item_count` entries.
    ///
    /// The canvas height is `max(min_canvas_height, y_initial_offset +
    /// item_count * y_spacing + trailing_margin)`.
    pub fn new(config: &'c LayoutConfig, item_count: usize) -> Self {
        let content_height = config.y_initial_offset()
            + item_count as f32 * config.y_spacing()
            + config.trailing_margin();
        let canvas_height = config.min_canvas_height().max(content_height);

        debug!(item_count, canvas_height; "Canvas computed");

        Self {
            config,
            item_count,
            canvas_height,
        }
    }

    /// X coordinate of the lifeline with registry ordinal `ordinal`.
    pub fn actor_x(&self, ordinal: usize) -> f32 {
        self.config.x_offset() + ordinal as f32 * self.config.x_spacing()
    }

    /// Y coordinate of the timeline slot at 0-based `position`.
    pub fn slot_y(&self, position: usize) -> f32 {
        self.config.y_initial_offset() + position as f32 * self.config.y_spacing()
    }

    /// Y coordinate one slot past the last item.
    pub fn timeline_end_y(&self) -> f32 {
        self.slot_y(self.item_count)
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    /// Emits the top and bottom lifeline nodes of every registered actor,
    /// in registry order.
    ///
    /// The bottom node sits `header_height + canvas_height` below the top one
    /// so the lifeline spans the whole timeline.
    pub fn lifeline_nodes(&self, registry: &ActorRegistry) -> Vec<LayoutNode> {
        let lifeline_span = Point::new(0.0, self.config.header_height() + self.canvas_height);

        registry
            .actors()
            .enumerate()
            .flat_map(|(ordinal, actor)| {
                let top = Point::new(self.actor_x(ordinal), self.config.y_top());
                let data = ActorData::new(actor.display_name(), self.canvas_height);
                [
                    LayoutNode::actor(
                        actor_top_id(actor.id()),
                        NodeKind::ActorTop,
                        actor.id(),
                        top,
                        data.clone(),
                    ),
                    LayoutNode::actor(
                        actor_bottom_id(actor.id()),
                        NodeKind::ActorBottom,
                        actor.id(),
                        top.add_point(lifeline_span),
                        data,
                    ),
                ]
            })
            .collect()
    }
}

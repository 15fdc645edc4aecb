//! Start and end lane markers framing the diagram.

use procflow_core::{
    geometry::{Point, Size},
    graph::{LaneData, LaneKind, LayoutNode},
    model::ProcessDefinition,
};

use crate::layout::Coordinates;

/// Process level recorded on lane markers.
pub const PROCESS_LEVEL: &str = "Technical";

const DEFAULT_DESCRIPTION: &str = "Technical process";

/// Builds the start and end lanes of `process`.
///
/// The start lane sits `lane_offset` above the first slot and the end lane
/// `lane_offset` below the slot after the last item. Both are
/// `actor_count * x_spacing + lane_margin` wide so they span every lifeline.
pub fn frame(
    process: &ProcessDefinition,
    actor_count: usize,
    coords: &Coordinates<'_>,
) -> [LayoutNode; 2] {
    let config = coords.config();
    let size = Size::new(
        actor_count as f32 * config.x_spacing() + config.lane_margin(),
        config.lane_height(),
    );

    let description = process
        .description()
        .filter(|description| !description.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);

    let start = LayoutNode::lane(
        process.id().with_prefix("lane-start"),
        Point::new(config.lane_x(), coords.slot_y(0) - config.lane_offset()),
        size,
        LaneData::new(LaneKind::Start, process.name(), PROCESS_LEVEL).with_description(description),
    );

    let end = LayoutNode::lane(
        process.id().with_prefix("lane-end"),
        Point::new(config.lane_x(), coords.timeline_end_y() + config.lane_offset()),
        size,
        LaneData::new(LaneKind::End, process.name(), PROCESS_LEVEL),
    );

    [start, end]
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use procflow_core::graph::{NodeData, NodeKind};

    use super::*;
    use crate::config::LayoutConfig;

    fn lane_data(node: &LayoutNode) -> &LaneData {
        match node.data() {
            NodeData::Lane(data) => data,
            NodeData::Actor(_) => panic!("Expected lane data"),
        }
    }

    #[test]
    fn test_lanes_bound_the_timeline() {
        let config = LayoutConfig::default();
        let coords = Coordinates::new(&config, 3);
        let process = ProcessDefinition::new(9_u64, "Settlement");

        let [start, end] = frame(&process, 3, &coords);

        assert_eq!(start.id(), "lane-start-9");
        assert_eq!(end.id(), "lane-end-9");
        assert_eq!(start.kind(), NodeKind::Lane);
        assert_approx_eq!(f32, start.position().x(), 0.0);
        assert_approx_eq!(f32, start.position().y(), 170.0);
        // 250 + 3 * 120 + 80
        assert_approx_eq!(f32, end.position().y(), 690.0);
    }

    #[test]
    fn test_lane_width_spans_all_lifelines() {
        let config = LayoutConfig::default();
        let coords = Coordinates::new(&config, 0);
        let process = ProcessDefinition::new("P", "P");

        for actor_count in [0, 1, 4] {
            let [start, end] = frame(&process, actor_count, &coords);
            let expected = actor_count as f32 * 300.0 + 300.0;
            assert_approx_eq!(f32, start.size().unwrap().width(), expected);
            assert_approx_eq!(f32, end.size().unwrap().width(), expected);
        }
    }

    #[test]
    fn test_lane_metadata() {
        let config = LayoutConfig::default();
        let coords = Coordinates::new(&config, 0);

        let process = ProcessDefinition::new("P", "Nightly batch");
        let [start, end] = frame(&process, 1, &coords);
        assert_eq!(lane_data(&start).lane_kind(), LaneKind::Start);
        assert_eq!(lane_data(&start).process_name(), "Nightly batch");
        assert_eq!(lane_data(&start).process_level(), "Technical");
        assert_eq!(lane_data(&start).description(), Some("Technical process"));
        assert_eq!(lane_data(&end).lane_kind(), LaneKind::End);
        assert_eq!(lane_data(&end).description(), None);

        let described = process.with_description("Moves ledgers");
        let [start, _] = frame(&described, 1, &coords);
        assert_eq!(lane_data(&start).description(), Some("Moves ledgers"));
    }
}

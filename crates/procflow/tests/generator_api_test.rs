//! Integration tests for the DiagramGenerator API
//!
//! These tests drive the public API end to end on a small settlement process.

use std::collections::HashSet;

use float_cmp::assert_approx_eq;

use procflow::{
    DiagramGenerator,
    catalog::{Catalog, ProcessDocument},
    config::{AppConfig, LayoutConfig},
    graph::{DiagramGraph, EdgeKind, NodeKind},
    identifier::Id,
    model::{
        Actor, ActivityRecord, ActivityUsage, InterfaceKind, InterfaceRecord, InterfaceUsage,
        ProcessDefinition,
    },
};

/// Process `P` owned by `A`: a file from `A` to `B`, a validation step on
/// `A`, then a REST call from `A` to `C`.
fn settlement() -> (ProcessDefinition, Catalog) {
    let a = Actor::new("A", "Accounts");
    let b = Actor::new("B", "Bank gateway");
    let c = Actor::new("C", "Compliance");

    let catalog = Catalog::from_records(
        [
            InterfaceRecord::new("IF1", InterfaceKind::File, "IF1")
                .with_provider(a.clone())
                .with_consumer(b),
            InterfaceRecord::new("IF2", InterfaceKind::Rest, "IF2")
                .with_provider(c)
                .with_consumer(a.clone()),
        ],
        [ActivityRecord::new("ACT1", "Validate", "validate")],
    );

    let process = ProcessDefinition::new("P", "Settlement")
        .with_owner(a)
        .with_interface_usage(InterfaceUsage::new("IF1", 1))
        .with_interface_usage(InterfaceUsage::new("IF2", 3))
        .with_activity_usage(ActivityUsage::new("ACT1", 2));

    (process, catalog)
}

fn node_x(graph: &DiagramGraph, id: &str) -> f32 {
    graph.node(Id::new(id)).expect("node exists").position().x()
}

#[test]
fn test_actor_columns() {
    let (process, catalog) = settlement();
    let graph = DiagramGenerator::default().generate(&process, &catalog);

    assert_approx_eq!(f32, node_x(&graph, "app-top-A"), 100.0);
    assert_approx_eq!(f32, node_x(&graph, "app-top-B"), 400.0);
    assert_approx_eq!(f32, node_x(&graph, "app-top-C"), 700.0);
    assert_approx_eq!(f32, node_x(&graph, "app-bottom-C"), 700.0);
}

#[test]
fn test_edges_follow_the_timeline() {
    let (process, catalog) = settlement();
    let graph = DiagramGenerator::default().generate(&process, &catalog);
    let edges = graph.edges();

    assert_eq!(edges.len(), 3);

    assert_eq!(edges[0].label(), "1. IF1");
    assert_eq!(edges[0].source(), "app-top-A");
    assert_eq!(edges[0].target(), "app-top-B");
    assert_approx_eq!(f32, edges[0].y_position(), 250.0);

    assert_eq!(edges[1].label(), "2. Validate");
    assert_eq!(edges[1].kind(), EdgeKind::SelfLoop);
    assert_eq!(edges[1].source(), "app-top-A");
    assert_eq!(edges[1].target(), "app-top-A");
    assert_approx_eq!(f32, edges[1].y_position(), 370.0);

    assert_eq!(edges[2].label(), "3. IF2");
    assert_eq!(edges[2].source(), "app-top-A");
    assert_eq!(edges[2].target(), "app-top-C");
    assert_approx_eq!(f32, edges[2].y_position(), 490.0);
}

#[test]
fn test_canvas_and_lanes() {
    let (process, catalog) = settlement();
    let graph = DiagramGenerator::default().generate(&process, &catalog);

    // canvas height = max(600, 250 + 3 * 120 + 200) = 810
    let bottom = graph.node(Id::new("app-bottom-A")).unwrap();
    assert_approx_eq!(f32, bottom.position().y(), 50.0 + 80.0 + 810.0);

    let lanes: Vec<_> = graph.nodes_of_kind(NodeKind::Lane).collect();
    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[0].id(), "lane-start-P");
    assert_eq!(lanes[1].id(), "lane-end-P");
    assert_approx_eq!(f32, lanes[0].size().unwrap().width(), 3.0 * 300.0 + 300.0);
}

#[test]
fn test_every_edge_endpoint_exists() {
    let (process, catalog) = settlement();
    let graph = DiagramGenerator::default().generate(&process, &catalog);

    for edge in graph.edges() {
        assert!(graph.node(edge.source()).is_some(), "missing {}", edge.source());
        assert!(graph.node(edge.target()).is_some(), "missing {}", edge.target());
    }
}

#[test]
fn test_generation_is_deterministic() {
    let (process, catalog) = settlement();
    let generator = DiagramGenerator::default();

    let first = serde_json::to_string(&generator.generate(&process, &catalog)).unwrap();
    let second = serde_json::to_string(&generator.generate(&process, &catalog)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_graph_round_trips_through_json() {
    let (process, catalog) = settlement();
    let graph = DiagramGenerator::default().generate(&process, &catalog);

    let json = serde_json::to_string(&graph).unwrap();
    let restored: DiagramGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn test_generator_from_document_with_numeric_ids() {
    let source = r#"{
        "process": {
            "id": 31,
            "name": "Customer onboarding",
            "owner": { "id": 1, "displayName": "CRM" },
            "interfaceUsages": [
                { "interfaceId": 100, "sequenceNumber": 1, "usageType": "consumes" },
                { "interfaceId": 999, "sequenceNumber": 2 }
            ],
            "activityUsages": [ { "activityId": 7, "sequenceNumber": 1 } ]
        },
        "interfaces": [
            {
                "id": 100,
                "kind": "SOAP",
                "label": "IML-100",
                "provider": { "id": 2, "displayName": "KYC" },
                "consumer": { "id": 1, "displayName": "CRM" }
            }
        ],
        "activities": [ { "id": 7, "name": "Score risk", "kind": "compute" } ]
    }"#;

    let (process, catalog) = ProcessDocument::from_json(source).unwrap().into_parts();
    let graph = DiagramGenerator::default().generate(&process, &catalog);

    // Interface 999 is not catalogued and vanishes entirely
    assert_eq!(graph.edges().len(), 2);
    assert_eq!(graph.edges()[0].label(), "1. IML-100 (consumes)");
    assert_eq!(graph.edges()[0].source(), "app-top-1");
    assert_eq!(graph.edges()[0].target(), "app-top-2");
    assert_eq!(graph.edges()[1].label(), "1. Score risk");
    assert!(graph.node(Id::new("lane-end-31")).is_some());
}

#[test]
fn test_generator_with_config() {
    let config: AppConfig = AppConfig::new(LayoutConfig::default().with_y_spacing(100.0));
    let generator = DiagramGenerator::new(config).expect("valid config");

    let (process, catalog) = settlement();
    let graph = generator.generate(&process, &catalog);
    assert_approx_eq!(f32, graph.edges()[2].y_position(), 450.0);
}

#[test]
fn test_uncatalogued_activity_keeps_its_slot() {
    let catalog = Catalog::from_records(
        [InterfaceRecord::new("IF1", InterfaceKind::Rest, "IF1")
            .with_provider(Actor::new("B", "Billing"))
            .with_consumer(Actor::new("A", "Accounts"))],
        [],
    );
    let process = ProcessDefinition::new("P", "Settlement")
        .with_owner(Actor::new("A", "Accounts"))
        .with_activity_usage(ActivityUsage::new("GONE", 1))
        .with_interface_usage(InterfaceUsage::new("IF1", 2));

    let graph = DiagramGenerator::default().generate(&process, &catalog);

    // The missing activity draws nothing but still occupies the first slot
    assert_eq!(graph.edges().len(), 1);
    assert_eq!(graph.edges()[0].label(), "2. IF1");
    assert_approx_eq!(f32, graph.edges()[0].y_position(), 370.0);

    let end = graph.node(Id::new("lane-end-P")).expect("end lane");
    assert_approx_eq!(f32, end.position().y(), 570.0);
}

#[test]
fn test_node_ids_stay_unique_for_lookalike_actor_ids() {
    let a = Actor::new("A", "Accounts");
    let catalog = Catalog::from_records(
        [
            InterfaceRecord::new("IF1", InterfaceKind::Rest, "IF1")
                .with_provider(Actor::new("bottom-A", "Lookalike"))
                .with_consumer(a.clone()),
            InterfaceRecord::new("IF2", InterfaceKind::File, "IF2")
                .with_provider(Actor::new("top-A", "Another"))
                .with_consumer(a.clone()),
        ],
        [],
    );
    let process = ProcessDefinition::new("P", "P")
        .with_owner(a)
        .with_interface_usage(InterfaceUsage::new("IF1", 1))
        .with_interface_usage(InterfaceUsage::new("IF2", 2));

    let graph = DiagramGenerator::default().generate(&process, &catalog);

    let ids: HashSet<_> = graph.nodes().iter().map(|node| node.id()).collect();
    assert_eq!(ids.len(), graph.nodes().len());

    for edge in graph.edges() {
        for end in [edge.source(), edge.target()] {
            let matching = graph.nodes().iter().filter(|node| node.id() == end).count();
            assert_eq!(matching, 1, "edge {} endpoint {end}", edge.id());
        }
    }
    assert_eq!(graph.edges()[0].target(), "app-top-bottom-A");
}

#[test]
fn test_document_with_loose_fields() {
    let source = r#"{
        "process": {
            "id": "P",
            "name": "Loose",
            "owner": { "id": "A", "displayName": "Accounts" },
            "interfaceUsages": [
                { "interfaceId": "IF1", "sequenceNumber": 1, "usageType": "Consumes" },
                { "interfaceId": "IF2", "sequenceNumber": 2 }
            ]
        },
        "interfaces": [
            {
                "id": "IF1",
                "kind": "Rest",
                "label": "IF1",
                "provider": { "id": "B", "displayName": "Billing" },
                "consumer": { "id": "A", "displayName": "Accounts" }
            },
            {
                "id": "IF2",
                "provider": { "id": "B", "displayName": "Billing" },
                "consumer": { "id": "A", "displayName": "Accounts" }
            }
        ]
    }"#;

    let (process, catalog) = ProcessDocument::from_json(source).unwrap().into_parts();
    let graph = DiagramGenerator::default().generate(&process, &catalog);

    assert_eq!(graph.edges()[0].label(), "1. IF1 (consumes)");
    // No kind means not a file transfer: consumer calls provider
    assert_eq!(graph.edges()[1].label(), "2. ");
    assert_eq!(graph.edges()[1].source(), "app-top-A");
    assert_eq!(graph.edges()[1].target(), "app-top-B");
}

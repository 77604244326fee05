use jabeja_core::errors::JabejaError;
use jabeja_core::{Color, NodeId};
use jabeja_graph::{parse_edge_list, GraphBuilder};

fn id(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn expect_graph_error(result: Result<jabeja_graph::Graph, JabejaError>, code: &str) {
    match result {
        Err(JabejaError::Graph(info)) => assert_eq!(info.code, code),
        other => panic!("expected graph error {code}, got {other:?}"),
    }
}

#[test]
fn dangling_neighbor_rejected() {
    let mut builder = GraphBuilder::new();
    builder.insert_node(id(0), vec![id(1)]).unwrap();
    expect_graph_error(builder.build(), "dangling-neighbor");
}

#[test]
fn asymmetric_edge_rejected() {
    let mut builder = GraphBuilder::new();
    builder.insert_node(id(0), vec![id(1)]).unwrap();
    builder.insert_node(id(1), vec![]).unwrap();
    let err = builder.build().unwrap_err();
    assert_eq!(err.code(), "asymmetric-edge");
    assert_eq!(err.info().context.get("node"), Some(&"0".to_string()));
    assert!(err.info().hint.is_some());
}

#[test]
fn self_loop_rejected() {
    let mut builder = GraphBuilder::new();
    builder.insert_node(id(3), vec![id(3)]).unwrap();
    expect_graph_error(builder.build(), "self-loop");
}

#[test]
fn duplicate_node_rejected() {
    let mut builder = GraphBuilder::new();
    builder.insert_node(id(0), vec![]).unwrap();
    let err = builder.insert_node(id(0), vec![]).unwrap_err();
    assert_eq!(err.code(), "duplicate-node");
}

#[test]
fn edges_are_symmetrised_and_ordered() {
    let graph = GraphBuilder::from_edges(&[(2, 0), (0, 1), (1, 2), (0, 1)])
        .build()
        .unwrap();
    assert_eq!(graph.size(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![id(0), id(1), id(2)]);
    assert_eq!(graph.neighbors(id(0)).unwrap(), &[id(2), id(1)]);
}

#[test]
fn swap_preserves_histogram_and_tracks_migration() {
    let mut builder = GraphBuilder::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
    builder.set_colors(&[0, 0, 1, 1]).unwrap();
    let mut graph = builder.build().unwrap();
    let before = graph.color_histogram();

    graph.swap_colors(id(1), id(2)).unwrap();

    assert_eq!(graph.color_histogram(), before);
    assert_eq!(graph.color(id(1)).unwrap(), Color::from_raw(1));
    assert_eq!(graph.color(id(2)).unwrap(), Color::from_raw(0));
    assert!(graph.lookup(id(1)).unwrap().has_migrated());
    assert!(!graph.lookup(id(0)).unwrap().has_migrated());
}

#[test]
fn unknown_lookup_is_an_error() {
    let graph = GraphBuilder::from_edges(&[(0, 1)]).build().unwrap();
    assert_eq!(graph.lookup(id(9)).unwrap_err().code(), "unknown-node");
    assert_eq!(graph.position(id(9)).unwrap_err().code(), "unknown-node");
    assert_eq!(graph.degree_in_color(id(0), Color::from_raw(0)).unwrap(), 1);
}

#[test]
fn edge_list_parses_comments_isolated_nodes_and_weights() {
    let input = "# comment\n0 1 0.5\n1 2\n% other comment\n\n7\n";
    let graph = parse_edge_list(input).unwrap().build().unwrap();
    assert_eq!(graph.size(), 4);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.neighbors(id(7)).unwrap().is_empty());
}

#[test]
fn edge_list_rejects_self_loops_and_garbage() {
    assert_eq!(parse_edge_list("4 4\n").unwrap_err().code(), "self-loop");
    let err = parse_edge_list("0 x\n").unwrap_err();
    assert_eq!(err.code(), "edge-list-number");
    assert_eq!(err.info().context.get("line"), Some(&"1".to_string()));
}

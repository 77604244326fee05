use std::collections::BTreeMap;

use jabeja_core::{Color, RngHandle};
use jabeja_graph::{gen_ring, graph_from_json, graph_to_json, partition_hash, InitialColoring};

fn colors(policy: InitialColoring, nodes: usize, partitions: u32, seed: u64) -> Vec<u32> {
    let mut builder = gen_ring(nodes).unwrap();
    let mut rng = RngHandle::from_seed(seed);
    policy.apply(&mut builder, partitions, &mut rng).unwrap();
    builder
        .build()
        .unwrap()
        .nodes()
        .iter()
        .map(|node| node.color().as_raw())
        .collect()
}

#[test]
fn round_robin_cycles_through_partitions() {
    assert_eq!(
        colors(InitialColoring::RoundRobin, 7, 3, 0),
        vec![0, 1, 2, 0, 1, 2, 0]
    );
}

#[test]
fn batch_assigns_contiguous_blocks() {
    assert_eq!(
        colors(InitialColoring::Batch, 7, 3, 0),
        vec![0, 0, 0, 1, 1, 1, 2]
    );
}

#[test]
fn random_is_seeded_and_in_range() {
    let a = colors(InitialColoring::Random, 50, 4, 11);
    let b = colors(InitialColoring::Random, 50, 4, 11);
    assert_eq!(a, b);
    assert!(a.iter().all(|&c| c < 4));
}

#[test]
fn zero_partitions_is_a_config_error() {
    let mut builder = gen_ring(4).unwrap();
    let mut rng = RngHandle::from_seed(0);
    let err = InitialColoring::RoundRobin
        .apply(&mut builder, 0, &mut rng)
        .unwrap_err();
    assert_eq!(err.code(), "zero-partitions");
}

#[test]
fn json_snapshot_preserves_colors() {
    let mut builder = gen_ring(5).unwrap();
    builder.set_colors(&[1, 0, 1, 0, 2]).unwrap();
    let graph = builder.build().unwrap();
    let json = graph_to_json(&graph).unwrap();

    let mut restored = graph_from_json(&json).unwrap();
    InitialColoring::Preserve
        .apply(&mut restored, 0, &mut RngHandle::from_seed(0))
        .unwrap();
    let restored = restored.build().unwrap();

    assert_eq!(restored, graph);
    assert_eq!(partition_hash(&restored), partition_hash(&graph));
    let histogram: BTreeMap<Color, usize> = restored.color_histogram();
    assert_eq!(histogram.get(&Color::from_raw(2)), Some(&1));
}

#[test]
fn partition_hash_tracks_colors() {
    let mut builder = gen_ring(4).unwrap();
    builder.set_colors(&[0, 0, 1, 1]).unwrap();
    let mut graph = builder.build().unwrap();
    let before = partition_hash(&graph);
    graph
        .swap_colors(jabeja_core::NodeId::from_raw(0), jabeja_core::NodeId::from_raw(2))
        .unwrap();
    assert_ne!(partition_hash(&graph), before);
}

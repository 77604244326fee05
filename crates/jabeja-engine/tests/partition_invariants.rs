use std::collections::BTreeSet;

use jabeja_core::{NodeId, RngHandle};
use jabeja_engine::{
    CandidateSampler, GraphSampler, MemorySink, NodeSelectionPolicy, RunConfig, SelectionGate,
    Simulation,
};
use jabeja_graph::{gen_erdos_renyi, Graph, InitialColoring};
use proptest::prelude::*;

fn colored_graph(seed: u64, nodes: usize, p: f64, partitions: u32) -> Graph {
    let mut rng = RngHandle::from_seed(seed);
    let mut builder = gen_erdos_renyi(nodes, p, &mut rng).unwrap();
    InitialColoring::Random
        .apply(&mut builder, partitions, &mut rng)
        .unwrap();
    builder.build().unwrap()
}

fn policy() -> impl Strategy<Value = NodeSelectionPolicy> {
    prop_oneof![
        Just(NodeSelectionPolicy::Local),
        Just(NodeSelectionPolicy::Random),
        Just(NodeSelectionPolicy::Hybrid),
    ]
}

fn gate() -> impl Strategy<Value = SelectionGate> {
    prop_oneof![Just(SelectionGate::Strict), Just(SelectionGate::Annealed)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn rounds_preserve_partition_sizes(
        seed in any::<u64>(),
        nodes in 5usize..40,
        p in 0.05f64..0.6,
        partitions in 1u32..5,
        policy in policy(),
        gate in gate(),
    ) {
        let graph = colored_graph(seed, nodes, p, partitions);
        let histogram = graph.color_histogram();
        let edges = graph.edge_count();
        let config = RunConfig {
            node_selection_policy: policy,
            selection_gate: gate,
            uniform_random_sample_size: 3,
            rounds: 8,
            ..RunConfig::default()
        };
        let mut simulation = Simulation::new(graph, &config, seed).unwrap();
        let mut sink = MemorySink::new();
        let mut previous_swaps = 0;
        for _ in 0..config.rounds {
            let report = simulation.step_round(&mut sink).unwrap();
            prop_assert_eq!(simulation.graph().color_histogram(), histogram.clone());
            prop_assert!(report.edge_cut <= edges);
            prop_assert!(report.migrations <= nodes);
            prop_assert!(report.swaps >= previous_swaps);
            prop_assert!(report.temperature >= 1.0);
            previous_swaps = report.swaps;
        }
    }

    #[test]
    fn samples_are_distinct_and_exclude_the_subject(
        seed in any::<u64>(),
        nodes in 2usize..40,
        p in 0.0f64..1.0,
        count in 1usize..8,
    ) {
        let graph = colored_graph(seed, nodes, p, 2);
        let mut rng = RngHandle::from_seed(seed ^ 0xABCD);
        let mut sampler = GraphSampler;
        for subject in graph.node_ids() {
            let neighbors = sampler.neighbor_sample(&graph, subject, count, &mut rng).unwrap();
            let all = graph.neighbors(subject).unwrap();
            prop_assert_eq!(neighbors.len(), all.len().min(count));
            let unique: BTreeSet<NodeId> = neighbors.iter().copied().collect();
            prop_assert_eq!(unique.len(), neighbors.len());
            prop_assert!(neighbors.iter().all(|n| all.contains(n)));

            let wanted = count.min(nodes - 1);
            let uniform = sampler.uniform_sample(&graph, subject, wanted, &mut rng).unwrap();
            let unique: BTreeSet<NodeId> = uniform.iter().copied().collect();
            prop_assert_eq!(uniform.len(), wanted);
            prop_assert_eq!(unique.len(), wanted);
            prop_assert!(!unique.contains(&subject));
        }
    }
}

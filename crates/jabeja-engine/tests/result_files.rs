use std::collections::BTreeMap;
use std::fs;

use jabeja_core::{RunProvenance, SchemaVersion};
use jabeja_engine::manifest::RunManifest;
use jabeja_engine::{
    result_file_name, run, NodeSelectionPolicy, ReportSink, RoundReport, RunConfig, TsvSink,
};
use jabeja_graph::{gen_grid, partition_hash, InitialColoring};
use tempfile::tempdir;

#[test]
fn file_name_encodes_parameters() {
    let config = RunConfig::default();
    assert_eq!(
        result_file_name("3elt.graph", &config, InitialColoring::RoundRobin),
        "3elt.graph_NS_HYBRID_GICP_ROUND_ROBIN_T_2.0_D_0.9_RNSS_3_URSS_6_A_2.0_R_1000.txt"
    );

    let local = RunConfig {
        node_selection_policy: NodeSelectionPolicy::Local,
        initial_temperature: 3.0,
        delta: 0.003,
        rounds: 10,
        ..RunConfig::default()
    };
    assert_eq!(
        result_file_name("add20", &local, InitialColoring::Batch),
        "add20_NS_LOCAL_GICP_BATCH_T_3.0_D_0.003_RNSS_3_URSS_6_A_2.0_R_10.txt"
    );
}

#[test]
fn tsv_sink_writes_preamble_header_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("result.txt");
    let mut sink = TsvSink::create(&path).unwrap();
    sink.record(&RoundReport {
        round: 0,
        edge_cut: 5,
        swaps: 2,
        migrations: 1,
        temperature: 2.0,
    })
    .unwrap();
    sink.record(&RoundReport {
        round: 1,
        edge_cut: 4,
        swaps: 3,
        migrations: 3,
        temperature: 1.8,
    })
    .unwrap();
    sink.finish().unwrap();
    assert_eq!(sink.path(), path.as_path());

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "# Migration is number of nodes that have changed color.",
            "",
            "Round\tEdge-Cut\tSwaps\tMigrations\tTemperature",
            "0\t5\t2\t1\t2.0000",
            "1\t4\t3\t3\t1.8000",
        ]
    );
}

#[test]
fn tsv_sink_receives_one_row_per_round() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.txt");
    let mut builder = gen_grid(4, 4).unwrap();
    InitialColoring::RoundRobin
        .apply(&mut builder, 2, &mut jabeja_core::RngHandle::from_seed(0))
        .unwrap();
    let config = RunConfig {
        rounds: 6,
        ..RunConfig::default()
    };
    let mut sink = TsvSink::create(&path).unwrap();
    run(builder.build().unwrap(), &config, 4, &mut sink).unwrap();
    drop(sink);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3 + 6);
}

#[test]
fn manifest_roundtrips_through_disk() {
    let dir = tempdir().unwrap();
    let graph = gen_grid(3, 3).unwrap().build().unwrap();
    let config = RunConfig {
        rounds: 4,
        uniform_random_sample_size: 2,
        ..RunConfig::default()
    };
    let hash = partition_hash(&graph);
    let (summary, _) = run(graph, &config, 8, &mut jabeja_engine::NullSink).unwrap();

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("jabeja-engine".to_string(), "0.1.0".to_string());
    let manifest = RunManifest {
        config,
        provenance: RunProvenance {
            schema_version: SchemaVersion::new(1, 0, 0),
            graph_source: "grid-3x3".to_string(),
            initial_partition_hash: hash,
            seed: 8,
            tool_versions,
        },
        summary,
        results_file: Some("grid.txt".into()),
        partition_file: None,
    };
    let path = dir.path().join("out").join("manifest.json");
    manifest.write(&path).unwrap();
    assert_eq!(RunManifest::load(&path).unwrap(), manifest);

    let err = RunManifest::load(&dir.path().join("missing.json")).unwrap_err();
    assert_eq!(err.code(), "manifest-read");
}

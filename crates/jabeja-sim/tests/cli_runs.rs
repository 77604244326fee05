use std::fs;
use std::path::Path;
use std::process::Command;

use jabeja_engine::manifest::RunManifest;
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_jabeja-sim");

/// Two 4-cliques joined by a single bridge.
const BARBELL: &str = "# barbell\n0 1\n0 2\n0 3\n1 2\n1 3\n2 3\n3 4\n4 5\n4 6\n4 7\n5 6\n5 7\n6 7\n";

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn partition_writes_results_partition_and_manifest() {
    let dir = tempdir().unwrap();
    let graph = dir.path().join("barbell.txt");
    write(&graph, BARBELL);
    let config = dir.path().join("run.yaml");
    write(
        &config,
        "graph:\n  partitions: 2\nrun:\n  rounds: 20\n  uniform_random_sample_size: 3\n",
    );
    let out = dir.path().join("out");

    let output = Command::new(BIN)
        .args(["--log-level", "warn", "partition", "--config"])
        .arg(&config)
        .arg("--graph")
        .arg(&graph)
        .arg("--out")
        .arg(&out)
        .args(["--seed", "12"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let manifest = RunManifest::load(&out.join("manifest.json")).unwrap();
    assert_eq!(manifest.provenance.seed, 12);
    assert_eq!(manifest.summary.rounds, 20);
    let results = out.join(manifest.results_file.unwrap());
    assert_eq!(
        results.file_name().unwrap().to_str().unwrap(),
        "barbell.txt_NS_HYBRID_GICP_ROUND_ROBIN_T_2.0_D_0.9_RNSS_3_URSS_3_A_2.0_R_20.txt"
    );
    let table = fs::read_to_string(results).unwrap();
    assert_eq!(table.lines().count(), 3 + 20);
    assert!(out.join(manifest.partition_file.unwrap()).exists());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["final_edge_cut"], manifest.summary.final_edge_cut);
}

#[test]
fn partition_rejects_oversized_uniform_sample() {
    let dir = tempdir().unwrap();
    let graph = dir.path().join("tiny.txt");
    write(&graph, "0 1\n1 2\n2 0\n");
    let config = dir.path().join("run.yaml");
    write(&config, "run:\n  uniform_random_sample_size: 5\n");

    let output = Command::new(BIN)
        .args(["partition", "--config"])
        .arg(&config)
        .arg("--graph")
        .arg(&graph)
        .arg("--out")
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("uniform_random_sample_size"));
}

#[test]
fn stats_reports_initial_edge_cut() {
    let dir = tempdir().unwrap();
    let graph = dir.path().join("ring.metis");
    write(&graph, "% 4-cycle\n4 4\n2 4\n1 3\n2 4\n1 3\n");

    let output = Command::new(BIN)
        .args(["stats", "--partitions", "2", "--coloring", "batch", "--graph"])
        .arg(&graph)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["nodes"], 4);
    assert_eq!(stats["edges"], 4);
    assert_eq!(stats["edge_cut"], 2);
    assert_eq!(stats["partition_sizes"], serde_json::json!([2, 2]));
}

#[test]
fn stats_on_json_snapshot_keeps_stored_colors() {
    let dir = tempdir().unwrap();
    let mut builder = jabeja_graph::gen_ring(6).unwrap();
    builder.set_colors(&[0, 0, 0, 1, 1, 1]).unwrap();
    let snapshot = jabeja_graph::graph_to_json(&builder.build().unwrap()).unwrap();
    let graph = dir.path().join("partition.json");
    write(&graph, &snapshot);

    let output = Command::new(BIN)
        .args(["stats", "--partitions", "3", "--graph"])
        .arg(&graph)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["coloring"], "PRESERVE");
    assert_eq!(stats["edge_cut"], 2);
    assert_eq!(stats["partition_sizes"], serde_json::json!([3, 3]));
}

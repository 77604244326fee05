use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use jabeja_core::{RunProvenance, SchemaVersion};
use jabeja_engine::manifest::RunManifest;
use jabeja_engine::{result_file_name, Simulation, TsvSink};
use jabeja_graph::{graph_to_json, partition_hash};
use log::info;

use super::load_colored;
use crate::sim_config::{resolve_input, SimConfig};
use crate::write_json;

const PARTITION_FILE: &str = "partition.json";
const MANIFEST_FILE: &str = "manifest.json";

#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// YAML file with `graph`, `run` and `output` sections.
    #[arg(long)]
    pub config: PathBuf,
    /// Graph file overriding `graph.path`.
    #[arg(long)]
    pub graph: Option<PathBuf>,
    /// Output directory overriding `output.directory`.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Master seed overriding `run.seed_policy.master_seed`.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: &PartitionArgs) -> Result<(), Box<dyn Error>> {
    let mut config = SimConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.run.seed_policy.master_seed = seed;
    }
    let seed = config.run.seed_policy.master_seed;
    let Some(graph_path) = args.graph.clone().or_else(|| config.graph.path.clone()) else {
        return Err("no graph given: pass --graph or set graph.path".into());
    };
    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    fs::create_dir_all(&out_dir)?;

    let (format, coloring) = resolve_input(
        &graph_path,
        config.graph.format,
        config.graph.initial_coloring,
    );
    let graph = load_colored(
        &graph_path,
        format,
        coloring,
        config.graph.partitions,
        seed,
    )?;
    config.run.validate_for_graph(&graph)?;
    let initial_hash = partition_hash(&graph);

    let graph_name = graph_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    let results_file = PathBuf::from(result_file_name(
        &graph_name,
        &config.run,
        coloring,
    ));
    let mut sink = TsvSink::create(&out_dir.join(&results_file))?;

    let mut simulation = Simulation::new(graph, &config.run, seed)?;
    let summary = simulation.run(&mut sink)?;
    fs::write(
        out_dir.join(PARTITION_FILE),
        graph_to_json(simulation.graph())?,
    )?;

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "jabeja-sim".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    let manifest = RunManifest {
        config: config.run.clone(),
        provenance: RunProvenance {
            schema_version: SchemaVersion::default(),
            graph_source: graph_path.display().to_string(),
            initial_partition_hash: initial_hash,
            seed,
            tool_versions,
        },
        summary: summary.clone(),
        results_file: Some(results_file),
        partition_file: Some(PathBuf::from(PARTITION_FILE)),
    };
    manifest.write(&out_dir.join(MANIFEST_FILE))?;

    info!(
        "edge cut {} -> {} after {} rounds, results in {}",
        summary.initial_edge_cut,
        summary.final_edge_cut,
        summary.rounds,
        out_dir.display()
    );
    write_json(out_dir.join("summary.json"), &summary)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

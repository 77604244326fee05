use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use jabeja_engine::report;
use jabeja_graph::{partition_hash, GraphFormat, InitialColoring};
use serde_json::json;

use super::load_colored;
use crate::sim_config::resolve_input;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Graph file to inspect.
    #[arg(long)]
    pub graph: PathBuf,
    /// Input format; guessed from the extension when omitted.
    #[arg(long, value_parser = parse_format)]
    pub format: Option<GraphFormat>,
    /// Color the graph into this many partitions before measuring.
    #[arg(long, default_value_t = 1)]
    pub partitions: u32,
    /// Initial coloring policy used with `--partitions`; JSON snapshots keep
    /// their stored colors when omitted, other formats use round-robin.
    #[arg(long, value_parser = parse_coloring)]
    pub coloring: Option<InitialColoring>,
    /// Seed for the random coloring policy.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

fn parse_format(raw: &str) -> Result<GraphFormat, String> {
    match raw {
        "metis" => Ok(GraphFormat::Metis),
        "edge-list" => Ok(GraphFormat::EdgeList),
        "json" => Ok(GraphFormat::Json),
        other => Err(format!("unknown graph format `{other}`")),
    }
}

fn parse_coloring(raw: &str) -> Result<InitialColoring, String> {
    match raw {
        "round-robin" => Ok(InitialColoring::RoundRobin),
        "random" => Ok(InitialColoring::Random),
        "batch" => Ok(InitialColoring::Batch),
        "preserve" => Ok(InitialColoring::Preserve),
        other => Err(format!("unknown coloring policy `{other}`")),
    }
}

pub fn run(args: &StatsArgs) -> Result<(), Box<dyn Error>> {
    let (format, coloring) = resolve_input(&args.graph, args.format, args.coloring);
    let graph = load_colored(
        &args.graph,
        format,
        coloring,
        args.partitions,
        args.seed,
    )?;
    let metrics = report::compute(&graph)?;
    let max_degree = graph.nodes().iter().map(|node| node.degree()).max().unwrap_or(0);
    let isolated = graph.nodes().iter().filter(|node| node.degree() == 0).count();
    let histogram: Vec<usize> = graph.color_histogram().into_values().collect();

    let stats = json!({
        "graph": args.graph.display().to_string(),
        "nodes": graph.size(),
        "edges": graph.edge_count(),
        "max_degree": max_degree,
        "isolated_nodes": isolated,
        "partitions": args.partitions,
        "coloring": coloring.label(),
        "partition_sizes": histogram,
        "edge_cut": metrics.edge_cut,
        "partition_hash": partition_hash(&graph),
    });
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

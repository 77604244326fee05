use std::error::Error;
use std::path::Path;

use jabeja_core::rng::{RngHandle, Substream};
use jabeja_graph::{load_graph, Graph, GraphFormat, InitialColoring};
use log::debug;

pub mod partition;
pub mod stats;

/// Loads `path` and assigns initial colors drawn from the coloring
/// substream of `seed`.
pub(crate) fn load_colored(
    path: &Path,
    format: GraphFormat,
    coloring: InitialColoring,
    partitions: u32,
    seed: u64,
) -> Result<Graph, Box<dyn Error>> {
    let mut builder = load_graph(path, format)?;
    let mut rng = RngHandle::for_substream(seed, Substream::InitialColoring);
    coloring.apply(&mut builder, partitions, &mut rng)?;
    let graph = builder.build()?;
    debug!(
        "loaded {} ({:?}): {} nodes, {} edges, {} coloring over {} partitions",
        path.display(),
        format,
        graph.size(),
        graph.edge_count(),
        coloring.label(),
        partitions
    );
    Ok(graph)
}

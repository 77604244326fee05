#![deny(missing_docs)]

//! Static undirected graph with mutable partition colors, plus the loaders,
//! initial coloring policies and generators that produce it.

mod builder;
mod coloring;
mod generators;
mod graph;
mod hash;
mod loader;
mod metis;
mod serialization;

pub use builder::GraphBuilder;
pub use coloring::InitialColoring;
pub use generators::{gen_erdos_renyi, gen_grid, gen_ring};
pub use graph::{Graph, Node};
pub use hash::partition_hash;
pub use loader::{load_graph, parse_edge_list, GraphFormat};
pub use metis::parse_metis;
pub use serialization::{graph_from_json, graph_to_json, GraphSnapshot, NodeSnapshot};

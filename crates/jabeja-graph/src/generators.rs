use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::rng::RngHandle;
use jabeja_core::NodeId;
use rand::Rng;

use crate::builder::GraphBuilder;

/// Cycle `0 - 1 - ... - (n-1) - 0`.
pub fn gen_ring(n_nodes: usize) -> Result<GraphBuilder, JabejaError> {
    if n_nodes < 3 {
        return Err(JabejaError::Graph(
            ErrorInfo::new("ring-too-small", "a simple ring needs at least three nodes")
                .with_context("nodes", n_nodes),
        ));
    }
    let mut builder = GraphBuilder::new();
    for i in 0..n_nodes {
        builder.add_edge(node(i), node((i + 1) % n_nodes));
    }
    Ok(builder)
}

/// `width x height` 4-neighbour lattice, ids assigned row-major.
pub fn gen_grid(width: usize, height: usize) -> Result<GraphBuilder, JabejaError> {
    if width == 0 || height == 0 {
        return Err(JabejaError::Graph(
            ErrorInfo::new("empty-graph", "grid dimensions must be positive")
                .with_context("width", width)
                .with_context("height", height),
        ));
    }
    let mut builder = GraphBuilder::new();
    for row in 0..height {
        for col in 0..width {
            let id = row * width + col;
            builder.ensure_node(node(id));
            if col + 1 < width {
                builder.add_edge(node(id), node(id + 1));
            }
            if row + 1 < height {
                builder.add_edge(node(id), node(id + width));
            }
        }
    }
    Ok(builder)
}

/// G(n, p) random graph drawn from `rng`.
pub fn gen_erdos_renyi(
    n_nodes: usize,
    edge_probability: f64,
    rng: &mut RngHandle,
) -> Result<GraphBuilder, JabejaError> {
    if n_nodes == 0 {
        return Err(JabejaError::Graph(ErrorInfo::new(
            "empty-graph",
            "random generator requires at least one node",
        )));
    }
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(JabejaError::Config(
            ErrorInfo::new("edge-probability", "edge probability must lie in [0, 1]")
                .with_context("value", edge_probability),
        ));
    }
    let mut builder = GraphBuilder::new();
    for a in 0..n_nodes {
        builder.ensure_node(node(a));
        for b in (a + 1)..n_nodes {
            if rng.gen_bool(edge_probability) {
                builder.add_edge(node(a), node(b));
            }
        }
    }
    Ok(builder)
}

fn node(index: usize) -> NodeId {
    NodeId::from_raw(index as u64)
}

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{NodeId, RngHandle};
use jabeja_graph::Graph;
use rand::seq::index;

/// Source of swap candidates for a node.
///
/// Implementations draw every random choice from the supplied handle so a
/// run is reproducible from its seed.
pub trait CandidateSampler {
    /// Up to `count` distinct neighbours of `node`, all of them when the
    /// degree does not exceed `count`.
    fn neighbor_sample(
        &mut self,
        graph: &Graph,
        node: NodeId,
        count: usize,
        rng: &mut RngHandle,
    ) -> Result<Vec<NodeId>, JabejaError>;

    /// Exactly `count` distinct nodes other than `node`, uniformly drawn.
    fn uniform_sample(
        &mut self,
        graph: &Graph,
        node: NodeId,
        count: usize,
        rng: &mut RngHandle,
    ) -> Result<Vec<NodeId>, JabejaError>;
}

/// Sampling without replacement over the graph's own lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphSampler;

impl CandidateSampler for GraphSampler {
    fn neighbor_sample(
        &mut self,
        graph: &Graph,
        node: NodeId,
        count: usize,
        rng: &mut RngHandle,
    ) -> Result<Vec<NodeId>, JabejaError> {
        let neighbors = graph.neighbors(node)?;
        if neighbors.len() <= count {
            return Ok(neighbors.to_vec());
        }
        Ok(index::sample(rng, neighbors.len(), count)
            .into_iter()
            .map(|idx| neighbors[idx])
            .collect())
    }

    fn uniform_sample(
        &mut self,
        graph: &Graph,
        node: NodeId,
        count: usize,
        rng: &mut RngHandle,
    ) -> Result<Vec<NodeId>, JabejaError> {
        let population = graph.size().saturating_sub(1);
        if count > population {
            return Err(JabejaError::Config(
                ErrorInfo::new(
                    "sample-size-exceeds-population",
                    "cannot draw more distinct nodes than the graph holds besides the subject",
                )
                .with_context("node", node)
                .with_context("requested", count)
                .with_context("population", population),
            ));
        }
        // positions past the subject shift by one so it is never drawn
        let skip = graph.position(node)?;
        index::sample(rng, population, count)
            .into_iter()
            .map(|idx| {
                let position = if idx >= skip { idx + 1 } else { idx };
                graph.id_at(position).ok_or_else(|| {
                    JabejaError::Sampling(
                        ErrorInfo::new("position-out-of-range", "sampled position has no node")
                            .with_context("position", position),
                    )
                })
            })
            .collect()
    }
}

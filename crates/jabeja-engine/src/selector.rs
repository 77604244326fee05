use jabeja_core::errors::JabejaError;
use jabeja_core::{NodeId, RngHandle};
use jabeja_graph::Graph;
use log::trace;

use crate::annealing::AnnealingState;
use crate::config::SelectionGate;

/// Stagnation scale of the adaptive factor `1 + counter / 50`.
const ADAPTIVE_SCALE: f64 = 50.0;

/// Change in same-color neighbour count if `p` and `c` exchanged colors.
///
/// Positive values mean the exchange removes cross-color edges around the
/// pair.
pub fn swap_benefit(graph: &Graph, p: NodeId, c: NodeId) -> Result<i64, JabejaError> {
    let color_p = graph.color(p)?;
    let color_c = graph.color(c)?;
    let before = graph.degree_in_color(p, color_p)? + graph.degree_in_color(c, color_c)?;
    let after = graph.degree_in_color(p, color_c)? + graph.degree_in_color(c, color_p)?;
    Ok(after as i64 - before as i64)
}

/// Annealing acceptance probability for a non-positive benefit.
pub fn acceptance_probability(
    benefit: i64,
    temperature: f64,
    subject_degree: usize,
    convergence_counter: u32,
) -> f64 {
    let neighbor_factor = 1.0 + ((subject_degree + 1) as f64).ln();
    let adaptive_factor = 1.0 + f64::from(convergence_counter) / ADAPTIVE_SCALE;
    (benefit as f64 / (temperature * neighbor_factor * adaptive_factor)).exp()
}

/// Picks the swap partner for a node out of a candidate set.
///
/// The selector only reads graph and annealing state; applying the exchange
/// is the driver's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartnerSelector {
    gate: SelectionGate,
}

impl PartnerSelector {
    /// Creates a selector with the given gate.
    pub fn new(gate: SelectionGate) -> Self {
        Self { gate }
    }

    /// Gate in use.
    pub fn gate(&self) -> SelectionGate {
        self.gate
    }

    /// Returns the accepted candidate with the highest benefit above the
    /// gate's baseline, keeping the earliest one on ties.
    pub fn find_partner(
        &self,
        graph: &Graph,
        node: NodeId,
        candidates: &[NodeId],
        state: &AnnealingState,
        rng: &mut RngHandle,
    ) -> Result<Option<NodeId>, JabejaError> {
        let degree = graph.lookup(node)?.degree();
        let mut highest = match self.gate {
            SelectionGate::Strict => Some(0),
            SelectionGate::Annealed => None,
        };
        let mut partner = None;

        for &candidate in candidates {
            let benefit = swap_benefit(graph, node, candidate)?;
            let accepted = benefit > 0 || {
                let probability = acceptance_probability(
                    benefit,
                    state.temperature,
                    degree,
                    state.convergence_counter,
                );
                rng.unit() < probability
            };
            if accepted && highest.map_or(true, |best| benefit > best) {
                highest = Some(benefit);
                partner = Some(candidate);
            }
        }

        if let (Some(chosen), Some(benefit)) = (partner, highest) {
            trace!("node {node} picks partner {chosen} (benefit {benefit})");
        }
        Ok(partner)
    }
}

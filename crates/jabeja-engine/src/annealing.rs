use log::info;
use serde::{Deserialize, Serialize};

/// Lowest temperature the cooling schedule reaches.
pub const TEMPERATURE_FLOOR: f64 = 1.0;
/// Rounds without edge-cut improvement that trigger a restart.
pub const CONVERGENCE_THRESHOLD: u32 = 50;
/// Restart temperature as a multiple of the initial temperature.
pub const RESTART_FACTOR: f64 = 1.5;

/// Mutable annealing state threaded through the rounds of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingState {
    /// Current temperature.
    pub temperature: f64,
    /// Consecutive rounds without a strict edge-cut improvement.
    pub convergence_counter: u32,
    /// Best edge cut observed so far; unset before the first report.
    pub last_edge_cut: Option<usize>,
    /// Completed sweeps.
    pub round: usize,
}

/// Phase reported by a cooldown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnealPhase {
    /// Temperature decayed and the edge cut improved recently.
    Cooling,
    /// Temperature decayed while the edge cut has not improved.
    Stagnant,
    /// Temperature was re-seeded from the initial temperature.
    Restarting,
}

/// Cooling schedule with stagnation-triggered restarts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingController {
    initial_temperature: f64,
    delta: f64,
}

impl AnnealingController {
    /// Creates a controller; `delta` is the multiplicative cooling factor.
    pub fn new(initial_temperature: f64, delta: f64) -> Self {
        Self {
            initial_temperature,
            delta,
        }
    }

    /// Temperature a run starts with.
    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    /// Temperature right after a restart.
    pub fn restart_temperature(&self) -> f64 {
        self.initial_temperature * RESTART_FACTOR
    }

    /// State at round zero.
    pub fn initial_state(&self) -> AnnealingState {
        AnnealingState {
            temperature: self.initial_temperature,
            convergence_counter: 0,
            last_edge_cut: None,
            round: 0,
        }
    }

    /// One cooldown step: decay, clamp to the floor, then restart when the
    /// stagnation threshold is reached. A restart overrides the decayed value.
    pub fn cooldown(&self, state: &mut AnnealingState) -> AnnealPhase {
        state.temperature = (state.temperature * self.delta).max(TEMPERATURE_FLOOR);

        if state.convergence_counter >= CONVERGENCE_THRESHOLD {
            info!(
                "restarting simulated annealing at round {} (temperature {:.4})",
                state.round,
                self.restart_temperature()
            );
            state.temperature = self.restart_temperature();
            state.convergence_counter = 0;
            return AnnealPhase::Restarting;
        }
        Self::phase(state)
    }

    /// Feeds the round's edge cut into the convergence counter.
    ///
    /// `last_edge_cut` holds the best cut observed, not the previous round's
    /// cut, so a regression followed by a partial recovery still counts as
    /// stagnation. Returns `true` when the cut strictly improved on it.
    pub fn observe_edge_cut(&self, state: &mut AnnealingState, edge_cut: usize) -> bool {
        match state.last_edge_cut {
            Some(best) if edge_cut >= best => {
                state.convergence_counter += 1;
                false
            }
            _ => {
                state.convergence_counter = 0;
                state.last_edge_cut = Some(edge_cut);
                true
            }
        }
    }

    /// Phase implied by the counter alone.
    pub fn phase(state: &AnnealingState) -> AnnealPhase {
        if state.convergence_counter > 0 {
            AnnealPhase::Stagnant
        } else {
            AnnealPhase::Cooling
        }
    }
}

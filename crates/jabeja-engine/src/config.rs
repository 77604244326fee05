use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_graph::Graph;
use serde::{Deserialize, Serialize};

/// Where swap candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeSelectionPolicy {
    /// Neighbour sample only.
    #[serde(alias = "LOCAL")]
    Local,
    /// Uniform sample over the whole graph only.
    #[serde(alias = "RANDOM")]
    Random,
    /// Neighbour sample first, uniform sample when no partner was found.
    #[default]
    #[serde(alias = "HYBRID")]
    Hybrid,
}

impl NodeSelectionPolicy {
    /// Upper-case label used in result file names and logs.
    pub fn label(&self) -> &'static str {
        match self {
            NodeSelectionPolicy::Local => "LOCAL",
            NodeSelectionPolicy::Random => "RANDOM",
            NodeSelectionPolicy::Hybrid => "HYBRID",
        }
    }
}

/// Which candidates the partner selector may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionGate {
    /// The best-benefit baseline starts at zero, so only strictly improving
    /// candidates are ever chosen. The acceptance draw is still taken for
    /// non-positive candidates.
    #[default]
    Strict,
    /// The baseline starts below every benefit, so a non-positive candidate
    /// that passes the acceptance draw can be chosen.
    Annealed,
}

/// YAML-configurable parameters governing a partitioning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Candidate source policy.
    #[serde(default)]
    pub node_selection_policy: NodeSelectionPolicy,
    /// Temperature at round zero and the base for restarts.
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,
    /// Multiplicative cooling factor in `(0, 1)`.
    #[serde(default = "default_delta")]
    pub delta: f64,
    /// Upper bound on neighbour candidates per decision.
    #[serde(default = "default_neighbor_sample_size")]
    pub random_neighbor_sample_size: usize,
    /// Number of uniform candidates per decision; at most `size - 1`.
    #[serde(default = "default_uniform_sample_size")]
    pub uniform_random_sample_size: usize,
    /// Number of full sweeps.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Accepted for compatibility with existing run files; not consumed.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Partner selection gate.
    #[serde(default)]
    pub selection_gate: SelectionGate,
    /// Master seed and label.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_initial_temperature() -> f64 {
    2.0
}

fn default_delta() -> f64 {
    0.9
}

fn default_neighbor_sample_size() -> usize {
    3
}

fn default_uniform_sample_size() -> usize {
    6
}

fn default_rounds() -> usize {
    1000
}

fn default_alpha() -> f64 {
    2.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            node_selection_policy: NodeSelectionPolicy::default(),
            initial_temperature: default_initial_temperature(),
            delta: default_delta(),
            random_neighbor_sample_size: default_neighbor_sample_size(),
            uniform_random_sample_size: default_uniform_sample_size(),
            rounds: default_rounds(),
            alpha: default_alpha(),
            selection_gate: SelectionGate::default(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed; substreams for coloring and simulation derive from it.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label copied into manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

impl RunConfig {
    /// Parses a YAML document, filling omitted fields with defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, JabejaError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| JabejaError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Checks the ranges that do not depend on the graph.
    pub fn validate(&self) -> Result<(), JabejaError> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(invalid(
                "initial-temperature",
                "initial_temperature must be a positive finite number",
                "initial_temperature",
                self.initial_temperature,
            ));
        }
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(invalid(
                "delta-range",
                "delta must lie strictly between 0 and 1",
                "delta",
                self.delta,
            ));
        }
        if self.random_neighbor_sample_size == 0 {
            return Err(invalid(
                "sample-size-zero",
                "random_neighbor_sample_size must be positive",
                "random_neighbor_sample_size",
                0,
            ));
        }
        if self.uniform_random_sample_size == 0 {
            return Err(invalid(
                "sample-size-zero",
                "uniform_random_sample_size must be positive",
                "uniform_random_sample_size",
                0,
            ));
        }
        if self.rounds == 0 {
            return Err(invalid(
                "rounds-zero",
                "rounds must be positive",
                "rounds",
                0,
            ));
        }
        Ok(())
    }

    /// Runs [`validate`](Self::validate) and checks sample sizes against `graph`.
    ///
    /// The uniform sample size is checked for every policy so a run file
    /// that is invalid for this graph never starts.
    pub fn validate_for_graph(&self, graph: &Graph) -> Result<(), JabejaError> {
        self.validate()?;
        let population = graph.size().saturating_sub(1);
        if self.uniform_random_sample_size > population {
            return Err(JabejaError::Config(
                ErrorInfo::new(
                    "sample-size-exceeds-population",
                    "uniform_random_sample_size exceeds the number of other nodes",
                )
                .with_context("uniform_random_sample_size", self.uniform_random_sample_size)
                .with_context("population", population)
                .with_hint("use at most graph size - 1 uniform candidates"),
            ));
        }
        Ok(())
    }
}

fn invalid(code: &str, message: &str, field: &str, value: impl ToString) -> JabejaError {
    JabejaError::Config(ErrorInfo::new(code, message).with_context(field, value))
}

#![deny(missing_docs)]

//! Decentralized graph partitioning engine.
//!
//! Every node repeatedly tries to exchange its color with a sampled partner
//! so that the local number of cross-color edges drops. Non-improving
//! exchanges are scored with a temperature-scaled acceptance probability,
//! and the temperature follows a cooling schedule with restarts on
//! stagnation.

/// Cooling schedule, convergence tracking and restarts.
pub mod annealing;
/// YAML configuration schema, defaults and validation.
pub mod config;
/// Simulation driver and public `run` entry point.
pub mod driver;
/// Run manifest serialization helpers.
pub mod manifest;
/// Edge cut and migration accounting plus the sink seam.
pub mod report;
/// Candidate sampling strategies.
pub mod sampler;
/// Benefit scoring and partner selection.
pub mod selector;
/// File-backed result sinks.
pub mod sink;

pub use annealing::{AnnealPhase, AnnealingController, AnnealingState};
pub use config::{NodeSelectionPolicy, RunConfig, SeedPolicy, SelectionGate};
pub use driver::{run, RunSummary, Simulation, SimulationState};
pub use report::{MemorySink, NullSink, PartitionMetrics, ReportSink, RoundReport};
pub use sampler::{CandidateSampler, GraphSampler};
pub use selector::PartnerSelector;
pub use sink::{result_file_name, TsvSink};

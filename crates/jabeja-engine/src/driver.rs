use jabeja_core::errors::JabejaError;
use jabeja_core::rng::{RngHandle, Substream};
use jabeja_core::NodeId;
use jabeja_graph::{partition_hash, Graph};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::annealing::{AnnealPhase, AnnealingController, AnnealingState};
use crate::config::{NodeSelectionPolicy, RunConfig};
use crate::report::{self, PartitionMetrics, ReportSink, RoundReport};
use crate::sampler::{CandidateSampler, GraphSampler};
use crate::selector::PartnerSelector;

/// Counters owned by the driver and advanced once per round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Temperature, convergence counter, best cut and round index.
    pub annealing: AnnealingState,
    /// Cumulative number of applied swaps.
    pub swaps: u64,
    /// Number of annealing restarts so far.
    pub restarts: usize,
}

/// Summary returned after a run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rounds executed.
    pub rounds: usize,
    /// Edge cut of the initial coloring.
    pub initial_edge_cut: usize,
    /// Edge cut after the last round.
    pub final_edge_cut: usize,
    /// Lowest edge cut reported by any round.
    pub best_edge_cut: usize,
    /// Cumulative swaps.
    pub swaps: u64,
    /// Migrations after the last round.
    pub migrations: usize,
    /// Annealing restarts.
    pub restarts: usize,
    /// Temperature after the last cooldown.
    pub final_temperature: f64,
    /// Hash of the initial coloring.
    pub initial_partition_hash: String,
    /// Hash of the final coloring.
    pub final_partition_hash: String,
}

/// Sequential simulation of the decentralized swap protocol.
///
/// Nodes are visited in ascending id order every round and swaps are applied
/// immediately, so later nodes in a sweep observe earlier exchanges.
#[derive(Debug)]
pub struct Simulation<S: CandidateSampler = GraphSampler> {
    graph: Graph,
    config: RunConfig,
    sampler: S,
    selector: PartnerSelector,
    controller: AnnealingController,
    rng: RngHandle,
    state: SimulationState,
    initial: PartitionMetrics,
    initial_hash: String,
}

impl Simulation<GraphSampler> {
    /// Validates `config` against `graph` and prepares a run seeded by `seed`.
    pub fn new(graph: Graph, config: &RunConfig, seed: u64) -> Result<Self, JabejaError> {
        Self::with_sampler(graph, config, GraphSampler, seed)
    }
}

impl<S: CandidateSampler> Simulation<S> {
    /// Same as [`Simulation::new`] with a custom candidate sampler.
    pub fn with_sampler(
        graph: Graph,
        config: &RunConfig,
        sampler: S,
        seed: u64,
    ) -> Result<Self, JabejaError> {
        config.validate_for_graph(&graph)?;
        let initial = report::compute(&graph)?;
        let initial_hash = partition_hash(&graph);
        let controller = AnnealingController::new(config.initial_temperature, config.delta);
        let state = SimulationState {
            annealing: controller.initial_state(),
            swaps: 0,
            restarts: 0,
        };
        Ok(Self {
            graph,
            config: config.clone(),
            sampler,
            selector: PartnerSelector::new(config.selection_gate),
            controller,
            rng: RngHandle::for_substream(seed, Substream::Simulation),
            state,
            initial,
            initial_hash,
        })
    }

    /// Graph in its current coloring.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Counters of the run so far.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Configuration in use.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Installed candidate sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Metrics of the coloring the run started from.
    pub fn initial_metrics(&self) -> PartitionMetrics {
        self.initial
    }

    /// Metrics of the current coloring.
    pub fn snapshot(&self) -> Result<PartitionMetrics, JabejaError> {
        report::compute(&self.graph)
    }

    /// Releases the graph with its final coloring.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Runs the configured number of rounds.
    pub fn run(&mut self, sink: &mut dyn ReportSink) -> Result<RunSummary, JabejaError> {
        self.run_rounds(self.config.rounds, sink)
    }

    /// Runs `rounds` additional rounds, emitting one record per round, and
    /// finishes the sink.
    pub fn run_rounds(
        &mut self,
        rounds: usize,
        sink: &mut dyn ReportSink,
    ) -> Result<RunSummary, JabejaError> {
        debug!(
            "starting {} rounds on {} nodes / {} edges, policy {}, initial edge cut {}",
            rounds,
            self.graph.size(),
            self.graph.edge_count(),
            self.config.node_selection_policy.label(),
            self.initial.edge_cut
        );
        let mut best_edge_cut = self.initial.edge_cut;
        let mut last = None;
        for _ in 0..rounds {
            let report = self.step_round(sink)?;
            best_edge_cut = best_edge_cut.min(report.edge_cut);
            last = Some(report);
        }
        sink.finish()?;

        let current = match &last {
            Some(report) => PartitionMetrics {
                edge_cut: report.edge_cut,
                migrations: report.migrations,
            },
            None => self.snapshot()?,
        };
        let summary = RunSummary {
            rounds: self.state.annealing.round,
            initial_edge_cut: self.initial.edge_cut,
            final_edge_cut: current.edge_cut,
            best_edge_cut,
            swaps: self.state.swaps,
            migrations: current.migrations,
            restarts: self.state.restarts,
            final_temperature: self.state.annealing.temperature,
            initial_partition_hash: self.initial_hash.clone(),
            final_partition_hash: partition_hash(&self.graph),
        };
        debug!(
            "finished after {} rounds: edge cut {} -> {}, {} swaps, {} restarts",
            summary.rounds,
            summary.initial_edge_cut,
            summary.final_edge_cut,
            summary.swaps,
            summary.restarts
        );
        Ok(summary)
    }

    /// One full sweep followed by cooldown, reporting and convergence update.
    pub fn step_round(&mut self, sink: &mut dyn ReportSink) -> Result<RoundReport, JabejaError> {
        let ids: Vec<NodeId> = self.graph.node_ids().collect();
        for id in ids {
            self.sample_and_swap(id)?;
        }

        if self.controller.cooldown(&mut self.state.annealing) == AnnealPhase::Restarting {
            self.state.restarts += 1;
        }

        let metrics = report::compute(&self.graph)?;
        let report = RoundReport {
            round: self.state.annealing.round,
            edge_cut: metrics.edge_cut,
            swaps: self.state.swaps,
            migrations: metrics.migrations,
            temperature: self.state.annealing.temperature,
        };
        info!(
            "round: {}, edge cut: {}, swaps: {}, migrations: {}, T: {:.4}",
            report.round, report.edge_cut, report.swaps, report.migrations, report.temperature
        );
        sink.record(&report)?;

        self.controller
            .observe_edge_cut(&mut self.state.annealing, metrics.edge_cut);
        self.state.annealing.round += 1;
        Ok(report)
    }

    /// Lets `node` pick a partner and exchanges their colors if one is found.
    pub fn sample_and_swap(&mut self, node: NodeId) -> Result<Option<NodeId>, JabejaError> {
        let partner = self.choose_partner(node)?;
        if let Some(partner) = partner {
            self.graph.swap_colors(node, partner)?;
            self.state.swaps += 1;
            trace!("swapped colors of {node} and {partner}");
        }
        Ok(partner)
    }

    fn choose_partner(&mut self, node: NodeId) -> Result<Option<NodeId>, JabejaError> {
        let policy = self.config.node_selection_policy;
        let mut partner = None;

        if matches!(
            policy,
            NodeSelectionPolicy::Local | NodeSelectionPolicy::Hybrid
        ) {
            let candidates = self.sampler.neighbor_sample(
                &self.graph,
                node,
                self.config.random_neighbor_sample_size,
                &mut self.rng,
            )?;
            partner = self.selector.find_partner(
                &self.graph,
                node,
                &candidates,
                &self.state.annealing,
                &mut self.rng,
            )?;
        }

        let fall_back = match policy {
            NodeSelectionPolicy::Local => false,
            NodeSelectionPolicy::Random => true,
            NodeSelectionPolicy::Hybrid => partner.is_none(),
        };
        if fall_back {
            let candidates = self.sampler.uniform_sample(
                &self.graph,
                node,
                self.config.uniform_random_sample_size,
                &mut self.rng,
            )?;
            partner = self.selector.find_partner(
                &self.graph,
                node,
                &candidates,
                &self.state.annealing,
                &mut self.rng,
            )?;
        }
        Ok(partner)
    }
}

/// Runs a full simulation from scratch and returns its summary together with
/// the final graph.
pub fn run(
    graph: Graph,
    config: &RunConfig,
    seed: u64,
    sink: &mut dyn ReportSink,
) -> Result<(RunSummary, Graph), JabejaError> {
    let mut simulation = Simulation::new(graph, config, seed)?;
    let summary = simulation.run(sink)?;
    Ok((summary, simulation.into_graph()))
}

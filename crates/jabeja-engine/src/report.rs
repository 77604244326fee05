use jabeja_core::errors::JabejaError;
use jabeja_graph::Graph;
use serde::{Deserialize, Serialize};

/// Record emitted once per round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Zero-based round index.
    pub round: usize,
    /// Edges whose endpoints carry different colors.
    pub edge_cut: usize,
    /// Cumulative swaps since the run started.
    pub swaps: u64,
    /// Nodes whose color differs from their initial color.
    pub migrations: usize,
    /// Temperature after the round's cooldown step.
    pub temperature: f64,
}

/// Partition quality measured on the current colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionMetrics {
    /// Edges whose endpoints carry different colors.
    pub edge_cut: usize,
    /// Nodes whose color differs from their initial color.
    pub migrations: usize,
}

/// Computes edge cut and migrations.
///
/// Each undirected edge is seen from both endpoints, so the count of
/// differing neighbour pairs is halved. A neighbour that does not resolve is
/// fatal because skipping it would corrupt the count.
pub fn compute(graph: &Graph) -> Result<PartitionMetrics, JabejaError> {
    let mut cross_pairs = 0usize;
    let mut migrations = 0usize;
    for node in graph.nodes() {
        if node.has_migrated() {
            migrations += 1;
        }
        for &neighbor in node.neighbors() {
            if graph.color(neighbor)? != node.color() {
                cross_pairs += 1;
            }
        }
    }
    Ok(PartitionMetrics {
        edge_cut: cross_pairs / 2,
        migrations,
    })
}

/// Consumer of per-round records.
pub trait ReportSink {
    /// Accepts the record of a finished round.
    fn record(&mut self, report: &RoundReport) -> Result<(), JabejaError>;

    /// Called once after the last round.
    fn finish(&mut self) -> Result<(), JabejaError> {
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    records: Vec<RoundReport>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far.
    pub fn records(&self) -> &[RoundReport] {
        &self.records
    }

    /// Consumes the sink, returning its records.
    pub fn into_records(self) -> Vec<RoundReport> {
        self.records
    }
}

impl ReportSink for MemorySink {
    fn record(&mut self, report: &RoundReport) -> Result<(), JabejaError> {
        self.records.push(report.clone());
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record(&mut self, _report: &RoundReport) -> Result<(), JabejaError> {
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn record(&mut self, report: &RoundReport) -> Result<(), JabejaError> {
        (**self).record(report)
    }

    fn finish(&mut self) -> Result<(), JabejaError> {
        (**self).finish()
    }
}

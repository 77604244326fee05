use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_graph::InitialColoring;

use crate::config::RunConfig;
use crate::report::{ReportSink, RoundReport};

const PREAMBLE: &str = "# Migration is number of nodes that have changed color.";
const COLUMNS: [&str; 5] = ["Round", "Edge-Cut", "Swaps", "Migrations", "Temperature"];

/// Tab-separated result table, one row per round.
pub struct TsvSink {
    path: PathBuf,
    writer: csv::Writer<BufWriter<File>>,
}

impl std::fmt::Debug for TsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsvSink")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl TsvSink {
    /// Creates (or truncates) the table at `path` and writes its header.
    pub fn create(path: &Path) -> Result<Self, JabejaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| JabejaError::io("results-mkdir", err, parent))?;
        }
        let file = File::create(path).map_err(|err| JabejaError::io("results-create", err, path))?;
        let mut buffered = BufWriter::new(file);
        writeln!(buffered, "{PREAMBLE}\n")
            .map_err(|err| JabejaError::io("results-write", err, path))?;
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(buffered);
        writer
            .write_record(COLUMNS)
            .map_err(|err| wrap_csv(err, path))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    /// Location of the table.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for TsvSink {
    fn record(&mut self, report: &RoundReport) -> Result<(), JabejaError> {
        self.writer
            .write_record([
                report.round.to_string(),
                report.edge_cut.to_string(),
                report.swaps.to_string(),
                report.migrations.to_string(),
                format!("{:.4}", report.temperature),
            ])
            .map_err(|err| wrap_csv(err, &self.path))
    }

    fn finish(&mut self) -> Result<(), JabejaError> {
        self.writer
            .flush()
            .map_err(|err| JabejaError::io("results-flush", err, &self.path))
    }
}

/// File name encoding the run parameters, e.g.
/// `3elt.graph_NS_HYBRID_GICP_ROUND_ROBIN_T_2.0_D_0.9_RNSS_3_URSS_6_A_2.0_R_1000.txt`.
pub fn result_file_name(graph_name: &str, config: &RunConfig, coloring: InitialColoring) -> String {
    format!(
        "{}_NS_{}_GICP_{}_T_{:?}_D_{:?}_RNSS_{}_URSS_{}_A_{:?}_R_{}.txt",
        graph_name,
        config.node_selection_policy.label(),
        coloring.label(),
        config.initial_temperature,
        config.delta,
        config.random_neighbor_sample_size,
        config.uniform_random_sample_size,
        config.alpha,
        config.rounds
    )
}

fn wrap_csv(err: csv::Error, path: &Path) -> JabejaError {
    JabejaError::Io(
        ErrorInfo::new("results-write", "failed to write result row")
            .with_context("path", path.display())
            .with_hint(err.to_string()),
    )
}

//! YAML file accepted by `jabeja-sim partition`.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use jabeja_engine::RunConfig;
use jabeja_graph::{GraphFormat, InitialColoring};
use serde::{Deserialize, Serialize};

/// Graph input, run parameters and output location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub graph: GraphSection,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSection {
    /// Graph file; `--graph` takes precedence.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Format override; guessed from the extension when absent.
    #[serde(default)]
    pub format: Option<GraphFormat>,
    #[serde(default = "default_partitions")]
    pub partitions: u32,
    /// Coloring policy; see [`resolve_input`] for the default.
    #[serde(default)]
    pub initial_coloring: Option<InitialColoring>,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            path: None,
            format: None,
            partitions: default_partitions(),
            initial_coloring: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_partitions() -> u32 {
    4
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

/// Settles the format and coloring of a graph input. A JSON snapshot keeps
/// its stored colors unless a coloring is requested explicitly; every other
/// format defaults to round-robin.
pub fn resolve_input(
    path: &Path,
    format: Option<GraphFormat>,
    coloring: Option<InitialColoring>,
) -> (GraphFormat, InitialColoring) {
    let format = format.unwrap_or_else(|| GraphFormat::from_path(path));
    let coloring = coloring.unwrap_or(match format {
        GraphFormat::Json => InitialColoring::Preserve,
        GraphFormat::Metis | GraphFormat::EdgeList => InitialColoring::RoundRobin,
    });
    (format, coloring)
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let config: SimConfig = serde_yaml::from_str(&contents)?;
        config.run.validate()?;
        Ok(config)
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::RunProvenance;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::driver::RunSummary;

/// Structured manifest describing a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Inputs and seed the run was derived from.
    pub provenance: RunProvenance,
    /// Outcome of the run.
    pub summary: RunSummary,
    /// Result table, relative to the manifest directory.
    pub results_file: Option<PathBuf>,
    /// Final partition snapshot, relative to the manifest directory.
    pub partition_file: Option<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), JabejaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| JabejaError::io("manifest-mkdir", err, parent))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            JabejaError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        fs::write(path, json).map_err(|err| JabejaError::io("manifest-write", err, path))
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, JabejaError> {
        let contents =
            fs::read_to_string(path).map_err(|err| JabejaError::io("manifest-read", err, path))?;
        serde_json::from_str(&contents).map_err(|err| {
            JabejaError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }
}

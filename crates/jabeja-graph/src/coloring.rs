use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{Color, RngHandle};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::builder::GraphBuilder;

/// Policy used to assign the initial partition labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialColoring {
    /// `color = position % partitions` in ascending id order.
    #[default]
    RoundRobin,
    /// Uniformly random color per node.
    Random,
    /// Contiguous blocks of `ceil(n / partitions)` nodes per color.
    Batch,
    /// Keep whatever colors the input already carried.
    Preserve,
}

impl InitialColoring {
    /// Upper-case label used in result file names.
    pub fn label(&self) -> &'static str {
        match self {
            InitialColoring::RoundRobin => "ROUND_ROBIN",
            InitialColoring::Random => "RANDOM",
            InitialColoring::Batch => "BATCH",
            InitialColoring::Preserve => "PRESERVE",
        }
    }

    /// Assigns colors on the builder.
    pub fn apply(
        &self,
        builder: &mut GraphBuilder,
        partitions: u32,
        rng: &mut RngHandle,
    ) -> Result<(), JabejaError> {
        if *self == InitialColoring::Preserve {
            return Ok(());
        }
        if partitions == 0 {
            return Err(JabejaError::Config(
                ErrorInfo::new("zero-partitions", "at least one partition is required")
                    .with_context("policy", self.label()),
            ));
        }
        let ids = builder.node_ids();
        let block = ids.len().div_ceil(partitions as usize).max(1);
        for (position, id) in ids.into_iter().enumerate() {
            let raw = match self {
                InitialColoring::RoundRobin => (position % partitions as usize) as u32,
                InitialColoring::Random => rng.gen_range(0..partitions),
                InitialColoring::Batch => ((position / block) as u32).min(partitions - 1),
                InitialColoring::Preserve => continue,
            };
            builder.set_color(id, Color::from_raw(raw))?;
        }
        Ok(())
    }
}

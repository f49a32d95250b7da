//! Configuration for resolving a rotation table.

use serde::{Deserialize, Serialize};

use super::PlateId;

/// What to do when the two samples bracketing the target time disagree on
/// their reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Log a warning and continue in the later sample's frame.
    #[default]
    Warn,
    /// Abort the run with `ReferenceFrameMismatch`.
    Fail,
}

/// What to do when a plate's samples do not bracket the target time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Abort the run with `MissingCoverage`.
    #[default]
    Fail,
    /// Log a warning and leave the plate out of the resolved set.
    Skip,
}

/// Configuration parameters for a resolver run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Handling of bracket samples with differing reference frames.
    pub mismatch: MismatchPolicy,
    /// Handling of plates whose samples do not cover the target time.
    pub coverage: CoveragePolicy,
    /// Plate held fixed: every absolute rotation is re-expressed relative to it.
    pub fixed_plate: Option<PlateId>,
}

impl ResolverConfig {
    /// Every irregularity in the table aborts the run.
    pub fn strict() -> Self {
        Self {
            mismatch: MismatchPolicy::Fail,
            coverage: CoveragePolicy::Fail,
            fixed_plate: None,
        }
    }

    /// Tolerates frame mismatches and plates that do not reach the target time.
    pub fn lenient() -> Self {
        Self {
            mismatch: MismatchPolicy::Warn,
            coverage: CoveragePolicy::Skip,
            fixed_plate: None,
        }
    }

    /// Returns this configuration with `plate` held fixed.
    pub fn with_fixed_plate(mut self, plate: PlateId) -> Self {
        self.fixed_plate = Some(plate);
        self
    }
}

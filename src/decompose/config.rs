//! Configuration for ring decomposition.

use serde::{Deserialize, Serialize};

/// Configuration parameters for the ring decomposer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    /// Distance in degrees a real vertex is moved off 0 or ±180 so only
    /// synthetic crossing points sit on those meridians.
    pub meridian_nudge: f64,
    /// Upper bound on section merges per hemisphere chain.
    pub max_merge_iterations: usize,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            meridian_nudge: 0.001,
            max_merge_iterations: 256,
        }
    }
}

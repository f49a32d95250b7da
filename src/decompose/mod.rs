//! Antimeridian-aware ring decomposition.
//!
//! A rotated feature ring is given in (lon, lat) and may wrap the sphere
//! across the 0° or ±180° meridians. Drawn unprojected, such a ring smears
//! across the whole map. The decomposer cuts it at those meridians and
//! restitches the pieces into closed rings that each stay within one
//! hemisphere, detouring over a pole where a piece encloses one.
//!
//! Pole handling is heuristic. Callers that need something drawable for
//! every input keep [`unwrap_polyline`] as a stroked fallback.

mod config;
mod restitch;
mod split;
mod unwrap;

pub use config::DecomposeConfig;
pub use unwrap::{unwrap_polyline, PathCommand, PathVertex};

use glam::DVec2;
use thiserror::Error;

use restitch::restitch;
use split::{nudge_off_meridians, split_chains};

/// Errors that can occur while decomposing a ring.
#[derive(Error, Debug, PartialEq)]
pub enum DecomposeError {
    #[error("Ring has {0} distinct vertices; at least 3 are needed")]
    TooFewVertices(usize),
    #[error("Sections still overlap after {iterations} merges")]
    MergeLimit { iterations: usize },
}

/// Splits rings crossing the 0° or ±180° meridians.
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: DecomposeConfig,
}

impl Decomposer {
    pub fn new(config: DecomposeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecomposeConfig {
        &self.config
    }

    /// Decomposes `ring` into closed rings, each ending on its first vertex.
    ///
    /// The ring may be given open or already closed. A ring that never
    /// changes hemisphere comes back as a single ring equal to the input.
    pub fn try_decompose(&self, ring: &[DVec2]) -> Result<Vec<Vec<DVec2>>, DecomposeError> {
        let open = open_ring(ring);
        if open.len() < 3 {
            return Err(DecomposeError::TooFewVertices(open.len()));
        }

        let nudged = nudge_off_meridians(open, self.config.meridian_nudge);
        let chains = split_chains(&nudged);
        if !chains.crossed {
            return Ok(vec![closed_ring(ring)]);
        }

        let mut rings = restitch(&chains.positive, self.config.max_merge_iterations)?;
        rings.extend(restitch(&chains.negative, self.config.max_merge_iterations)?);
        log::trace!("split ring of {} vertices into {} rings", open.len(), rings.len());
        Ok(rings)
    }

    /// Like [`Decomposer::try_decompose`], but a ring that cannot be
    /// decomposed is logged and returned closed on itself.
    pub fn decompose(&self, ring: &[DVec2]) -> Vec<Vec<DVec2>> {
        match self.try_decompose(ring) {
            Ok(rings) => rings,
            Err(err) => {
                log::warn!("returning ring undecomposed: {}", err);
                if ring.is_empty() {
                    Vec::new()
                } else {
                    vec![closed_ring(ring)]
                }
            }
        }
    }
}

/// Decomposes `ring` with the default configuration, failing closed.
pub fn decompose_ring(ring: &[DVec2]) -> Vec<Vec<DVec2>> {
    Decomposer::default().decompose(ring)
}

fn is_closed(ring: &[DVec2]) -> bool {
    ring.len() > 1 && ring.first() == ring.last()
}

fn open_ring(ring: &[DVec2]) -> &[DVec2] {
    if is_closed(ring) {
        &ring[..ring.len() - 1]
    } else {
        ring
    }
}

fn closed_ring(ring: &[DVec2]) -> Vec<DVec2> {
    let mut closed = ring.to_vec();
    if !is_closed(ring) {
        if let Some(&first) = ring.first() {
            closed.push(first);
        }
    }
    closed
}

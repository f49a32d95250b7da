//! Finite rotation resolver.
//!
//! Turns a hierarchical rotation table into one absolute rotation per plate
//! at a target time:
//! - Phase 1 interpolates each plate's rotation between the two samples
//!   bracketing the target time, relative to the plate's reference frame
//! - Phase 2 walks each plate's reference-frame chain down to the absolute
//!   frame
//! - An optional fixed plate re-expresses every result relative to that plate
//!
//! Each call works on its own state; nothing is cached between target times.

mod absolute;
mod config;
mod error;
mod interpolate;
mod reduce;
mod table;

pub use absolute::{AbsoluteRotation, AbsoluteRotationTable};
pub use config::{CoveragePolicy, MismatchPolicy, ResolverConfig};
pub use error::RotationError;
pub use interpolate::ResolvedRotation;
pub use table::{PlateRun, RotationSample, RotationTable};

use interpolate::resolve_run;
use reduce::RotationArena;

/// Numeric plate identifier as used in rotation tables and feature headers.
pub type PlateId = u32;

/// Reference frame id of the absolute (mantle or spin-axis) frame.
pub const ABSOLUTE_FRAME: PlateId = 0;

/// Plate id marking filler rows in a rotation table.
pub const FILLER_PLATE_ID: PlateId = 999;

/// Resolves rotation tables with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves every plate of `table` at `target_time` (Ma).
    ///
    /// Applies the configured fixed plate, if any, after reduction.
    pub fn resolve(
        &self,
        table: &RotationTable,
        target_time: f64,
    ) -> Result<AbsoluteRotationTable, RotationError> {
        let mut arena = RotationArena::new();
        for run in table.runs() {
            if let Some(resolved) = resolve_run(run, target_time, &self.config)? {
                arena.push(resolved);
            }
        }
        log::debug!(
            "resolved {} of {} plates at {} Ma",
            arena.len(),
            table.plate_count(),
            target_time
        );

        let absolute = arena.into_absolute(target_time)?;
        match self.config.fixed_plate {
            Some(plate) => absolute.rebased(plate),
            None => Ok(absolute),
        }
    }
}

/// Resolves `table` at `target_time` with the default configuration.
pub fn resolve(
    table: &RotationTable,
    target_time: f64,
) -> Result<AbsoluteRotationTable, RotationError> {
    Resolver::default().resolve(table, target_time)
}

/// Re-expresses every rotation of `table` relative to `fixed_plate`.
pub fn rebase(
    table: &AbsoluteRotationTable,
    fixed_plate: PlateId,
) -> Result<AbsoluteRotationTable, RotationError> {
    table.rebased(fixed_plate)
}

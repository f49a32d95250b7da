//! Phase 1: interpolating each plate's rotation at the target time.

use super::table::{PlateRun, RotationSample};
use super::{CoveragePolicy, MismatchPolicy, PlateId, ResolverConfig, RotationError};
use crate::rotation::{compose, FiniteRotation};

/// A plate's rotation at the target time, still relative to `ref_frame_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRotation {
    /// Plate being moved.
    pub plate_id: PlateId,
    /// Plate the rotation is expressed relative to.
    pub ref_frame_id: PlateId,
    /// Interpolated finite rotation.
    pub rotation: FiniteRotation,
}

/// Finds the first consecutive pair of samples with
/// `previous.time <= target_time <= current.time`.
fn find_bracket(
    samples: &[RotationSample],
    target_time: f64,
) -> Option<(&RotationSample, &RotationSample)> {
    samples
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .find(|(previous, current)| previous.time <= target_time && target_time <= current.time)
}

/// Interpolation weight of the earlier sample.
///
/// 1 at `previous.time`, 0 at `current.time`. Coincident times give 0 so
/// the later sample wins instead of dividing by zero.
pub(crate) fn time_weight(previous_time: f64, current_time: f64, target_time: f64) -> f64 {
    let span = current_time - previous_time;
    if span == 0.0 {
        0.0
    } else {
        (current_time - target_time) / span
    }
}

/// Interpolates between two bracket rotations.
///
/// The stage from `current` back to `previous` is scaled by `weight` and
/// then applied after `current`, so the result slides along the small
/// circle between the two samples.
pub(crate) fn interpolate(
    previous: FiniteRotation,
    current: FiniteRotation,
    weight: f64,
) -> FiniteRotation {
    let stage = compose(current.inverse(), previous).scaled(weight);
    compose(current, stage)
}

/// Resolves one plate run at `target_time`.
///
/// Returns `Ok(None)` when the run does not cover the time and the
/// coverage policy is `Skip`.
pub(crate) fn resolve_run(
    run: PlateRun<'_>,
    target_time: f64,
    config: &ResolverConfig,
) -> Result<Option<ResolvedRotation>, RotationError> {
    let Some((previous, current)) = find_bracket(run.samples, target_time) else {
        return match config.coverage {
            CoveragePolicy::Fail => Err(RotationError::MissingCoverage {
                plate_id: run.plate_id,
                target_time,
            }),
            CoveragePolicy::Skip => {
                log::warn!(
                    "plate {} has no samples bracketing {} Ma; leaving it out",
                    run.plate_id,
                    target_time
                );
                Ok(None)
            }
        };
    };

    if previous.ref_frame_id != current.ref_frame_id {
        match config.mismatch {
            MismatchPolicy::Fail => {
                return Err(RotationError::ReferenceFrameMismatch {
                    plate_id: run.plate_id,
                    earlier: previous.ref_frame_id,
                    later: current.ref_frame_id,
                    time: target_time,
                });
            }
            MismatchPolicy::Warn => log::warn!(
                "reference frame mismatch for plate {} between lines {} ({} Ma, frame {}) and {} ({} Ma, frame {}); using frame {}",
                run.plate_id,
                previous.line,
                previous.time,
                previous.ref_frame_id,
                current.line,
                current.time,
                current.ref_frame_id,
                current.ref_frame_id
            ),
        }
    }

    let weight = time_weight(previous.time, current.time, target_time);
    Ok(Some(ResolvedRotation {
        plate_id: run.plate_id,
        ref_frame_id: current.ref_frame_id,
        rotation: interpolate(previous.rotation(), current.rotation(), weight),
    }))
}

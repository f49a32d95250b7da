//! Failures that abort a resolver run.

use thiserror::Error;

use super::PlateId;

/// Errors that can occur while loading a rotation table or resolving it.
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed rotation table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },
    #[error("Plate {plate_id} has no rotation samples bracketing {target_time} Ma")]
    MissingCoverage { plate_id: PlateId, target_time: f64 },
    #[error("Plate {ref_frame_id} is used as the reference frame of plate {plate_id} but has no resolved rotation")]
    UnresolvedReference {
        plate_id: PlateId,
        ref_frame_id: PlateId,
    },
    #[error("Reference frame mismatch for plate {plate_id} at {time} Ma: bracket samples use frames {earlier} and {later}")]
    ReferenceFrameMismatch {
        plate_id: PlateId,
        earlier: PlateId,
        later: PlateId,
        time: f64,
    },
    #[error("Reference frame chain of plate {plate_id} loops back on itself")]
    CyclicReference { plate_id: PlateId },
    #[error("Fixed plate {plate_id} has no resolved rotation")]
    UnknownFixedPlate { plate_id: PlateId },
}

impl RotationError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        RotationError::MalformedTable {
            line,
            reason: reason.into(),
        }
    }
}

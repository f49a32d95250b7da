//! Fully reduced per-plate rotations for one target time.

use std::collections::HashMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::{PlateId, RotationError, ABSOLUTE_FRAME};
use crate::rotation::{compose, FiniteRotation};

/// A plate's rotation relative to the absolute frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteRotation {
    /// Plate being moved.
    pub plate_id: PlateId,
    /// Always [`ABSOLUTE_FRAME`]; kept so the record matches a resolved row.
    pub ref_frame_id: PlateId,
    /// Finite rotation relative to the absolute frame.
    pub rotation: FiniteRotation,
}

impl AbsoluteRotation {
    pub(crate) fn new(plate_id: PlateId, rotation: FiniteRotation) -> Self {
        Self {
            plate_id,
            ref_frame_id: ABSOLUTE_FRAME,
            rotation,
        }
    }
}

/// Absolute rotations of every resolved plate, in table order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AbsoluteRotationTable {
    /// Time the table was resolved for, in Ma.
    pub target_time: f64,
    entries: Vec<AbsoluteRotation>,
    #[serde(skip)]
    index: HashMap<PlateId, usize>,
}

impl AbsoluteRotationTable {
    pub(crate) fn new(target_time: f64, entries: Vec<AbsoluteRotation>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.plate_id, i))
            .collect();
        Self {
            target_time,
            entries,
            index,
        }
    }

    /// Looks up a plate's absolute rotation.
    pub fn get(&self, plate_id: PlateId) -> Option<&AbsoluteRotation> {
        self.index.get(&plate_id).map(|&i| &self.entries[i])
    }

    /// The plate's rotation, or the identity if it was not resolved.
    pub fn rotation_or_identity(&self, plate_id: PlateId) -> FiniteRotation {
        self.get(plate_id)
            .map(|entry| entry.rotation)
            .unwrap_or(FiniteRotation::IDENTITY)
    }

    /// Returns true if the plate has a resolved rotation.
    pub fn contains(&self, plate_id: PlateId) -> bool {
        self.index.contains_key(&plate_id)
    }

    /// Iterates entries in the order their plates appear in the table.
    pub fn iter(&self) -> impl Iterator<Item = &AbsoluteRotation> {
        self.entries.iter()
    }

    /// Number of resolved plates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plate was resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-expresses every rotation relative to `fixed_plate`, which ends up
    /// with the identity.
    pub fn rebased(&self, fixed_plate: PlateId) -> Result<Self, RotationError> {
        let fixed = self
            .get(fixed_plate)
            .ok_or(RotationError::UnknownFixedPlate {
                plate_id: fixed_plate,
            })?
            .rotation
            .inverse();

        let entries = self
            .entries
            .iter()
            .map(|entry| AbsoluteRotation::new(entry.plate_id, compose(entry.rotation, fixed)))
            .collect();
        Ok(Self::new(self.target_time, entries))
    }

    /// Writes one line per plate with pole and angle rounded to 2 decimals.
    pub fn write_summary<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for entry in &self.entries {
            writeln!(
                out,
                "plateid: {}, plat: {:.2}, plon: {:.2}, pang: {:.2}, refplate: {}",
                entry.plate_id,
                entry.rotation.pole_lat,
                entry.rotation.pole_lon,
                entry.rotation.angle,
                entry.ref_frame_id
            )?;
        }
        Ok(())
    }
}

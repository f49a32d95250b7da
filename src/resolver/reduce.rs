//! Phase 2: reducing relative rotations to the absolute frame.

use std::collections::HashMap;

use super::absolute::{AbsoluteRotation, AbsoluteRotationTable};
use super::interpolate::ResolvedRotation;
use super::{PlateId, RotationError, ABSOLUTE_FRAME};
use crate::rotation::{compose, FiniteRotation};

/// Resolved rotations of one run, addressable by plate id.
///
/// Owned by a single resolve call and dropped with it.
pub(crate) struct RotationArena {
    entries: Vec<ResolvedRotation>,
    index: HashMap<PlateId, usize>,
}

impl RotationArena {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn push(&mut self, resolved: ResolvedRotation) {
        self.index.insert(resolved.plate_id, self.entries.len());
        self.entries.push(resolved);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Walks the reference chain of the entry at `start`, composing each
    /// ancestor's relative rotation after the accumulated one.
    ///
    /// Finished ancestor absolutes are never substituted for the walk.
    fn reduce_entry(&self, start: usize) -> Result<FiniteRotation, RotationError> {
        let origin = self.entries[start];
        let mut accumulated = origin.rotation;
        let mut ref_frame = origin.ref_frame_id;
        let mut referrer = origin.plate_id;
        let mut steps = 0;

        while ref_frame != ABSOLUTE_FRAME {
            if ref_frame == origin.plate_id || steps >= self.entries.len() {
                return Err(RotationError::CyclicReference {
                    plate_id: origin.plate_id,
                });
            }
            let &ancestor_index =
                self.index
                    .get(&ref_frame)
                    .ok_or(RotationError::UnresolvedReference {
                        plate_id: referrer,
                        ref_frame_id: ref_frame,
                    })?;

            let ancestor = self.entries[ancestor_index];
            accumulated = compose(accumulated, ancestor.rotation);
            referrer = ancestor.plate_id;
            ref_frame = ancestor.ref_frame_id;
            steps += 1;
        }

        Ok(accumulated)
    }

    /// Reduces every entry in creation order.
    pub(crate) fn into_absolute(
        self,
        target_time: f64,
    ) -> Result<AbsoluteRotationTable, RotationError> {
        let entries = (0..self.entries.len())
            .map(|i| {
                let absolute = self.reduce_entry(i)?;
                Ok(AbsoluteRotation::new(self.entries[i].plate_id, absolute))
            })
            .collect::<Result<Vec<_>, RotationError>>()?;
        Ok(AbsoluteRotationTable::new(target_time, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::assert_same_rotation;

    fn resolved(plate_id: PlateId, ref_frame_id: PlateId, rotation: FiniteRotation) -> ResolvedRotation {
        ResolvedRotation {
            plate_id,
            ref_frame_id,
            rotation,
        }
    }

    #[test]
    fn test_absolute_entries_pass_through() {
        let r = FiniteRotation::new(10.0, 20.0, 30.0);
        let mut arena = RotationArena::new();
        arena.push(resolved(1, 0, r));
        let table = arena.into_absolute(0.0).unwrap();
        assert_eq!(table.get(1).unwrap().rotation, r);
    }

    #[test]
    fn test_chain_reduction_is_order_independent() {
        let a = FiniteRotation::new(10.0, 20.0, 30.0);
        let b = FiniteRotation::new(-20.0, 60.0, 15.0);
        let c = FiniteRotation::new(45.0, -100.0, 8.0);
        let expected_a = compose(compose(a, b), c);

        // Referrers listed before their ancestors.
        let mut forward = RotationArena::new();
        forward.push(resolved(1, 2, a));
        forward.push(resolved(2, 3, b));
        forward.push(resolved(3, 0, c));
        let forward = forward.into_absolute(10.0).unwrap();

        // Ancestors listed first.
        let mut backward = RotationArena::new();
        backward.push(resolved(3, 0, c));
        backward.push(resolved(2, 3, b));
        backward.push(resolved(1, 2, a));
        let backward = backward.into_absolute(10.0).unwrap();

        assert_same_rotation(forward.get(1).unwrap().rotation, expected_a, 1e-9);
        assert_same_rotation(backward.get(1).unwrap().rotation, expected_a, 1e-9);
        assert_same_rotation(
            forward.get(2).unwrap().rotation,
            backward.get(2).unwrap().rotation,
            1e-9,
        );
        let order: Vec<_> = forward.iter().map(|e| e.plate_id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancelling_stages_match_in_either_order() {
        // Plate 3's stage cancels plate 2's, leaving only plate 1's motion.
        let three = resolved(3, 2, FiniteRotation::new(10.0, 20.0, 10.0));
        let two = resolved(2, 1, FiniteRotation::new(50.0, 60.0, -10.0));
        let one = resolved(1, 0, FiniteRotation::new(0.0, 0.0, 5.0));

        let mut referrers_first = RotationArena::new();
        for entry in [three, two, one] {
            referrers_first.push(entry);
        }
        let mut ancestors_first = RotationArena::new();
        for entry in [one, two, three] {
            ancestors_first.push(entry);
        }
        let referrers_first = referrers_first.into_absolute(10.0).unwrap();
        let ancestors_first = ancestors_first.into_absolute(10.0).unwrap();

        let expected = FiniteRotation::new(0.0, 0.0, 5.0);
        assert_eq!(referrers_first.get(3).unwrap().rotation, expected);
        assert_eq!(ancestors_first.get(3).unwrap().rotation, expected);
        for plate_id in [1, 2, 3] {
            assert_eq!(
                referrers_first.get(plate_id).unwrap().rotation,
                ancestors_first.get(plate_id).unwrap().rotation
            );
        }
    }

    #[test]
    fn test_unresolved_reference_names_both_plates() {
        let mut arena = RotationArena::new();
        arena.push(resolved(1, 0, FiniteRotation::IDENTITY));
        arena.push(resolved(5, 42, FiniteRotation::new(0.0, 0.0, 5.0)));
        match arena.into_absolute(0.0) {
            Err(RotationError::UnresolvedReference {
                plate_id,
                ref_frame_id,
            }) => {
                assert_eq!(plate_id, 5);
                assert_eq!(ref_frame_id, 42);
            }
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_reference_deep_in_chain() {
        let mut arena = RotationArena::new();
        arena.push(resolved(1, 2, FiniteRotation::new(0.0, 0.0, 5.0)));
        arena.push(resolved(2, 77, FiniteRotation::new(0.0, 0.0, 5.0)));
        assert!(matches!(
            arena.into_absolute(0.0),
            Err(RotationError::UnresolvedReference {
                plate_id: 2,
                ref_frame_id: 77
            })
        ));
    }

    #[test]
    fn test_self_reference_is_cyclic() {
        let mut arena = RotationArena::new();
        arena.push(resolved(4, 4, FiniteRotation::new(0.0, 0.0, 5.0)));
        assert!(matches!(
            arena.into_absolute(0.0),
            Err(RotationError::CyclicReference { plate_id: 4 })
        ));
    }

    #[test]
    fn test_two_plate_loop_is_cyclic() {
        let mut arena = RotationArena::new();
        arena.push(resolved(1, 2, FiniteRotation::new(0.0, 0.0, 5.0)));
        arena.push(resolved(2, 1, FiniteRotation::new(0.0, 0.0, 5.0)));
        assert!(matches!(
            arena.into_absolute(0.0),
            Err(RotationError::CyclicReference { plate_id: 1 })
        ));
    }
}

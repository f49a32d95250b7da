//! Rotating features by their plate's absolute rotation.

use crate::geometry::{normalize_lon, round_to};
use crate::resolver::AbsoluteRotationTable;
use crate::rotation::rotate_point;

use super::Feature;

/// Decimal places rotated coordinates are rounded to.
pub const DEFAULT_DECIMALS: u32 = 4;

/// How a feature fared in [`rotate_feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The plate was found and every vertex was rotated.
    Rotated,
    /// The plate has no rotation; the feature was left in place.
    Unmatched,
}

/// Rotates every vertex of `feature` in place by its plate's rotation.
///
/// Coordinates are rounded to `decimals` places. A plate missing from
/// `rotations` is logged and the feature passes through unrotated.
pub fn rotate_feature(
    feature: &mut Feature,
    rotations: &AbsoluteRotationTable,
    decimals: u32,
) -> RotationOutcome {
    let Some(entry) = rotations.get(feature.plate_id) else {
        log::warn!(
            "plate {} not in rotation table at {} Ma; assigning zero rotation",
            feature.plate_id,
            rotations.target_time
        );
        return RotationOutcome::Unmatched;
    };

    let rotation = entry.rotation;
    for vertex in &mut feature.vertices {
        let (lat, lon) = rotate_point(vertex.lat, vertex.lon, &rotation);
        vertex.lat = round_to(lat, decimals);
        vertex.lon = normalize_lon(round_to(lon, decimals));
    }
    RotationOutcome::Rotated
}

/// Iterator adapter rotating each feature of a stream, one out per one in.
pub struct FeatureRotator<'a, I> {
    features: I,
    rotations: &'a AbsoluteRotationTable,
    decimals: u32,
    unmatched: usize,
}

impl<'a, I> FeatureRotator<'a, I>
where
    I: Iterator<Item = Feature>,
{
    /// Wraps `features`, rotating with `rotations`.
    pub fn new(features: I, rotations: &'a AbsoluteRotationTable) -> Self {
        Self {
            features,
            rotations,
            decimals: DEFAULT_DECIMALS,
            unmatched: 0,
        }
    }

    /// Overrides the rounding precision.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Number of features so far whose plate had no rotation.
    pub fn unmatched(&self) -> usize {
        self.unmatched
    }
}

impl<I> Iterator for FeatureRotator<'_, I>
where
    I: Iterator<Item = Feature>,
{
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        let mut feature = self.features.next()?;
        if rotate_feature(&mut feature, self.rotations, self.decimals) == RotationOutcome::Unmatched {
            self.unmatched += 1;
        }
        Some(feature)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.features.size_hint()
    }
}

/// Adds `.rotated_by(&table)` to feature iterators.
pub trait RotateFeatures: Iterator<Item = Feature> + Sized {
    /// Rotates each feature by its plate's absolute rotation.
    fn rotated_by(self, rotations: &AbsoluteRotationTable) -> FeatureRotator<'_, Self> {
        FeatureRotator::new(self, rotations)
    }
}

impl<I: Iterator<Item = Feature>> RotateFeatures for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Pen, Vertex};
    use crate::resolver::{resolve, RotationTable};

    fn rotations() -> AbsoluteRotationTable {
        // Plate 1 spins 30° about the north pole at 10 Ma.
        let table = RotationTable::parse("1 0 90 0 0 0\n1 10 90 0 30 0\n").unwrap();
        resolve(&table, 10.0).unwrap()
    }

    fn feature(plate_id: u32) -> Feature {
        Feature::new(
            plate_id,
            vec![
                Vertex::new(10.0, 0.0, Pen::Move),
                Vertex::new(20.0, 160.0, Pen::Draw),
                Vertex::new(90.0, 5.0, Pen::Draw),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rotates_vertices_in_place() {
        let mut f = feature(1);
        assert_eq!(rotate_feature(&mut f, &rotations(), 4), RotationOutcome::Rotated);
        assert_eq!(f.vertices[0].lat, 10.0);
        assert_eq!(f.vertices[0].lon, 30.0);
        assert_eq!(f.vertices[1].lon, -170.0);
        assert_eq!(f.vertices[0].pen, Pen::Move);
        assert_eq!(f.vertices[1].pen, Pen::Draw);
        // The pole vertex was clamped to 89.9 before rotating.
        assert_eq!(f.vertices[2].lat, 89.9);
        assert_eq!(f.vertices[2].lon, 35.0);
    }

    #[test]
    fn test_rounding_onto_antimeridian_stays_east() {
        let table = RotationTable::parse("1 0 90 0 0 0\n1 10 90 0 0.00003 0\n").unwrap();
        let rotations = resolve(&table, 10.0).unwrap();
        let mut f = Feature::new(
            1,
            vec![
                Vertex::new(0.0, -179.99999, Pen::Move),
                Vertex::new(5.0, -170.0, Pen::Draw),
            ],
        )
        .unwrap();
        rotate_feature(&mut f, &rotations, 4);
        assert_eq!(f.vertices[0].lon, 180.0);
        assert_eq!(f.vertices[1].lon, -170.0);
    }

    #[test]
    fn test_unmatched_plate_passes_through() {
        let original = feature(55);
        let mut f = original.clone();
        assert_eq!(rotate_feature(&mut f, &rotations(), 4), RotationOutcome::Unmatched);
        assert_eq!(f, original);
    }

    #[test]
    fn test_stream_preserves_order_and_counts_unmatched() {
        let rotations = rotations();
        let input = vec![feature(1), feature(2), feature(1), feature(3)];
        let mut rotator = input.into_iter().rotated_by(&rotations);
        let out: Vec<_> = rotator.by_ref().collect();

        assert_eq!(out.len(), 4);
        let ids: Vec<_> = out.iter().map(|f| f.plate_id).collect();
        assert_eq!(ids, vec![1, 2, 1, 3]);
        assert_eq!(rotator.unmatched(), 2);
        assert_eq!(out[1].vertices[0].lon, 0.0);
        assert_eq!(out[2].vertices[0].lon, 30.0);
    }

    #[test]
    fn test_rounding_precision() {
        let rotations = rotations();
        let input = vec![Feature::new(1, vec![Vertex::new(12.345678, 1.0, Pen::Move)]).unwrap()];
        let out: Vec<_> = input.into_iter().rotated_by(&rotations).with_decimals(2).collect();
        assert_eq!(out[0].vertices[0].lat, 12.35);
        assert_eq!(out[0].vertices[0].lon, 31.0);
    }
}

//! Applying a finite rotation to a single geographic point.

use crate::geometry::{clamp_polar_lat, from_unit_vector, to_unit_vector};

use super::FiniteRotation;

/// Rotates the point (`lat`, `lon`) by `rotation`, returning the new (lat, lon).
///
/// A zero angle returns the input untouched. Otherwise an exact pole is
/// first nudged to ±89.9, and the output longitude lies in (-180, 180].
pub fn rotate_point(lat: f64, lon: f64, rotation: &FiniteRotation) -> (f64, f64) {
    if rotation.is_identity() {
        return (lat, lon);
    }

    let point = to_unit_vector(clamp_polar_lat(lat), lon);
    from_unit_vector(rotation.to_quat() * point)
}

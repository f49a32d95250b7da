//! Finite rotations about an Euler pole and their composition.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_lon, to_unit_vector};

/// A rotation of the sphere by `angle` degrees about the Euler pole
/// (`pole_lat`, `pole_lon`).
///
/// Positive angles rotate counter-clockwise when looking down on the pole
/// from outside the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiniteRotation {
    /// Latitude of the Euler pole in degrees.
    pub pole_lat: f64,
    /// Longitude of the Euler pole in degrees.
    pub pole_lon: f64,
    /// Rotation angle in degrees.
    pub angle: f64,
}

impl Default for FiniteRotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FiniteRotation {
    /// The canonical identity: zero angle about the north pole.
    pub const IDENTITY: Self = Self {
        pole_lat: 90.0,
        pole_lon: 0.0,
        angle: 0.0,
    };

    /// Creates a rotation from pole coordinates and an angle, all in degrees.
    pub fn new(pole_lat: f64, pole_lon: f64, angle: f64) -> Self {
        Self {
            pole_lat,
            pole_lon,
            angle,
        }
    }

    /// Returns true when the rotation leaves every point in place.
    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }

    /// The reverse rotation: same pole, angle negated.
    pub fn inverse(self) -> Self {
        Self {
            angle: -self.angle,
            ..self
        }
    }

    /// Scales the angle by `weight` about the same pole.
    pub fn scaled(self, weight: f64) -> Self {
        Self {
            angle: self.angle * weight,
            ..self
        }
    }

    /// Unit vector of the Euler pole.
    pub fn axis(&self) -> DVec3 {
        to_unit_vector(self.pole_lat, self.pole_lon)
    }

    /// Unit quaternion `(cos(θ/2), axis · sin(θ/2))`.
    pub fn to_quat(&self) -> DQuat {
        DQuat::from_axis_angle(self.axis(), self.angle.to_radians())
    }

    /// Recovers an Euler pole and angle from a unit quaternion.
    ///
    /// The angle is wrapped to (-180, 180] and the pole always lies along
    /// the quaternion's vector part. Degenerate quaternions collapse to
    /// [`Self::IDENTITY`].
    pub fn from_quat(q: DQuat) -> Self {
        let mut total_angle = 2.0 * q.w.clamp(-1.0, 1.0).acos().to_degrees();
        if total_angle == 0.0 {
            return Self::IDENTITY;
        }
        if total_angle > 180.0 {
            total_angle -= 360.0;
        }

        let half_sin = (total_angle / 2.0).to_radians().sin();
        if half_sin == 0.0 || !half_sin.is_finite() {
            return Self::IDENTITY;
        }

        let mut pole_lat = 90.0 - (q.z / half_sin).clamp(-1.0, 1.0).acos().to_degrees();
        if total_angle < 0.0 {
            pole_lat = -pole_lat;
        }
        let pole_lon = normalize_lon(q.y.atan2(q.x).to_degrees());

        Self {
            pole_lat,
            pole_lon,
            angle: total_angle,
        }
    }

    /// Applies `self` and then `next`. Shorthand for [`compose`].
    pub fn then(self, next: Self) -> Self {
        compose(self, next)
    }
}

/// Combines two finite rotations: apply `first`, then `second`.
///
/// Edge cases are checked in a fixed order before any quaternion work:
/// opposite angles give the canonical identity, and a zero angle on either
/// side returns the other rotation untouched.
pub fn compose(first: FiniteRotation, second: FiniteRotation) -> FiniteRotation {
    if first.angle == -second.angle {
        return FiniteRotation::IDENTITY;
    }
    if first.angle == 0.0 {
        return second;
    }
    if second.angle == 0.0 {
        return first;
    }

    // Right-to-left: `first` acts on the vector before `second`.
    FiniteRotation::from_quat(second.to_quat() * first.to_quat())
}

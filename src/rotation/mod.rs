//! Finite rotation algebra.
//!
//! This module implements the spherical primitives the rest of the crate
//! builds on:
//! - Euler pole / angle rotations and their composition via quaternions
//! - Rotating a single (lat, lon) point
//! - Placing a locally drawn outline anywhere on the sphere

mod finite;
mod placement;
mod point;

pub use finite::{compose, FiniteRotation};
pub use placement::place_at;
pub use point::rotate_point;

#[cfg(test)]
pub(crate) use finite::tests::assert_same_rotation;

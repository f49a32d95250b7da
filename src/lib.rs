//! Plate-tectonic reconstruction.
//!
//! This crate resolves hierarchical finite rotation tables into absolute
//! per-plate rotations at a target time, rotates plate-bound geographic
//! features with them, and splits the rotated rings at the 0° and ±180°
//! meridians so they can be filled on an unprojected map.

pub mod decompose;
pub mod feature;
pub mod geometry;
pub mod pipeline;
pub mod resolver;
pub mod rotation;

pub use decompose::{decompose_ring, DecomposeConfig, Decomposer};
pub use feature::{Feature, Pen, RotateFeatures, Vertex};
pub use pipeline::{Reconstruction, ReconstructionConfig, Timeline};
pub use resolver::{
    rebase, resolve, AbsoluteRotationTable, PlateId, Resolver, ResolverConfig, RotationError,
    RotationTable,
};
pub use rotation::{compose, rotate_point, FiniteRotation};

//! Geographic features carried by plates.
//!
//! A feature is an ordered vertex list tagged with the plate that carries
//! it. Pen flags split the list into sub-paths: `Move` starts a new one,
//! `Draw` connects to the previous vertex.

mod rotator;

pub use rotator::{
    rotate_feature, FeatureRotator, RotateFeatures, RotationOutcome, DEFAULT_DECIMALS,
};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::PlateId;

/// Latitude at or above which an external vertex row marks end-of-feature.
pub const END_OF_FEATURE_LAT: f64 = 99.0;

/// Feature time bounds at or beyond these values mean "always present".
pub const ALWAYS_APPEARED: f64 = 999.0;
pub const NEVER_DISAPPEARS: f64 = -999.0;

/// Errors that can occur while building a feature.
#[derive(Error, Debug, PartialEq)]
pub enum FeatureError {
    #[error("Vertex {index} carries end-of-feature latitude {lat}")]
    SentinelVertex { index: usize, lat: f64 },
    #[error("Vertex {index} has latitude {lat} outside [-90, 90]")]
    InvalidLatitude { index: usize, lat: f64 },
    #[error("Unknown pen code {0} (expected 2 = draw or 3 = move)")]
    InvalidPen(u8),
}

/// Whether a vertex connects to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Pen {
    /// Draw a segment from the previous vertex.
    Draw,
    /// Lift the pen and start a new sub-path here.
    Move,
}

impl TryFrom<u8> for Pen {
    type Error = FeatureError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(Pen::Draw),
            3 => Ok(Pen::Move),
            other => Err(FeatureError::InvalidPen(other)),
        }
    }
}

impl From<Pen> for u8 {
    fn from(pen: Pen) -> u8 {
        match pen {
            Pen::Draw => 2,
            Pen::Move => 3,
        }
    }
}

/// One feature vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Pen flag.
    pub pen: Pen,
}

impl Vertex {
    /// Creates a vertex.
    pub fn new(lat: f64, lon: f64, pen: Pen) -> Self {
        Self { lat, lon, pen }
    }

    /// The vertex as (lon, lat), the order the decomposer works in.
    pub fn lon_lat(&self) -> DVec2 {
        DVec2::new(self.lon, self.lat)
    }
}

/// A plate-bound geographic feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Plate whose rotation moves this feature.
    pub plate_id: PlateId,
    /// Age (Ma) at which the feature appears; 999 or more means always.
    #[serde(default = "always_appeared")]
    pub appears: f64,
    /// Age (Ma) at which the feature disappears; -999 or less means never.
    #[serde(default = "never_disappears")]
    pub disappears: f64,
    /// Ordered vertices.
    pub vertices: Vec<Vertex>,
}

fn always_appeared() -> f64 {
    ALWAYS_APPEARED
}

fn never_disappears() -> f64 {
    NEVER_DISAPPEARS
}

impl Feature {
    /// Creates an always-present feature, rejecting vertices that are
    /// end-of-feature sentinels or have an impossible latitude.
    pub fn new(plate_id: PlateId, vertices: Vec<Vertex>) -> Result<Self, FeatureError> {
        let feature = Self {
            plate_id,
            appears: ALWAYS_APPEARED,
            disappears: NEVER_DISAPPEARS,
            vertices,
        };
        feature.validate()?;
        Ok(feature)
    }

    /// Sets the time window the feature exists in.
    pub fn with_lifespan(mut self, appears: f64, disappears: f64) -> Self {
        self.appears = appears;
        self.disappears = disappears;
        self
    }

    /// Checks every vertex latitude.
    pub fn validate(&self) -> Result<(), FeatureError> {
        for (index, v) in self.vertices.iter().enumerate() {
            if v.lat >= END_OF_FEATURE_LAT {
                return Err(FeatureError::SentinelVertex { index, lat: v.lat });
            }
            if !(-90.0..=90.0).contains(&v.lat) {
                return Err(FeatureError::InvalidLatitude { index, lat: v.lat });
            }
        }
        Ok(())
    }

    /// Returns true if the feature exists at `time` (Ma).
    pub fn is_active_at(&self, time: f64) -> bool {
        let appeared = self.appears >= time || self.appears >= ALWAYS_APPEARED;
        let not_gone = self.disappears <= time || self.disappears <= NEVER_DISAPPEARS;
        appeared && not_gone
    }

    /// Splits the vertices into sub-paths, starting a new one at every
    /// `Move` vertex.
    pub fn paths(&self) -> Vec<&[Vertex]> {
        let mut paths = Vec::new();
        let mut start = 0;
        for (i, v) in self.vertices.iter().enumerate() {
            if v.pen == Pen::Move && i > start {
                paths.push(&self.vertices[start..i]);
                start = i;
            }
        }
        if start < self.vertices.len() {
            paths.push(&self.vertices[start..]);
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0, Pen::Move),
            Vertex::new(0.0, 10.0, Pen::Draw),
            Vertex::new(10.0, 10.0, Pen::Draw),
            Vertex::new(10.0, 0.0, Pen::Draw),
            Vertex::new(0.0, 0.0, Pen::Draw),
        ]
    }

    #[test]
    fn test_pen_codes() {
        assert_eq!(Pen::try_from(2), Ok(Pen::Draw));
        assert_eq!(Pen::try_from(3), Ok(Pen::Move));
        assert_eq!(Pen::try_from(4), Err(FeatureError::InvalidPen(4)));
        assert_eq!(u8::from(Pen::Move), 3);
    }

    #[test]
    fn test_rejects_sentinel_vertex() {
        let mut vertices = square();
        vertices.push(Vertex::new(99.0, 99.0, Pen::Draw));
        assert_eq!(
            Feature::new(1, vertices),
            Err(FeatureError::SentinelVertex { index: 5, lat: 99.0 })
        );
    }

    #[test]
    fn test_rejects_bad_latitude() {
        let vertices = vec![Vertex::new(-91.0, 0.0, Pen::Move)];
        assert!(matches!(
            Feature::new(1, vertices),
            Err(FeatureError::InvalidLatitude { index: 0, .. })
        ));
    }

    #[test]
    fn test_paths_split_on_move() {
        let mut vertices = square();
        vertices.push(Vertex::new(20.0, 20.0, Pen::Move));
        vertices.push(Vertex::new(21.0, 21.0, Pen::Draw));
        let feature = Feature::new(1, vertices).unwrap();
        let paths = feature.paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 5);
        assert_eq!(paths[1].len(), 2);
    }

    #[test]
    fn test_paths_without_leading_move() {
        let vertices = vec![
            Vertex::new(0.0, 0.0, Pen::Draw),
            Vertex::new(1.0, 1.0, Pen::Draw),
        ];
        let feature = Feature::new(1, vertices).unwrap();
        assert_eq!(feature.paths().len(), 1);
    }

    #[test]
    fn test_lifespan() {
        let feature = Feature::new(1, square()).unwrap().with_lifespan(200.0, 50.0);
        assert!(feature.is_active_at(100.0));
        assert!(feature.is_active_at(200.0));
        assert!(feature.is_active_at(50.0));
        assert!(!feature.is_active_at(250.0));
        assert!(!feature.is_active_at(10.0));
    }

    #[test]
    fn test_unbounded_lifespan() {
        let feature = Feature::new(1, square()).unwrap();
        assert!(feature.is_active_at(0.0));
        assert!(feature.is_active_at(4000.0));
    }

    #[test]
    fn test_feature_from_json() {
        let json = r#"{"plate_id": 701, "vertices": [{"lat": 1.0, "lon": 2.0, "pen": 3}]}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.plate_id, 701);
        assert_eq!(feature.vertices[0].pen, Pen::Move);
        assert!(feature.is_active_at(300.0));
    }

    #[test]
    fn test_bad_pen_in_json() {
        let json = r#"{"plate_id": 1, "vertices": [{"lat": 1.0, "lon": 2.0, "pen": 7}]}"#;
        assert!(serde_json::from_str::<Feature>(json).is_err());
    }
}

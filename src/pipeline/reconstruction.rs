//! Per-time reconstruction: resolve, rotate, decompose.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use glam::DVec2;
use serde::Serialize;

use super::{PipelineError, ReconstructionConfig, Timeline};
use crate::decompose::Decomposer;
use crate::feature::{Feature, RotateFeatures};
use crate::resolver::{AbsoluteRotationTable, Resolver, RotationError, RotationTable};

/// Reconstructs features from one rotation table at any number of times.
///
/// Every frame is resolved from scratch; nothing carries over between
/// times.
pub struct Reconstruction<'a> {
    table: &'a RotationTable,
    resolver: Resolver,
    decomposer: Decomposer,
    decimals: u32,
}

impl<'a> Reconstruction<'a> {
    pub fn new(table: &'a RotationTable, config: ReconstructionConfig) -> Self {
        Self {
            table,
            resolver: Resolver::new(config.resolver),
            decomposer: Decomposer::new(config.decompose),
            decimals: config.coordinate_decimals,
        }
    }

    /// Resolves the table at `time` (Ma).
    pub fn frame(&self, time: f64) -> Result<Frame<'_>, RotationError> {
        let rotations = self.resolver.resolve(self.table, time)?;
        Ok(Frame {
            time,
            rotations,
            decomposer: &self.decomposer,
            decimals: self.decimals,
        })
    }

    /// Reconstructs `features` at every time of `timeline`, handing each
    /// finished frame to `on_frame` along with its index and the total.
    ///
    /// Stops at the first frame whose table cannot be resolved or whose
    /// callback fails.
    pub fn run<F>(
        &self,
        timeline: &Timeline,
        features: &[Feature],
        mut on_frame: F,
    ) -> Result<(), PipelineError>
    where
        F: FnMut(FrameRecord, usize, usize) -> Result<(), PipelineError>,
    {
        let total = timeline.len();
        for (i, time) in timeline.iter().enumerate() {
            let record = self.frame(time)?.reconstruct(features);
            on_frame(record, i, total)?;
        }
        Ok(())
    }
}

/// Rotations of every plate at one time, ready to move features.
pub struct Frame<'a> {
    time: f64,
    rotations: AbsoluteRotationTable,
    decomposer: &'a Decomposer,
    decimals: u32,
}

impl Frame<'_> {
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn rotations(&self) -> &AbsoluteRotationTable {
        &self.rotations
    }

    /// Rotates the features that exist at this frame's time, in order.
    pub fn rotate<I>(&self, features: I) -> Vec<Feature>
    where
        I: IntoIterator<Item = Feature>,
    {
        let time = self.time;
        let mut rotator = features
            .into_iter()
            .filter(|f| f.is_active_at(time))
            .rotated_by(&self.rotations)
            .with_decimals(self.decimals);
        let rotated: Vec<Feature> = rotator.by_ref().collect();
        if rotator.unmatched() > 0 {
            log::debug!(
                "{} of {} features at {} Ma had no plate rotation",
                rotator.unmatched(),
                rotated.len(),
                time
            );
        }
        rotated
    }

    /// Decomposes every sub-path of a rotated feature into fillable rings.
    pub fn polygons(&self, feature: &Feature) -> Vec<Vec<DVec2>> {
        feature
            .paths()
            .into_iter()
            .flat_map(|path| {
                let ring: Vec<DVec2> = path.iter().map(|v| v.lon_lat()).collect();
                self.decomposer.decompose(&ring)
            })
            .collect()
    }

    /// Rotates `features` and decomposes each one.
    pub fn reconstruct(&self, features: &[Feature]) -> FrameRecord {
        let features = self
            .rotate(features.iter().cloned())
            .into_iter()
            .map(|feature| {
                let rings = self.polygons(&feature);
                ReconstructedFeature { feature, rings }
            })
            .collect();
        FrameRecord {
            time: self.time,
            features,
        }
    }
}

/// A rotated feature with its decomposed rings.
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructedFeature {
    #[serde(flatten)]
    pub feature: Feature,
    /// Closed (lon, lat) rings, one or more per sub-path.
    pub rings: Vec<Vec<DVec2>>,
}

/// Everything reconstructed at one time.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub time: f64,
    pub features: Vec<ReconstructedFeature>,
}

impl FrameRecord {
    /// Writes the record as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), PipelineError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

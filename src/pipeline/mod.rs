//! Reconstruction pipeline.
//!
//! Drives the resolver, feature rotator and ring decomposer over a
//! timeline of target times, producing one frame record per time.

mod config;
mod reconstruction;
mod timeline;

pub use config::ReconstructionConfig;
pub use reconstruction::{Frame, FrameRecord, ReconstructedFeature, Reconstruction};
pub use timeline::{Timeline, TimelineError, DEFAULT_FRAME_DIVISIONS, MAX_FRAMES};

use thiserror::Error;

use crate::feature::FeatureError;
use crate::resolver::RotationError;

/// Errors that can occur while running a reconstruction.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rotation(#[from] RotationError),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

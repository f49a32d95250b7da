//! Frame times for an animated reconstruction.

use thiserror::Error;

/// Number of frames a timeline is divided into when no step is given.
pub const DEFAULT_FRAME_DIVISIONS: f64 = 10.0;

/// Largest number of frames a timeline may hold.
pub const MAX_FRAMES: usize = 100_000;

const STEP_TOLERANCE: f64 = 1e-9;

/// Errors that can occur while building a timeline.
#[derive(Error, Debug, PartialEq)]
pub enum TimelineError {
    #[error("Time step must not be zero")]
    ZeroStep,
    #[error("Range {start}..{end} Ma is not a whole number of {step} Ma steps")]
    UnevenStep { start: f64, end: f64, step: f64 },
    #[error("A {step} Ma step over {start}..{end} Ma exceeds {max} frames")]
    TooManyFrames {
        start: f64,
        end: f64,
        step: f64,
        max: usize,
    },
}

/// Ordered reconstruction times in Ma, running from a start to an end time
/// in either direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    times: Vec<f64>,
}

impl Timeline {
    /// Builds the frame times from `start` to `end` inclusive.
    ///
    /// Without an end there is a single frame at `start`. Without a step the
    /// range is split into ten. Only the step's magnitude is used; the
    /// direction always follows `start -> end`.
    pub fn new(start: f64, end: Option<f64>, step: Option<f64>) -> Result<Self, TimelineError> {
        let end = match end {
            Some(end) if end != start => end,
            _ => return Ok(Self::single(start)),
        };
        let span = end - start;
        let step = match step {
            Some(step) if step == 0.0 => return Err(TimelineError::ZeroStep),
            Some(step) => step.abs().copysign(span),
            None => span / DEFAULT_FRAME_DIVISIONS,
        };

        let steps = span / step;
        if !steps.is_finite() || steps >= MAX_FRAMES as f64 {
            return Err(TimelineError::TooManyFrames {
                start,
                end,
                step,
                max: MAX_FRAMES,
            });
        }
        let whole = steps.round();
        if (steps - whole).abs() > STEP_TOLERANCE {
            return Err(TimelineError::UnevenStep { start, end, step });
        }

        let times = (0..=whole as usize)
            .map(|i| start + i as f64 * step)
            .collect();
        Ok(Self { times })
    }

    /// A timeline holding one frame.
    pub fn single(time: f64) -> Self {
        Self { times: vec![time] }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}

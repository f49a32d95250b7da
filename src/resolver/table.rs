//! The time-indexed plate rotation table.
//!
//! One sample per line, whitespace delimited:
//!
//! ```text
//! plate_id  time  pole_lat  pole_lon  angle  ref_frame_id  [comment...]
//! ```
//!
//! Samples of one plate form a single contiguous run in ascending time.
//! Plate id 999 marks filler rows, which are skipped without being parsed.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PlateId, RotationError, FILLER_PLATE_ID};
use crate::rotation::FiniteRotation;

/// One row of the rotation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSample {
    /// Plate this sample moves.
    pub plate_id: PlateId,
    /// Age of the sample in Ma.
    pub time: f64,
    /// Euler pole latitude in degrees.
    pub pole_lat: f64,
    /// Euler pole longitude in degrees.
    pub pole_lon: f64,
    /// Rotation angle in degrees.
    pub angle: f64,
    /// Plate the rotation is expressed relative to (0 = absolute frame).
    pub ref_frame_id: PlateId,
    /// 1-based source line, or 0 when built in memory.
    #[serde(default)]
    pub line: usize,
}

impl RotationSample {
    /// Creates an in-memory sample with no source line.
    pub fn new(
        plate_id: PlateId,
        time: f64,
        pole_lat: f64,
        pole_lon: f64,
        angle: f64,
        ref_frame_id: PlateId,
    ) -> Self {
        Self {
            plate_id,
            time,
            pole_lat,
            pole_lon,
            angle,
            ref_frame_id,
            line: 0,
        }
    }

    /// The finite rotation stored in this sample.
    pub fn rotation(&self) -> FiniteRotation {
        FiniteRotation::new(self.pole_lat, self.pole_lon, self.angle)
    }

    fn is_filler(&self) -> bool {
        self.plate_id == FILLER_PLATE_ID
    }
}

/// The contiguous, time-ascending samples of one plate.
#[derive(Debug, Clone, Copy)]
pub struct PlateRun<'a> {
    /// Plate shared by every sample in the run.
    pub plate_id: PlateId,
    /// Samples in ascending time order.
    pub samples: &'a [RotationSample],
}

/// A validated rotation table.
#[derive(Debug, Clone, Default)]
pub struct RotationTable {
    samples: Vec<RotationSample>,
    runs: Vec<Range<usize>>,
    filler_rows: usize,
}

enum Line {
    Blank,
    Filler,
    Sample(RotationSample),
}

impl RotationTable {
    /// Builds a table from samples in source order.
    ///
    /// Filler samples are dropped. Returns `MalformedTable` if a plate's
    /// times decrease, a plate id forms more than one run, or a value is
    /// out of range.
    pub fn from_samples(
        samples: impl IntoIterator<Item = RotationSample>,
    ) -> Result<Self, RotationError> {
        let mut table = RotationTable::default();
        let mut seen = std::collections::HashSet::new();

        for sample in samples {
            if sample.is_filler() {
                table.filler_rows += 1;
                continue;
            }
            validate_values(&sample)?;

            let index = table.samples.len();
            match table.samples.last().copied() {
                Some(prev) if prev.plate_id == sample.plate_id => {
                    if sample.time < prev.time {
                        return Err(RotationError::malformed(
                            sample.line,
                            format!(
                                "time decreases from {} to {} Ma within plate {}",
                                prev.time, sample.time, sample.plate_id
                            ),
                        ));
                    }
                    if let Some(run) = table.runs.last_mut() {
                        run.end = index + 1;
                    }
                }
                _ => {
                    if !seen.insert(sample.plate_id) {
                        return Err(RotationError::malformed(
                            sample.line,
                            format!("plate {} appears in more than one run", sample.plate_id),
                        ));
                    }
                    table.runs.push(index..index + 1);
                }
            }
            table.samples.push(sample);
        }

        log::debug!(
            "rotation table: {} samples, {} plates, {} filler rows",
            table.samples.len(),
            table.runs.len(),
            table.filler_rows
        );
        Ok(table)
    }

    /// Parses a rotation table from text.
    pub fn parse(text: &str) -> Result<Self, RotationError> {
        Self::from_reader(text.as_bytes())
    }

    /// Reads a rotation table line by line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, RotationError> {
        let mut fillers = 0;
        let mut samples = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            match parse_line(i + 1, &line?)? {
                Line::Blank => {}
                Line::Filler => fillers += 1,
                Line::Sample(sample) => samples.push(sample),
            }
        }
        let mut table = Self::from_samples(samples)?;
        table.filler_rows += fillers;
        Ok(table)
    }

    /// Opens and reads a rotation file.
    pub fn from_path(path: &Path) -> Result<Self, RotationError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// All non-filler samples in table order.
    pub fn samples(&self) -> &[RotationSample] {
        &self.samples
    }

    /// Iterates the per-plate runs in table order.
    pub fn runs(&self) -> impl Iterator<Item = PlateRun<'_>> + '_ {
        self.runs.iter().map(move |range| {
            let samples = &self.samples[range.clone()];
            PlateRun {
                plate_id: samples[0].plate_id,
                samples,
            }
        })
    }

    /// Number of distinct plates.
    pub fn plate_count(&self) -> usize {
        self.runs.len()
    }

    /// Number of filler rows that were skipped.
    pub fn filler_rows(&self) -> usize {
        self.filler_rows
    }

    /// Returns true if the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn validate_values(sample: &RotationSample) -> Result<(), RotationError> {
    let values = [sample.time, sample.pole_lat, sample.pole_lon, sample.angle];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(RotationError::malformed(sample.line, "non-finite value"));
    }
    if !(-90.0..=90.0).contains(&sample.pole_lat) {
        return Err(RotationError::malformed(
            sample.line,
            format!("pole latitude {} outside [-90, 90]", sample.pole_lat),
        ));
    }
    Ok(())
}

fn parse_line(line_no: usize, line: &str) -> Result<Line, RotationError> {
    let mut fields = line.split_whitespace();
    let Some(first) = fields.next() else {
        return Ok(Line::Blank);
    };

    let plate_id: PlateId = parse_field(line_no, Some(first), "plate id")?;
    if plate_id == FILLER_PLATE_ID {
        return Ok(Line::Filler);
    }

    let time = parse_field(line_no, fields.next(), "time")?;
    let pole_lat = parse_field(line_no, fields.next(), "pole latitude")?;
    let pole_lon = parse_field(line_no, fields.next(), "pole longitude")?;
    let angle = parse_field(line_no, fields.next(), "angle")?;
    let ref_frame_id = parse_field(line_no, fields.next(), "reference plate id")?;

    Ok(Line::Sample(RotationSample {
        plate_id,
        time,
        pole_lat,
        pole_lon,
        angle,
        ref_frame_id,
        line: line_no,
    }))
}

fn parse_field<T: FromStr>(
    line_no: usize,
    token: Option<&str>,
    name: &str,
) -> Result<T, RotationError> {
    let token = token.ok_or_else(|| RotationError::malformed(line_no, format!("missing {}", name)))?;
    token
        .parse()
        .map_err(|_| RotationError::malformed(line_no, format!("invalid {} '{}'", name, token)))
}

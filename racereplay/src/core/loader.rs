use crate::core::frame::{Frame, FrameSequence, Position};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

const FRAMES_FIELD: &str = "f1Data";
const FRAMES_FIELD_ALIAS: &str = "frames";

/// LoadError covers the failures that abort a whole load. Anomalies of single frames or records
/// are not errors, they are degraded to missing data instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open dataset file {}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset")]
    Format(#[from] serde_json::Error),
    #[error("dataset does not contain a frame list (expected field f1Data or frames)")]
    MissingField,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "timeDelta", alias = "time_delta", default)]
    time_delta: Option<Value>,
    #[serde(rename = "carPositions", alias = "cars", default)]
    car_positions: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawCarPosition {
    driver: u32,
    #[serde(rename = "posX")]
    pos_x: f64,
    #[serde(rename = "posY")]
    pos_y: f64,
    #[serde(rename = "posZ")]
    pos_z: f64,
}

/// Outcome of converting one frame element of the dataset.
struct ConvertedFrame {
    frame: Frame,
    frame_degraded: bool,
    no_records_degraded: usize,
}

/// load_frames reads the dataset file and converts it into a frame sequence. Frame i of the
/// input becomes index i of the output.
pub fn load_frames(filepath: &Path) -> Result<FrameSequence, LoadError> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .map_err(|source| LoadError::Resource {
            path: filepath.to_owned(),
            source,
        })?;

    frames_from_reader(BufReader::new(fh))
}

/// frames_from_reader parses a dataset from any reader, see `load_frames`.
pub fn frames_from_reader<R: Read>(reader: R) -> Result<FrameSequence, LoadError> {
    let root: Value = serde_json::from_reader(reader)?;
    frames_from_value(root)
}

/// frames_from_str parses a dataset given as JSON string, see `load_frames`.
pub fn frames_from_str(json: &str) -> Result<FrameSequence, LoadError> {
    let root: Value = serde_json::from_str(json)?;
    frames_from_value(root)
}

fn frames_from_value(root: Value) -> Result<FrameSequence, LoadError> {
    let raw_frames = match root {
        Value::Object(mut map) => match map
            .remove(FRAMES_FIELD)
            .or_else(|| map.remove(FRAMES_FIELD_ALIAS))
        {
            Some(Value::Array(raw_frames)) => raw_frames,
            _ => return Err(LoadError::MissingField),
        },
        _ => return Err(LoadError::MissingField),
    };

    // convert frames in parallel, collect() keeps the input order
    let converted: Vec<ConvertedFrame> = raw_frames
        .into_par_iter()
        .enumerate()
        .map(|(frame_idx, raw_frame)| convert_frame(frame_idx, raw_frame))
        .collect();

    let no_frames_degraded = converted.iter().filter(|c| c.frame_degraded).count();
    let no_records_degraded: usize = converted.iter().map(|c| c.no_records_degraded).sum();

    if no_frames_degraded > 0 || no_records_degraded > 0 {
        warn!(
            no_frames_degraded,
            no_records_degraded, "Dataset contains malformed entries, they are treated as missing"
        );
    }

    Ok(FrameSequence::new(
        converted.into_iter().map(|c| c.frame).collect(),
    ))
}

fn convert_frame(frame_idx: usize, raw_frame: Value) -> ConvertedFrame {
    let raw_frame: RawFrame = match serde_json::from_value(raw_frame) {
        Ok(raw_frame) => raw_frame,
        Err(err) => {
            debug!(frame_idx, %err, "Malformed frame, using an empty frame instead");
            return ConvertedFrame {
                frame: Frame::default(),
                frame_degraded: true,
                no_records_degraded: 0,
            };
        }
    };

    let time_delta = time_delta_to_string(raw_frame.time_delta);

    let raw_car_positions = match raw_frame.car_positions {
        Some(raw_car_positions) => raw_car_positions,
        None => {
            warn!(frame_idx, "Frame has no car positions");
            return ConvertedFrame {
                frame: Frame {
                    time_delta,
                    car_positions: HashMap::new(),
                },
                frame_degraded: false,
                no_records_degraded: 0,
            };
        }
    };

    if raw_car_positions.is_empty() {
        debug!(frame_idx, "Frame is empty");
    }

    // a later record of the same car overwrites an earlier one
    let mut car_positions = HashMap::with_capacity(raw_car_positions.len());
    let mut no_records_degraded = 0;

    for raw_car_position in raw_car_positions {
        match serde_json::from_value::<RawCarPosition>(raw_car_position) {
            Ok(rec) => {
                car_positions.insert(rec.driver, Position::new(rec.pos_x, rec.pos_y, rec.pos_z));
            }
            Err(err) => {
                debug!(frame_idx, %err, "Skipping malformed car position");
                no_records_degraded += 1;
            }
        }
    }

    ConvertedFrame {
        frame: Frame {
            time_delta,
            car_positions,
        },
        frame_degraded: false,
        no_records_degraded,
    }
}

/// time_delta_to_string keeps the informational time delta as text. Values of any other JSON type
/// are kept in their JSON notation, such that they never invalidate the frame.
fn time_delta_to_string(time_delta: Option<Value>) -> String {
    match time_delta {
        Some(Value::String(time_delta)) => time_delta,
        Some(time_delta) => time_delta.to_string(),
        None => String::new(),
    }
}

/// DatasetLoader loads datasets and keeps the last successfully loaded one such that loading the
/// same file again does not parse it again.
#[derive(Debug, Default)]
pub struct DatasetLoader {
    cache: Option<(PathBuf, Arc<FrameSequence>)>,
}

impl DatasetLoader {
    pub fn new() -> DatasetLoader {
        DatasetLoader::default()
    }

    /// The method returns the frame sequence of the given dataset file. Errors are logged once
    /// and returned to the caller, which decides whether to abort.
    pub fn load(&mut self, filepath: &Path) -> Result<Arc<FrameSequence>, LoadError> {
        if let Some((cached_path, frames)) = &self.cache {
            if cached_path == filepath {
                debug!(path = %filepath.display(), "Using cached dataset");
                return Ok(Arc::clone(frames));
            }
        }

        match load_frames(filepath) {
            Ok(frames) => {
                info!(
                    path = %filepath.display(),
                    no_frames = frames.len(),
                    "Loaded race data"
                );
                let frames = Arc::new(frames);
                self.cache = Some((filepath.to_owned(), Arc::clone(&frames)));
                Ok(frames)
            }
            Err(err) => {
                error!(path = %filepath.display(), error = ?err, "Could not load race data");
                Err(err)
            }
        }
    }

    /// Same as `load` but falls back to an empty frame sequence, which the scheduler refuses to
    /// play.
    pub fn load_or_empty(&mut self, filepath: &Path) -> Arc<FrameSequence> {
        self.load(filepath)
            .unwrap_or_else(|_| Arc::new(FrameSequence::default()))
    }
}

//! mkv-enhance Library
//!
//! Adds a louder stereo downmix next to every audio track of an MKV file by
//! driving ffprobe and ffmpeg as external processes: list the tracks, encode
//! one side-car per track in parallel, remux originals and side-cars
//! interleaved, then delete the side-cars.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{PipelineReport, TrackCatalog, TrackDescriptor, TrackOutcome, TrackReport};
pub use error::{EnhanceError, EnhanceResult};

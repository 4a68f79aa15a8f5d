use std::path::PathBuf;

use thiserror::Error;

/// Stage-level failures of the merge and recompression pipeline.
///
/// Domain traits keep `Box<dyn std::error::Error>` at their seams; the use
/// cases and the configuration layer construct these variants, which box
/// transparently into the seam type. `SourceOpen` is recoverable at file
/// granularity inside the merge frame loop and fatal everywhere else.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("unsupported container format '{0}' (expected mp4 or avi)")]
    UnsupportedFormat(String),

    #[error("unknown compression level '{0}' (expected low, medium or high)")]
    UnknownCompressionLevel(String),

    #[error("no supported video files to merge")]
    NoInputFiles,

    #[error("could not open source {path}: {reason}")]
    SourceOpen { path: PathBuf, reason: String },

    #[error("could not create sink {path}: {reason}")]
    SinkOpen { path: PathBuf, reason: String },

    #[error("frame rate must be positive, got {0}")]
    InvalidFrameRate(f64),
}

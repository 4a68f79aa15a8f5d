use std::path::PathBuf;

use crate::shared::compression_level::CompressionLevel;
use crate::shared::container_format::ContainerFormat;

/// Immutable per-run parameters for the merge-then-recompress pipeline.
///
/// Callers validate the raw strings (directory exists, format and level
/// parse) before constructing this; the enums make invalid values
/// unrepresentable past that point.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Directory scanned for input videos.
    pub directory: PathBuf,
    /// Output file name, without extension.
    pub output_base: String,
    pub format: ContainerFormat,
    pub level: CompressionLevel,
}

impl PipelineConfig {
    /// Path of the merge stage's output: `<output_base>.<format>`.
    pub fn merge_output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.output_base, self.format.extension()))
    }
}

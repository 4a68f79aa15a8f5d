use std::str::FromStr;

use crate::shared::error::StageError;

/// Named compression presets, each mapping to a fixed spatial scale
/// factor applied to both axes during recompression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionLevel {
    Low,
    Medium,
    High,
}

impl CompressionLevel {
    /// Scale factor for this level. `Low` leaves dimensions unchanged.
    pub fn factor(self) -> f64 {
        match self {
            CompressionLevel::Low => 1.0,
            CompressionLevel::Medium => 0.5,
            CompressionLevel::High => 0.2,
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(CompressionLevel::Low),
            "medium" => Ok(CompressionLevel::Medium),
            "high" => Ok(CompressionLevel::High),
            other => Err(StageError::UnknownCompressionLevel(other.to_string())),
        }
    }
}

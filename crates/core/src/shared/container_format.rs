use std::fmt;
use std::str::FromStr;

use crate::shared::error::StageError;

/// The two output container formats the merge stage supports.
///
/// Anything else is rejected while parsing configuration, before any file
/// is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerFormat {
    Mp4,
    Avi,
}

impl ContainerFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::Avi => "avi",
        }
    }

    /// Four-character code of the encoder used inside this container.
    pub fn fourcc(self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4v",
            ContainerFormat::Avi => "XVID",
        }
    }
}

impl FromStr for ContainerFormat {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp4" => Ok(ContainerFormat::Mp4),
            "avi" => Ok(ContainerFormat::Avi),
            other => Err(StageError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

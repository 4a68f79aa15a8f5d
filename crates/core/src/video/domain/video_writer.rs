use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Write-only target that serializes frames into a container file.
///
/// The sink's geometry, frame rate and codec are fixed by the metadata
/// passed to `open`; every written frame is expected to match that
/// geometry. Nothing hits disk durably until `close` flushes the encoder
/// and writes the container trailer.
pub trait VideoWriter: Send {
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes and finalizes the container. Safe to call when never
    /// opened, and idempotent.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

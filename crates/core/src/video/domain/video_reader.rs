use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Read-only cursor over a video file's frame sequence and header data.
///
/// A reader is reusable: the merge stage runs `open`/`close` cycles over
/// many files on a single instance, and the recompression stage opens the
/// same file twice (metadata probe, then frame pass).
pub trait VideoReader: Send {
    /// Opens a file and returns its probed metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Lazy iterator over frames in decode order. Exhaustion is the
    /// normal end of the stream, not an error.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases the decoder and any buffered state.
    fn close(&mut self);
}

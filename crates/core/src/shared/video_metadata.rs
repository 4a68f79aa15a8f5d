use std::path::PathBuf;

/// Header data probed from a video file, or declared for a sink.
///
/// `total_frames` is advisory: containers may over- or under-report, so it
/// is used only for progress totals. Actual delivery may end earlier.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    /// Codec identifier: a four-character code (`mp4v`, `XVID`) or an
    /// ffmpeg codec name (`mpeg4`, `h264`).
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Geometry after scaling both axes by `factor`, rounded to the
    /// nearest pixel. `factor` = 1.0 returns the original dimensions
    /// exactly; factors above 1.0 upscale.
    pub fn scaled_dimensions(&self, factor: f64) -> (u32, u32) {
        (
            (self.width as f64 * factor).round() as u32,
            (self.height as f64 * factor).round() as u32,
        )
    }
}

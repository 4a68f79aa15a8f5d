use std::path::{Path, PathBuf};

use crate::pipeline::progress_reporter::ProgressReporter;
use crate::shared::constants::COMPRESSED_SUFFIX;
use crate::shared::error::StageError;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_scaler::FrameScaler;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Result of a recompression run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressOutcome {
    pub output_path: PathBuf,
    pub frames_written: usize,
    pub width: u32,
    pub height: u32,
}

/// Rewrites a video with both axes scaled by a factor.
///
/// Runs two independent passes over the source: a metadata probe, so the
/// sink can be created with the final scaled geometry before the first
/// frame is written, then the full decode pass. The sink reuses the
/// source's own codec and frame rate.
pub struct CompressVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    scaler: Box<dyn FrameScaler>,
    progress: Box<dyn ProgressReporter>,
}

impl CompressVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        scaler: Box<dyn FrameScaler>,
        progress: Box<dyn ProgressReporter>,
    ) -> Self {
        Self {
            reader,
            writer,
            scaler,
            progress,
        }
    }

    /// Factors in (0, 1] shrink; factors above 1 are not rejected and
    /// upscale.
    pub fn execute(
        &mut self,
        input: &Path,
        factor: f64,
    ) -> Result<CompressOutcome, Box<dyn std::error::Error>> {
        // Pass 1: metadata probe. There is no fallback source, so a
        // failure here is fatal.
        let source = self.reader.open(input).map_err(|e| StageError::SourceOpen {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.reader.close();

        let (width, height) = source.scaled_dimensions(factor);
        let output_path = compressed_output_path(input);

        let sink_meta = VideoMetadata {
            width,
            height,
            fps: source.fps,
            total_frames: source.total_frames,
            codec: source.codec.clone(),
            source_path: None,
        };
        self.writer
            .open(&output_path, &sink_meta)
            .map_err(|e| StageError::SinkOpen {
                path: output_path.clone(),
                reason: e.to_string(),
            })?;

        // Pass 2: reopen the same file for the frame walk.
        if let Err(e) = self.reader.open(input) {
            let _ = self.writer.close();
            return Err(StageError::SourceOpen {
                path: input.to_path_buf(),
                reason: e.to_string(),
            }
            .into());
        }

        self.progress.start(source.total_frames);
        let copy_result = self.copy_frames(width, height);

        self.reader.close();
        let close_result = self.writer.close();
        self.progress.finish();

        let frames_written = copy_result?;
        close_result?;

        Ok(CompressOutcome {
            output_path,
            frames_written,
            width,
            height,
        })
    }

    fn copy_frames(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let mut written = 0usize;
        for item in self.reader.frames() {
            let frame = match item {
                Ok(f) => f,
                Err(e) => {
                    // A mid-file read failure is end-of-stream here, not
                    // an error.
                    log::debug!("decode ended early: {e}");
                    break;
                }
            };
            let resized = self.scaler.scale(&frame, width, height)?;
            self.writer.write(&resized)?;
            self.progress.advance(1);
            written += 1;
        }
        Ok(written)
    }
}

/// Inserts the `_compressed` suffix before the extension:
/// `result.mp4` becomes `result_compressed.mp4`.
pub fn compressed_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => input.with_file_name(format!("{stem}{COMPRESSED_SUFFIX}.{ext}")),
        None => input.with_file_name(format!("{stem}{COMPRESSED_SUFFIX}")),
    }
}

use std::path::{Path, PathBuf};

use crate::pipeline::progress_reporter::ProgressReporter;
use crate::shared::error::StageError;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Result of a frame-rate conversion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetimeOutcome {
    pub output_path: PathBuf,
    pub frames_written: usize,
}

/// Rewrites a video at a different declared frame rate.
///
/// Frames are carried over unchanged and in order; only the pacing
/// changes, so the output plays faster or slower than the source.
pub struct RetimeVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    progress: Box<dyn ProgressReporter>,
}

impl RetimeVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        progress: Box<dyn ProgressReporter>,
    ) -> Self {
        Self {
            reader,
            writer,
            progress,
        }
    }

    pub fn execute(
        &mut self,
        input: &Path,
        target_fps: f64,
    ) -> Result<RetimeOutcome, Box<dyn std::error::Error>> {
        if target_fps.is_nan() || target_fps <= 0.0 {
            return Err(StageError::InvalidFrameRate(target_fps).into());
        }

        let source = self.reader.open(input).map_err(|e| StageError::SourceOpen {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.reader.close();

        let output_path = retimed_output_path(input, target_fps);

        let sink_meta = VideoMetadata {
            width: source.width,
            height: source.height,
            fps: target_fps,
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

        if let Err(e) = self.reader.open(input) {
            let _ = self.writer.close();
            return Err(StageError::SourceOpen {
                path: input.to_path_buf(),
                reason: e.to_string(),
            }
            .into());
        }

        self.progress.start(source.total_frames);
        let copy_result = self.copy_frames();

        self.reader.close();
        let close_result = self.writer.close();
        self.progress.finish();

        let frames_written = copy_result?;
        close_result?;

        Ok(RetimeOutcome {
            output_path,
            frames_written,
        })
    }

    fn copy_frames(&mut self) -> Result<usize, Box<dyn std::error::Error>> {
        let mut written = 0usize;
        for item in self.reader.frames() {
            let frame = match item {
                Ok(f) => f,
                Err(e) => {
                    log::debug!("decode ended early: {e}");
                    break;
                }
            };
            self.writer.write(&frame)?;
            self.progress.advance(1);
            written += 1;
        }
        Ok(written)
    }
}

/// `clip.mp4` at 24 fps becomes `clip_fps_24.mp4`. Integral rates are
/// written without a decimal point.
pub fn retimed_output_path(input: &Path, target_fps: f64) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let rate = if target_fps.fract() == 0.0 {
        format!("{target_fps:.0}")
    } else {
        format!("{target_fps}")
    };
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => input.with_file_name(format!("{stem}_fps_{rate}.{ext}")),
        None => input.with_file_name(format!("{stem}_fps_{rate}")),
    }
}

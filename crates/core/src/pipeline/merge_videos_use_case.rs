use std::path::{Path, PathBuf};

use crate::pipeline::progress_reporter::ProgressReporter;
use crate::shared::container_format::ContainerFormat;
use crate::shared::error::StageError;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Per-file result of a merge run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// Every readable frame was copied into the sink.
    Merged { frames: usize },
    /// The file could not be opened and contributed nothing.
    Skipped { reason: String },
}

/// What happened to each input, in input-list order, plus the total
/// number of frames that reached the sink.
#[derive(Clone, Debug, Default)]
pub struct MergeReport {
    pub outcomes: Vec<(PathBuf, FileOutcome)>,
    pub frames_written: usize,
}

impl MergeReport {
    pub fn merged_files(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Merged { .. }))
            .count()
    }

    pub fn skipped_files(&self) -> usize {
        self.outcomes.len() - self.merged_files()
    }
}

/// Concatenates a list of video files into one output stream.
///
/// The sink's geometry and frame rate come from the first input; later
/// files are written as-is, without resizing, so feeding mixed
/// resolutions produces clipped output (a known limitation). A file
/// that fails to open is skipped and recorded; the rest of the list
/// still merges.
pub struct MergeVideosUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    progress: Box<dyn ProgressReporter>,
}

impl MergeVideosUseCase {
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
        inputs: &[PathBuf],
        output_path: &Path,
        format: ContainerFormat,
    ) -> Result<MergeReport, Box<dyn std::error::Error>> {
        if inputs.is_empty() {
            return Err(StageError::NoInputFiles.into());
        }

        // Reference geometry comes from the first input. Skip-and-continue
        // only applies once the sink exists, so a probe failure here is
        // fatal.
        let first = &inputs[0];
        let reference = self.reader.open(first).map_err(|e| StageError::SourceOpen {
            path: first.clone(),
            reason: e.to_string(),
        })?;
        self.reader.close();

        let total = self.advisory_total(inputs);

        let sink_meta = VideoMetadata {
            width: reference.width,
            height: reference.height,
            fps: reference.fps,
            total_frames: total,
            codec: format.fourcc().to_string(),
            source_path: None,
        };
        self.writer
            .open(output_path, &sink_meta)
            .map_err(|e| StageError::SinkOpen {
                path: output_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        self.progress.start(total);
        let mut report = MergeReport::default();
        let copy_result = self.copy_all(inputs, &mut report);

        // Release everything before surfacing any error: the sink must be
        // flushed even when files were skipped or a write failed.
        self.reader.close();
        let close_result = self.writer.close();
        self.progress.finish();

        copy_result?;
        close_result?;
        Ok(report)
    }

    /// Sum of every input's advisory frame count. Files that cannot be
    /// probed contribute zero.
    fn advisory_total(&mut self, inputs: &[PathBuf]) -> usize {
        let mut total = 0;
        for path in inputs {
            if let Ok(meta) = self.reader.open(path) {
                total += meta.total_frames;
            }
            self.reader.close();
        }
        total
    }

    fn copy_all(
        &mut self,
        inputs: &[PathBuf],
        report: &mut MergeReport,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for path in inputs {
            if let Err(e) = self.reader.open(path) {
                log::warn!("skipping {}: {e}", path.display());
                report.outcomes.push((
                    path.clone(),
                    FileOutcome::Skipped {
                        reason: e.to_string(),
                    },
                ));
                continue;
            }

            let mut frames = 0usize;
            let mut write_failure = None;
            for item in self.reader.frames() {
                let frame = match item {
                    Ok(f) => f,
                    Err(e) => {
                        // Decode trouble mid-file is end-of-stream for
                        // that file, not a stage failure.
                        log::debug!("decode ended early for {}: {e}", path.display());
                        break;
                    }
                };
                if let Err(e) = self.writer.write(&frame) {
                    write_failure = Some(e);
                    break;
                }
                self.progress.advance(1);
                frames += 1;
            }
            self.reader.close();

            if let Some(e) = write_failure {
                // A failing sink is a stage failure; the caller flushes.
                return Err(e);
            }

            report
                .outcomes
                .push((path.clone(), FileOutcome::Merged { frames }));
            report.frames_written += frames;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    #[derive(Default)]
    struct ReaderState {
        opened: Vec<PathBuf>,
        open_now: usize,
    }

    struct StubReader {
        files: HashMap<PathBuf, Vec<Frame>>,
        fail: HashSet<PathBuf>,
        decode_error_after: HashMap<PathBuf, usize>,
        current: Vec<Result<Frame, String>>,
        state: Arc<Mutex<ReaderState>>,
    }

    impl StubReader {
        fn new(files: Vec<(&str, Vec<Frame>)>) -> Self {
            Self {
                files: files
                    .into_iter()
                    .map(|(p, f)| (PathBuf::from(p), f))
                    .collect(),
                fail: HashSet::new(),
                decode_error_after: HashMap::new(),
                current: Vec::new(),
                state: Arc::new(Mutex::new(ReaderState::default())),
            }
        }

        fn failing_on(mut self, path: &str) -> Self {
            self.fail.insert(PathBuf::from(path));
            self
        }

        /// After `n` good frames, `path`'s stream yields a decode error.
        fn decode_error_after(mut self, path: &str, n: usize) -> Self {
            self.decode_error_after.insert(PathBuf::from(path), n);
            self
        }
    }

    impl VideoReader for StubReader {
        fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            let mut state = self.state.lock().unwrap();
            state.opened.push(path.to_path_buf());
            if self.fail.contains(path) {
                return Err(format!("cannot open {}", path.display()).into());
            }
            state.open_now += 1;
            let frames = self.files.get(path).cloned().unwrap_or_default();
            let meta = VideoMetadata {
                width: frames.first().map(|f| f.width()).unwrap_or(64),
                height: frames.first().map(|f| f.height()).unwrap_or(48),
                fps: 30.0,
                total_frames: frames.len(),
                codec: "mpeg4".to_string(),
                source_path: Some(path.to_path_buf()),
            };
            self.current = frames.into_iter().map(Ok).collect();
            if let Some(&n) = self.decode_error_after.get(path) {
                self.current.truncate(n);
                self.current.push(Err("corrupt packet".to_string()));
            }
            Ok(meta)
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(
                self.current
                    .drain(..)
                    .map(|item| item.map_err(|e| e.into())),
            )
        }

        fn close(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.open_now = state.open_now.saturating_sub(1);
            self.current.clear();
        }
    }

    #[derive(Default)]
    struct WriterState {
        opened_with: Option<(PathBuf, VideoMetadata)>,
        written: Vec<Frame>,
        closed: bool,
    }

    #[derive(Default)]
    struct StubWriter {
        state: Arc<Mutex<WriterState>>,
        fail_open: bool,
        fail_write_after: Option<usize>,
    }

    impl VideoWriter for StubWriter {
        fn open(
            &mut self,
            path: &Path,
            metadata: &VideoMetadata,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_open {
                return Err("sink unwritable".into());
            }
            self.state.lock().unwrap().opened_with =
                Some((path.to_path_buf(), metadata.clone()));
            Ok(())
        }

        fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            let mut state = self.state.lock().unwrap();
            if let Some(limit) = self.fail_write_after {
                if state.written.len() >= limit {
                    return Err("encoder rejected frame".into());
                }
            }
            state.written.push(frame.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            self.state.lock().unwrap().closed = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct ProgressState {
        started_with: Option<usize>,
        advanced: usize,
        finishes: usize,
    }

    #[derive(Default)]
    struct StubProgress {
        state: Arc<Mutex<ProgressState>>,
    }

    impl ProgressReporter for StubProgress {
        fn start(&mut self, total: usize) {
            self.state.lock().unwrap().started_with = Some(total);
        }

        fn advance(&mut self, n: usize) {
            self.state.lock().unwrap().advanced += n;
        }

        fn finish(&mut self) {
            self.state.lock().unwrap().finishes += 1;
        }
    }

    // --- Helpers ---

    fn make_frame(index: usize, value: u8) -> Frame {
        Frame::new(vec![value; 64 * 48 * 3], 64, 48, 3, index)
    }

    fn make_frames(count: usize, value: u8) -> Vec<Frame> {
        (0..count).map(|i| make_frame(i, value)).collect()
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(*n)).collect()
    }

    fn use_case(
        reader: StubReader,
        writer: StubWriter,
        progress: StubProgress,
    ) -> MergeVideosUseCase {
        MergeVideosUseCase::new(Box::new(reader), Box::new(writer), Box::new(progress))
    }

    // --- Tests ---

    #[test]
    fn test_merges_all_files_in_list_order() {
        let reader = StubReader::new(vec![
            ("/in/a.mp4", make_frames(2, 10)),
            ("/in/b.mp4", make_frames(3, 20)),
        ]);
        let writer = StubWriter::default();
        let written = writer.state.clone();

        let report = use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/a.mp4", "/in/b.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.written.len(), 5);
        let values: Vec<u8> = written.written.iter().map(|f| f.data()[0]).collect();
        assert_eq!(values, vec![10, 10, 20, 20, 20]);
        assert_eq!(report.frames_written, 5);
        assert_eq!(report.merged_files(), 2);
    }

    #[test]
    fn test_single_file_is_passthrough() {
        let frames = make_frames(4, 77);
        let reader = StubReader::new(vec![("/in/only.mp4", frames.clone())]);
        let writer = StubWriter::default();
        let state = writer.state.clone();

        use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/only.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.written.len(), 4);
        for (written, original) in state.written.iter().zip(&frames) {
            assert_eq!(written.data(), original.data());
            assert_eq!(written.index(), original.index());
        }
    }

    #[test]
    fn test_sink_geometry_and_codec_from_first_file_and_format() {
        let reader = StubReader::new(vec![("/in/a.mp4", make_frames(1, 1))]);
        let writer = StubWriter::default();
        let state = writer.state.clone();

        use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/a.mp4"]),
                Path::new("/out/result.avi"),
                ContainerFormat::Avi,
            )
            .unwrap();

        let state = state.lock().unwrap();
        let (path, meta) = state.opened_with.clone().unwrap();
        assert_eq!(path, PathBuf::from("/out/result.avi"));
        assert_eq!((meta.width, meta.height), (64, 48));
        assert_eq!(meta.codec, "XVID");
    }

    #[test]
    fn test_empty_input_list_reports_no_input_files() {
        let reader = StubReader::new(vec![]);
        let writer = StubWriter::default();
        let state = writer.state.clone();

        let err = use_case(reader, writer, StubProgress::default())
            .execute(&[], Path::new("/out/result.mp4"), ContainerFormat::Mp4)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StageError>(),
            Some(StageError::NoInputFiles)
        ));
        // No sink may be created.
        assert!(state.lock().unwrap().opened_with.is_none());
    }

    #[test]
    fn test_unopenable_middle_file_is_skipped() {
        let reader = StubReader::new(vec![
            ("/in/1.mp4", make_frames(2, 1)),
            ("/in/2.mp4", make_frames(2, 2)),
            ("/in/3.mp4", make_frames(2, 3)),
        ])
        .failing_on("/in/2.mp4");
        let writer = StubWriter::default();
        let state = writer.state.clone();

        let report = use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/1.mp4", "/in/2.mp4", "/in/3.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap();

        let values: Vec<u8> = state
            .lock()
            .unwrap()
            .written
            .iter()
            .map(|f| f.data()[0])
            .collect();
        assert_eq!(values, vec![1, 1, 3, 3]);

        assert_eq!(report.merged_files(), 2);
        assert_eq!(report.skipped_files(), 1);
        let (skipped_path, outcome) = &report.outcomes[1];
        assert_eq!(skipped_path, &PathBuf::from("/in/2.mp4"));
        assert!(matches!(
            outcome,
            FileOutcome::Skipped { reason } if reason.contains("/in/2.mp4")
        ));
    }

    #[test]
    fn test_first_file_probe_failure_is_fatal() {
        let reader = StubReader::new(vec![("/in/b.mp4", make_frames(2, 2))])
            .failing_on("/in/a.mp4");
        let writer = StubWriter::default();
        let state = writer.state.clone();

        let err = use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/a.mp4", "/in/b.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StageError>(),
            Some(StageError::SourceOpen { .. })
        ));
        assert!(state.lock().unwrap().opened_with.is_none());
    }

    #[test]
    fn test_progress_total_sums_advisory_counts() {
        let reader = StubReader::new(vec![
            ("/in/a.mp4", make_frames(3, 1)),
            ("/in/b.mp4", make_frames(4, 2)),
            ("/in/c.mp4", make_frames(5, 3)),
        ])
        .failing_on("/in/b.mp4");
        let progress = StubProgress::default();
        let state = progress.state.clone();

        use_case(reader, StubWriter::default(), progress)
            .execute(
                &paths(&["/in/a.mp4", "/in/b.mp4", "/in/c.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap();

        let state = state.lock().unwrap();
        // b fails its probe and contributes zero to the total.
        assert_eq!(state.started_with, Some(8));
        assert_eq!(state.advanced, 8);
        assert_eq!(state.finishes, 1);
    }

    #[test]
    fn test_sink_open_failure_is_fatal_and_releases_sources() {
        let reader = StubReader::new(vec![("/in/a.mp4", make_frames(2, 1))]);
        let reader_state = reader.state.clone();
        let writer = StubWriter {
            fail_open: true,
            ..StubWriter::default()
        };

        let err = use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/a.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StageError>(),
            Some(StageError::SinkOpen { .. })
        ));
        assert_eq!(reader_state.lock().unwrap().open_now, 0);
    }

    #[test]
    fn test_sink_closed_even_when_files_were_skipped() {
        let reader = StubReader::new(vec![("/in/a.mp4", make_frames(1, 1))])
            .failing_on("/in/z.mp4");
        let writer = StubWriter::default();
        let state = writer.state.clone();

        use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/a.mp4", "/in/z.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap();

        assert!(state.lock().unwrap().closed);
    }

    #[test]
    fn test_write_failure_aborts_but_flushes_sink() {
        let reader = StubReader::new(vec![("/in/a.mp4", make_frames(5, 1))]);
        let reader_state = reader.state.clone();
        let writer = StubWriter {
            fail_write_after: Some(2),
            ..StubWriter::default()
        };
        let writer_state = writer.state.clone();
        let progress = StubProgress::default();
        let progress_state = progress.state.clone();

        let result = use_case(reader, writer, progress).execute(
            &paths(&["/in/a.mp4"]),
            Path::new("/out/result.mp4"),
            ContainerFormat::Mp4,
        );

        assert!(result.is_err());
        assert!(writer_state.lock().unwrap().closed);
        assert_eq!(reader_state.lock().unwrap().open_now, 0);
        assert_eq!(progress_state.lock().unwrap().finishes, 1);
    }

    #[test]
    fn test_decode_error_mid_file_ends_that_file_only() {
        let reader = StubReader::new(vec![
            ("/in/a.mp4", make_frames(3, 5)),
            ("/in/b.mp4", make_frames(2, 9)),
        ])
        .decode_error_after("/in/a.mp4", 1);
        let writer = StubWriter::default();
        let state = writer.state.clone();

        let report = use_case(reader, writer, StubProgress::default())
            .execute(
                &paths(&["/in/a.mp4", "/in/b.mp4"]),
                Path::new("/out/result.mp4"),
                ContainerFormat::Mp4,
            )
            .unwrap();

        // File a ends at the error; file b still merges in full.
        let values: Vec<u8> = state
            .lock()
            .unwrap()
            .written
            .iter()
            .map(|f| f.data()[0])
            .collect();
        assert_eq!(values, vec![5, 9, 9]);
        assert_eq!(report.frames_written, 3);
    }
}

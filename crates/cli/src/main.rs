use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};

use clipmerge_core::discovery;
use clipmerge_core::pipeline::compress_video_use_case::CompressVideoUseCase;
use clipmerge_core::pipeline::merge_videos_use_case::{FileOutcome, MergeVideosUseCase};
use clipmerge_core::pipeline::progress_reporter::LogProgressReporter;
use clipmerge_core::pipeline::retime_video_use_case::RetimeVideoUseCase;
use clipmerge_core::shared::compression_level::CompressionLevel;
use clipmerge_core::shared::container_format::ContainerFormat;
use clipmerge_core::shared::error::StageError;
use clipmerge_core::shared::pipeline_config::PipelineConfig;
use clipmerge_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use clipmerge_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use clipmerge_core::video::infrastructure::swscale_frame_scaler::SwscaleFrameScaler;

const PROGRESS_THROTTLE: usize = 25;

/// Merge directories of videos into one file and recompress the result.
#[derive(Parser)]
#[command(name = "clipmerge")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge every recognized video in a directory, then recompress.
    Merge {
        /// Directory containing the input videos.
        directory: PathBuf,

        /// Output file name, without extension.
        #[arg(long, default_value = "merged")]
        output: String,

        /// Output container format: mp4 or avi.
        #[arg(long, default_value = "mp4")]
        format: String,

        /// Compression level: low, medium or high.
        #[arg(long, default_value = "medium")]
        level: String,
    },

    /// Rewrite a single video at a different frame rate.
    Retime {
        /// Input video file.
        input: PathBuf,

        /// Target frame rate in frames per second.
        #[arg(long)]
        fps: f64,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Merge {
            directory,
            output,
            format,
            level,
        } => run_merge(&directory, &output, &format, &level),
        Command::Retime { input, fps } => run_retime(&input, fps),
    }
}

fn run_merge(
    directory: &Path,
    output: &str,
    format: &str,
    level: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Configuration is validated in full before any file is opened.
    if !directory.is_dir() {
        return Err(format!("not a directory: {}", directory.display()).into());
    }
    let config = PipelineConfig {
        directory: directory.to_path_buf(),
        output_base: output.to_string(),
        format: format.parse::<ContainerFormat>()?,
        level: level.parse::<CompressionLevel>()?,
    };

    let inputs = discovery::scan_directory(&config.directory)?;
    if inputs.is_empty() {
        return Err(StageError::NoInputFiles.into());
    }
    log::info!(
        "Found {} video file(s) in {}",
        inputs.len(),
        config.directory.display()
    );

    let started = Instant::now();

    let merged_path = config.merge_output_path();
    let mut merge = MergeVideosUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        Box::new(LogProgressReporter::new("Merging videos", PROGRESS_THROTTLE)),
    );
    let report = merge.execute(&inputs, &merged_path, config.format)?;

    for (path, outcome) in &report.outcomes {
        if let FileOutcome::Skipped { reason } = outcome {
            log::warn!("skipped {}: {reason}", path.display());
        }
    }
    log::info!(
        "Merged video saved as {} ({} files, {} frames, {} skipped)",
        merged_path.display(),
        report.merged_files(),
        report.frames_written,
        report.skipped_files()
    );

    // The merge sink is closed and flushed before this point; the
    // compressor reopens the same path for reading.
    let mut compress = CompressVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        Box::new(SwscaleFrameScaler::new()),
        Box::new(LogProgressReporter::new(
            "Compressing video",
            PROGRESS_THROTTLE,
        )),
    );
    let outcome = compress.execute(&merged_path, config.level.factor())?;
    log::info!(
        "Compressed video saved as {} ({}x{})",
        outcome.output_path.display(),
        outcome.width,
        outcome.height
    );

    log::info!("Elapsed time: {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn run_retime(input: &Path, fps: f64) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(format!("input file not found: {}", input.display()).into());
    }

    let started = Instant::now();

    let mut retime = RetimeVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        Box::new(LogProgressReporter::new("Retiming video", PROGRESS_THROTTLE)),
    );
    let outcome = retime.execute(input, fps)?;
    log::info!(
        "Output saved as {} ({} frames)",
        outcome.output_path.display(),
        outcome.frames_written
    );

    log::info!("Elapsed time: {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}

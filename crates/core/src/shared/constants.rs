/// Input container extensions recognized by directory discovery.
///
/// Matching is case-sensitive; `AVI` is the one uppercase spelling
/// accepted.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "AVI"];

/// Suffix inserted before the extension of a recompressed file.
pub const COMPRESSED_SUFFIX: &str = "_compressed";

/// Frame rate used when a source reports a non-positive rate.
pub const FALLBACK_FPS: i32 = 30;

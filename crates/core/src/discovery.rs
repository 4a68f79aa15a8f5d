use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::VIDEO_EXTENSIONS;

/// Lists the recognized video files directly inside `dir`.
///
/// Extensions are matched case-sensitively against [`VIDEO_EXTENSIONS`].
/// The result keeps whatever order the directory listing returns; it is
/// not sorted, so merge order across runs is not guaranteed.
pub fn scan_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_video_extension(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

use std::path::{Path, PathBuf};
use tracing::error;

use crate::error::{Result, SubtitlerError};

/// Suffix appended to the input stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_subtitled";

/// Check that `path` exists and is a regular file.
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    if !path.exists() {
        error!("File not found: {}", path.display());
        return Err(SubtitlerError::NotFound(path.display().to_string()));
    }

    if !path.is_file() {
        error!("Not a file: {}", path.display());
        return Err(SubtitlerError::Validation(format!("Not a file: {}", path.display())));
    }

    Ok(path.to_path_buf())
}

/// `dir/movie.mp4` -> `dir/movie<suffix>.mp4`
pub fn with_stem_suffix<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
    let path = path.as_ref();
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    path.with_file_name(file_name)
}

pub fn default_output_path<P: AsRef<Path>>(video_path: P) -> PathBuf {
    with_stem_suffix(video_path, OUTPUT_SUFFIX)
}

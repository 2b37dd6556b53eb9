use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::SubtitleEntry;
use crate::error::Result;

/// Render entries as SRT text.
///
/// Entries are numbered by position regardless of their stored index. A
/// single blank line separates entries; none follows the last one.
pub fn format_srt(entries: &[SubtitleEntry]) -> String {
    let mut srt_content = String::new();

    for (position, entry) in entries.iter().enumerate() {
        if position > 0 {
            srt_content.push('\n');
        }
        srt_content.push_str(&format!(
            "{}\n{} --> {}\n{}\n",
            position + 1,
            entry.start_time,
            entry.end_time,
            entry.text
        ));
    }

    srt_content
}

/// Renumber `entries` to 1..N and write them to `output_path` as UTF-8 SRT.
pub async fn write_srt<P: AsRef<Path>>(entries: &mut [SubtitleEntry], output_path: P) -> Result<PathBuf> {
    let output_path = output_path.as_ref();
    info!("Writing {} subtitle entries to {}", entries.len(), output_path.display());

    for (position, entry) in entries.iter_mut().enumerate() {
        entry.index = position as u32 + 1;
    }

    fs::write(output_path, format_srt(entries)).await?;

    info!("Successfully wrote subtitle file: {}", output_path.display());
    Ok(output_path.to_path_buf())
}

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokio::fs;
use tracing::{debug, info, warn};

use super::{SubtitleEntry, Timestamp};
use crate::error::{Result, SubtitlerError};
use crate::paths::validate_file;

static TIMING_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2,}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2,}:[0-9]{2}:[0-9]{2},[0-9]{3})")
        .expect("timing line pattern is valid")
});

/// Where the parser is within the current subtitle block
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    ExpectIndex,
    ExpectTimestamp {
        index: u32,
    },
    Text {
        index: u32,
        start: Timestamp,
        end: Timestamp,
        lines: Vec<String>,
    },
}

impl ParserState {
    /// Consume one trimmed line and return the next state.
    fn step(self, line: &str, entries: &mut Vec<SubtitleEntry>) -> Result<Self> {
        match self {
            ParserState::ExpectIndex if line.is_empty() => Ok(ParserState::ExpectIndex),
            ParserState::ExpectIndex => {
                let index = line
                    .parse::<u32>()
                    .map_err(|_| SubtitlerError::parse("Invalid subtitle index", line))?;
                Ok(ParserState::ExpectTimestamp { index })
            }
            ParserState::ExpectTimestamp { index } if line.is_empty() => {
                Ok(ParserState::ExpectTimestamp { index })
            }
            ParserState::ExpectTimestamp { index } => {
                let (start, end) = parse_timing_line(line)?;
                Ok(ParserState::Text {
                    index,
                    start,
                    end,
                    lines: Vec::new(),
                })
            }
            state @ ParserState::Text { .. } if line.is_empty() => Ok(state.close(entries)),
            ParserState::Text {
                index,
                start,
                end,
                mut lines,
            } => {
                lines.push(line.to_string());
                Ok(ParserState::Text {
                    index,
                    start,
                    end,
                    lines,
                })
            }
        }
    }

    /// Emit the pending entry, if any, and start over.
    ///
    /// Shared by the blank-line and end-of-input paths.
    fn close(self, entries: &mut Vec<SubtitleEntry>) -> Self {
        match self {
            ParserState::Text {
                index,
                start,
                end,
                lines,
            } => {
                if lines.is_empty() {
                    warn!("Skipping subtitle {} without text ({} --> {})", index, start, end);
                } else {
                    entries.push(SubtitleEntry::new(index, start, end, lines.join("\n")));
                }
            }
            ParserState::ExpectTimestamp { index } => {
                warn!("Unexpected end of subtitle {} before its timestamp line", index);
            }
            ParserState::ExpectIndex => {}
        }
        ParserState::ExpectIndex
    }
}

fn parse_timing_line(line: &str) -> Result<(Timestamp, Timestamp)> {
    let caps = TIMING_LINE_REGEX
        .captures(line)
        .ok_or_else(|| SubtitlerError::parse("Invalid timestamp format", line))?;

    Ok((caps[1].parse()?, caps[2].parse()?))
}

/// Parse SRT formatted text into entries, in file order.
pub fn parse_srt(content: &str) -> Result<Vec<SubtitleEntry>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut entries = Vec::new();
    let mut state = ParserState::ExpectIndex;

    for (line_number, raw) in content.lines().enumerate() {
        state = state.step(raw.trim(), &mut entries).inspect_err(|e| {
            debug!("SRT parse failed at line {}: {}", line_number + 1, e);
        })?;
    }
    state.close(&mut entries);

    Ok(entries)
}

/// Read and parse an SRT file
pub async fn read_srt<P: AsRef<Path>>(path: P) -> Result<Vec<SubtitleEntry>> {
    let path = validate_file(path)?;
    info!("Parsing SRT file: {}", path.display());

    let content = fs::read_to_string(&path).await?;
    let entries = parse_srt(&content)?;

    info!("Parsed {} subtitle entries", entries.len());
    Ok(entries)
}

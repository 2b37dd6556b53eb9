// SRT subtitle handling
//
// - parser: line state machine turning SRT text into entries
// - writer: serializes entries back to SRT with contiguous numbering
// - timing: offset/scale transform over entry timestamps

pub mod parser;
pub mod timing;
pub mod writer;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SubtitlerError};

pub use parser::{parse_srt, read_srt};
pub use timing::{adjust_timing, TimingAdjustment};
pub use writer::{format_srt, write_srt};

static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2,}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").expect("timestamp pattern is valid")
});

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_HOUR: u64 = 3_600_000;

/// Offset from the start of the media, with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Self(((hours * 3600 + minutes * 60 + seconds) * MILLIS_PER_SECOND) + millis)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    /// Renders as `HH:MM:SS,mmm`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / MILLIS_PER_HOUR;
        let minutes = (self.0 % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let secs = (self.0 % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        let millis = self.0 % MILLIS_PER_SECOND;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }
}

impl FromStr for Timestamp {
    type Err = SubtitlerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SubtitlerError::parse("Invalid timestamp format", s);
        let caps = TIMESTAMP_REGEX.captures(s).ok_or_else(invalid)?;
        let part = |i: usize| caps[i].parse::<u64>().map_err(|_| invalid());

        let (minutes, secs, millis) = (part(2)?, part(3)?, part(4)?);
        // hours are unbounded in width
        part(1)?
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|ms| ms.checked_add(minutes * MILLIS_PER_MINUTE + secs * MILLIS_PER_SECOND + millis))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// One caption unit of an SRT file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    pub index: u32,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub text: String,
}

impl SubtitleEntry {
    pub fn new<S: Into<String>>(index: u32, start_time: Timestamp, end_time: Timestamp, text: S) -> Self {
        Self {
            index,
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Same caption with new timing; index and text are carried over.
    pub fn with_timing(&self, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            index: self.index,
            start_time,
            end_time,
            text: self.text.clone(),
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start_time, self.end_time)?;
        writeln!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(Timestamp::ZERO.to_string(), "00:00:00,000");
        assert_eq!(Timestamp::from_millis(65_123).to_string(), "00:01:05,123");
        assert_eq!(Timestamp::from_millis(3_661_500).to_string(), "01:01:01,500");
    }

    #[test]
    fn test_format_timestamp_past_99_hours() {
        let ts = Timestamp::from_parts(123, 4, 5, 6);
        assert_eq!(ts.to_string(), "123:04:05,006");
    }

    #[test]
    fn test_parse_timestamp() {
        let ts: Timestamp = "01:02:03,004".parse().unwrap();
        assert_eq!(ts.as_millis(), 3_723_004);
        assert_eq!(ts, Timestamp::from_parts(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_timestamp_rejects_loose_formats() {
        for input in ["1:02:03,004", "01:02:03.004", "01:02:03,04", "01:02:03", ""] {
            let err = input.parse::<Timestamp>().unwrap_err();
            assert!(matches!(err, SubtitlerError::Parse { .. }), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_timestamp_past_99_hours() {
        let ts: Timestamp = "120:00:00,000".parse().unwrap();
        assert_eq!(ts, Timestamp::from_parts(120, 0, 0, 0));
        assert_eq!(ts.to_string().parse::<Timestamp>().unwrap(), ts);
    }

    #[test]
    fn test_parse_timestamp_rejects_non_ascii_digits() {
        for input in ["\u{661}\u{660}:00:01,000", "00:00:01,\u{ff10}\u{ff10}\u{ff10}"] {
            let err = input.parse::<Timestamp>().unwrap_err();
            assert!(matches!(err, SubtitlerError::Parse { .. }), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_timestamp_overflowing_hours() {
        let err = "99999999999999999999:00:00,000".parse::<Timestamp>().unwrap_err();
        assert!(matches!(err, SubtitlerError::Parse { .. }));
    }

    #[test]
    fn test_entry_display() {
        let entry = SubtitleEntry::new(
            3,
            Timestamp::from_millis(1_000),
            Timestamp::from_millis(2_500),
            "Hello\nworld",
        );
        assert_eq!(entry.to_string(), "3\n00:00:01,000 --> 00:00:02,500\nHello\nworld\n");
    }
}

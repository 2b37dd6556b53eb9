use tracing::{info, warn};

use super::{SubtitleEntry, Timestamp};
use crate::error::{Result, SubtitlerError};

/// Offset and scale applied to every subtitle timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingAdjustment {
    pub offset_ms: i64,
    pub scale_factor: f64,
}

impl Default for TimingAdjustment {
    fn default() -> Self {
        Self {
            offset_ms: 0,
            scale_factor: 1.0,
        }
    }
}

impl TimingAdjustment {
    pub fn new(offset_ms: i64, scale_factor: f64) -> Result<Self> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(SubtitlerError::Validation(format!(
                "Scale factor must be a positive number, got {}",
                scale_factor
            )));
        }

        Ok(Self {
            offset_ms,
            scale_factor,
        })
    }

    pub fn is_identity(&self) -> bool {
        self.offset_ms == 0 && self.scale_factor == 1.0
    }

    /// `floor(t * scale) + offset`, clamped at zero
    pub fn apply_to(&self, timestamp: Timestamp) -> Timestamp {
        let scaled = (timestamp.as_millis() as f64 * self.scale_factor).floor() as i64;
        let shifted = scaled.saturating_add(self.offset_ms).max(0);

        Timestamp::from_millis(shifted as u64)
    }

    /// New entries with adjusted timing, in the same order.
    pub fn apply(&self, entries: &[SubtitleEntry]) -> Vec<SubtitleEntry> {
        info!(
            "Adjusting subtitle timing: offset={}ms, scale={}",
            self.offset_ms, self.scale_factor
        );

        let adjusted: Vec<SubtitleEntry> = entries
            .iter()
            .map(|entry| {
                let start = self.apply_to(entry.start_time);
                let end = self.apply_to(entry.end_time);
                if end < start {
                    warn!(
                        "Subtitle {} now ends before it starts ({} --> {})",
                        entry.index, start, end
                    );
                }
                entry.with_timing(start, end)
            })
            .collect();

        info!("Adjusted timing for {} subtitle entries", adjusted.len());
        adjusted
    }
}

/// Shift and scale every entry's timing. See [`TimingAdjustment::apply`].
pub fn adjust_timing(entries: &[SubtitleEntry], offset_ms: i64, scale_factor: f64) -> Vec<SubtitleEntry> {
    TimingAdjustment {
        offset_ms,
        scale_factor,
    }
    .apply(entries)
}

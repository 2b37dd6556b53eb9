// Media processing on top of ffmpeg
//
// - commands: ffmpeg command builders
// - processor: executes the built commands through a ProcessExecutor
// - style: burn-in appearance (alignment and color tables)

pub mod commands;
pub mod processor;
pub mod style;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use commands::*;
pub use processor::*;
pub use style::*;

use crate::config::MediaConfig;
use crate::error::Result;
use crate::process::ProcessExecutor;

#[async_trait]
pub trait MediaProcessorTrait: Send + Sync {
    /// Extract a PCM WAV track from `video_path` into `audio_path`
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path, format: AudioFormat) -> Result<PathBuf>;

    /// Render `subtitle_path` into the picture of `video_path`, writing `output_path`
    async fn burn_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
        style: &BurnInStyle,
    ) -> Result<PathBuf>;
}

pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    pub fn create_processor(config: MediaConfig, executor: Arc<dyn ProcessExecutor>) -> Box<dyn MediaProcessorTrait> {
        Box::new(MediaProcessorImpl::new(config, executor))
    }
}

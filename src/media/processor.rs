use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::{AudioFormat, BurnInStyle, MediaCommandBuilder, MediaProcessorTrait};
use crate::config::MediaConfig;
use crate::error::Result;
use crate::paths::validate_file;
use crate::process::ProcessExecutor;

/// ffmpeg-backed media processor
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
    executor: Arc<dyn ProcessExecutor>,
}

impl MediaProcessorImpl {
    pub fn new(config: MediaConfig, executor: Arc<dyn ProcessExecutor>) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path).with_timeout(config.timeout());

        Self {
            config,
            command_builder,
            executor,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path, format: AudioFormat) -> Result<PathBuf> {
        let video_path = validate_file(video_path)?;
        info!("Extracting audio from {} to {}", video_path.display(), audio_path.display());

        let command = self.command_builder.extract_audio(&video_path, audio_path, format);
        command.execute(self.executor.as_ref()).await?;

        info!("Audio extraction completed successfully");
        Ok(audio_path.to_path_buf())
    }

    async fn burn_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
        style: &BurnInStyle,
    ) -> Result<PathBuf> {
        let video_path = validate_file(video_path)?;
        let subtitle_path = validate_file(subtitle_path)?;
        info!(
            "Embedding subtitles from {} into {} -> {}",
            subtitle_path.display(),
            video_path.display(),
            output_path.display()
        );

        let command = self.command_builder.burn_subtitles(
            &video_path,
            &subtitle_path,
            output_path,
            style,
            &self.config.burn_in_options,
        );
        command.execute(self.executor.as_ref()).await?;

        info!("Subtitle embedding completed successfully: {}", output_path.display());
        Ok(output_path.to_path_buf())
    }
}

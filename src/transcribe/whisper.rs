use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info};

use super::{TranscribeRequest, TranscriberTrait};
use crate::config::TranscriberConfig;
use crate::error::{Result, SubtitlerError};
use crate::paths::validate_file;
use crate::process::{ProcessExecutor, ToolCommand};

/// Transcriber driving the openai-whisper command line tool
pub struct WhisperTranscriber {
    config: TranscriberConfig,
    executor: Arc<dyn ProcessExecutor>,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriberConfig, executor: Arc<dyn ProcessExecutor>) -> Self {
        Self { config, executor }
    }

    fn build_command(&self, audio_path: &Path, output_dir: &Path, request: &TranscribeRequest) -> ToolCommand {
        ToolCommand::new(&self.config.binary_path, "Transcription")
            .path(audio_path)
            .option("--model", request.model.name())
            .option("--language", &request.language)
            .option("--task", request.task.name())
            .option("--output_dir", output_dir.to_string_lossy())
            .option("--output_format", &request.output_format)
            .timeout(self.config.timeout())
    }

    /// whisper names its output after the audio file's stem
    pub fn expected_output(audio_path: &Path, output_dir: &Path, output_format: &str) -> PathBuf {
        let stem = audio_path.file_stem().unwrap_or_default().to_string_lossy();
        output_dir.join(format!("{}.{}", stem, output_format))
    }
}

#[async_trait]
impl TranscriberTrait for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path, request: &TranscribeRequest) -> Result<PathBuf> {
        let audio_path = validate_file(audio_path)?;

        let output_dir = match &request.output_dir {
            Some(dir) => dir.clone(),
            None => audio_path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        fs::create_dir_all(&output_dir).await?;

        info!(
            "Transcribing audio {} using Whisper model {} (language: {}, task: {})",
            audio_path.display(),
            request.model,
            request.language,
            request.task.name()
        );

        self.build_command(&audio_path, &output_dir, request)
            .execute(self.executor.as_ref())
            .await?;

        let output_file = Self::expected_output(&audio_path, &output_dir, &request.output_format);
        if !output_file.exists() {
            error!("Expected output file {} not found", output_file.display());
            return Err(SubtitlerError::NotFound(format!(
                "Expected output file {} not found",
                output_file.display()
            )));
        }

        info!("Transcription completed successfully: {}", output_file.display());
        Ok(output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{MockProcessExecutor, ToolOutput};
    use crate::transcribe::{TranscriptionTask, WhisperModel};
    use assert_fs::prelude::*;

    fn request(output_dir: &Path) -> TranscribeRequest {
        TranscribeRequest {
            model: WhisperModel::Small,
            language: "fr".to_string(),
            task: TranscriptionTask::Translate,
            output_dir: Some(output_dir.to_path_buf()),
            output_format: "srt".to_string(),
        }
    }

    #[test]
    fn test_expected_output() {
        assert_eq!(
            WhisperTranscriber::expected_output(Path::new("/a/b/talk.wav"), Path::new("/out"), "srt"),
            PathBuf::from("/out/talk.srt")
        );
    }

    #[tokio::test]
    async fn test_transcribe_builds_command_and_returns_output() {
        let temp = assert_fs::TempDir::new().unwrap();
        let audio = temp.child("talk.wav");
        audio.write_binary(b"RIFF").unwrap();
        let out_dir = temp.child("out");

        let audio_arg = audio.path().to_string_lossy().to_string();
        let out_arg = out_dir.path().to_string_lossy().to_string();
        let srt_path = out_dir.path().join("talk.srt");

        let mut executor = MockProcessExecutor::new();
        executor
            .expect_run()
            .withf(move |cmd| {
                cmd.program == "whisper"
                    && cmd.args
                        == vec![
                            audio_arg.clone(),
                            "--model".to_string(),
                            "small".to_string(),
                            "--language".to_string(),
                            "fr".to_string(),
                            "--task".to_string(),
                            "translate".to_string(),
                            "--output_dir".to_string(),
                            out_arg.clone(),
                            "--output_format".to_string(),
                            "srt".to_string(),
                        ]
            })
            .times(1)
            .returning(move |_| {
                std::fs::write(&srt_path, "1\n00:00:00,000 --> 00:00:01,000\nHi\n")?;
                Ok(ToolOutput::new(Some(0), "", ""))
            });

        let transcriber = WhisperTranscriber::new(TranscriberConfig::default(), Arc::new(executor));
        let result = transcriber.transcribe(audio.path(), &request(out_dir.path())).await.unwrap();

        assert_eq!(result, out_dir.path().join("talk.srt"));
        assert!(out_dir.path().is_dir());
    }

    #[tokio::test]
    async fn test_transcribe_missing_output_is_not_found() {
        let temp = assert_fs::TempDir::new().unwrap();
        let audio = temp.child("talk.wav");
        audio.write_binary(b"RIFF").unwrap();

        let mut executor = MockProcessExecutor::new();
        executor
            .expect_run()
            .times(1)
            .returning(|_| Ok(ToolOutput::new(Some(0), "", "")));

        let transcriber = WhisperTranscriber::new(TranscriberConfig::default(), Arc::new(executor));
        let err = transcriber.transcribe(audio.path(), &request(temp.path())).await.unwrap_err();

        assert!(matches!(err, SubtitlerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_transcribe_failure_is_tool_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let audio = temp.child("talk.wav");
        audio.write_binary(b"RIFF").unwrap();

        let mut executor = MockProcessExecutor::new();
        executor
            .expect_run()
            .returning(|_| Ok(ToolOutput::new(Some(2), "", "RuntimeError: model not found")));

        let transcriber = WhisperTranscriber::new(TranscriberConfig::default(), Arc::new(executor));
        let err = transcriber.transcribe(audio.path(), &request(temp.path())).await.unwrap_err();

        match err {
            SubtitlerError::ToolExecution { message, .. } => assert!(message.contains("model not found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transcribe_defaults_to_audio_directory_and_config_binary() {
        let temp = assert_fs::TempDir::new().unwrap();
        let audio = temp.child("clip.wav");
        audio.write_binary(b"RIFF").unwrap();
        let srt_path = temp.path().join("clip.srt");

        let mut executor = MockProcessExecutor::new();
        executor
            .expect_run()
            .withf(|cmd| cmd.program == "/usr/local/bin/whisper" && cmd.args.contains(&"transcribe".to_string()))
            .returning(move |_| {
                std::fs::write(&srt_path, "")?;
                Ok(ToolOutput::new(Some(0), "", ""))
            });

        let config = TranscriberConfig {
            binary_path: "/usr/local/bin/whisper".to_string(),
            ..TranscriberConfig::default()
        };
        let request = TranscribeRequest {
            task: TranscriptionTask::Transcribe,
            ..TranscribeRequest::default()
        };
        let transcriber = WhisperTranscriber::new(config, Arc::new(executor));
        let result = transcriber.transcribe(audio.path(), &request).await.unwrap();

        assert_eq!(result, temp.path().join("clip.srt"));
    }

    #[tokio::test]
    async fn test_transcribe_missing_audio() {
        let mut executor = MockProcessExecutor::new();
        executor.expect_run().never();

        let transcriber = WhisperTranscriber::new(TranscriberConfig::default(), Arc::new(executor));
        let err = transcriber
            .transcribe(Path::new("/no/audio.wav"), &TranscribeRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubtitlerError::NotFound(_)));
    }
}

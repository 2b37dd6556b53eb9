// Speech transcription/translation through an external tool
//
// The transcriber only builds and runs the command line; recognition and
// translation happen entirely inside the tool, which writes the subtitle file.

pub mod whisper;

use async_trait::async_trait;
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use whisper::WhisperTranscriber;

use crate::config::TranscriberConfig;
use crate::error::Result;
use crate::process::ProcessExecutor;

/// Whisper model size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    #[default]
    Medium,
    Large,
}

impl WhisperModel {
    pub fn name(self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the tool should do with the recognized speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptionTask {
    /// Keep the source language
    Transcribe,
    /// Translate to English
    #[default]
    Translate,
}

impl TranscriptionTask {
    pub fn name(self) -> &'static str {
        match self {
            TranscriptionTask::Transcribe => "transcribe",
            TranscriptionTask::Translate => "translate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeRequest {
    pub model: WhisperModel,
    /// Source language code, e.g. `de`
    pub language: String,
    pub task: TranscriptionTask,
    /// Where the tool writes its output; defaults to the audio file's directory
    pub output_dir: Option<PathBuf>,
    /// Output format extension, e.g. `srt`
    pub output_format: String,
}

impl Default for TranscribeRequest {
    fn default() -> Self {
        Self {
            model: WhisperModel::Medium,
            language: "de".to_string(),
            task: TranscriptionTask::Translate,
            output_dir: None,
            output_format: "srt".to_string(),
        }
    }
}

#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Run the tool on `audio_path` and return the subtitle file it produced
    async fn transcribe(&self, audio_path: &Path, request: &TranscribeRequest) -> Result<PathBuf>;
}

pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create_default(config: TranscriberConfig, executor: Arc<dyn ProcessExecutor>) -> Box<dyn TranscriberTrait> {
        Box::new(WhisperTranscriber::new(config, executor))
    }
}

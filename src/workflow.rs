use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::media::{AudioFormat, BurnInStyle, MediaProcessorFactory, MediaProcessorTrait};
use crate::paths::{default_output_path, validate_file};
use crate::process::{ProcessExecutor, SystemExecutor};
use crate::subtitle::{read_srt, write_srt, TimingAdjustment};
use crate::transcribe::{TranscribeRequest, TranscriberFactory, TranscriberTrait, TranscriptionTask, WhisperModel};
use crate::workdir::WorkDir;

/// Everything a single run needs besides the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub video_path: PathBuf,
    /// Defaults to `<stem>_subtitled.<ext>` next to the input
    pub output_path: Option<PathBuf>,
    pub model: WhisperModel,
    pub language: String,
    pub keep_temp: bool,
    pub style: BurnInStyle,
    pub timing: TimingAdjustment,
}

impl PipelineOptions {
    pub fn new<P: Into<PathBuf>>(video_path: P) -> Self {
        Self {
            video_path: video_path.into(),
            output_path: None,
            model: WhisperModel::default(),
            language: "de".to_string(),
            keep_temp: false,
            style: BurnInStyle::default(),
            timing: TimingAdjustment::default(),
        }
    }

    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| default_output_path(&self.video_path))
    }
}

pub struct Workflow {
    config: Config,
    transcriber: Box<dyn TranscriberTrait>,
    media: Box<dyn MediaProcessorTrait>,
    temp_root: Option<PathBuf>,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        Self::with_executor(config, Arc::new(SystemExecutor))
    }

    /// Build the pipeline on a custom executor, e.g. a test double
    pub fn with_executor(config: Config, executor: Arc<dyn ProcessExecutor>) -> Self {
        let transcriber = TranscriberFactory::create_default(config.transcriber.clone(), executor.clone());
        let media = MediaProcessorFactory::create_processor(config.media.clone(), executor);

        Self {
            config,
            transcriber,
            media,
            temp_root: None,
        }
    }

    /// Create temporary directories under `root` instead of the system temp dir
    pub fn with_temp_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Video in, subtitled video out. Returns the output path.
    pub async fn run(&self, options: &PipelineOptions) -> Result<PathBuf> {
        let video_path = validate_file(&options.video_path)?;
        let output_path = options.resolved_output_path();
        let video_stem = video_path.file_stem().unwrap_or_default().to_string_lossy().to_string();

        let workdir = match &self.temp_root {
            Some(root) => WorkDir::create_in(root)?,
            None => WorkDir::create()?,
        };
        info!("Using temporary directory: {}", workdir.path().display());

        match self.process(&video_path, &video_stem, &output_path, &workdir, options).await {
            Ok(output) => {
                info!("Successfully created subtitled video: {}", output.display());
                workdir.finish(options.keep_temp);
                Ok(output)
            }
            Err(e) => {
                warn!("Run failed, temporary files left at: {}", workdir.path().display());
                Err(e)
            }
        }
    }

    async fn process(
        &self,
        video_path: &Path,
        video_stem: &str,
        output_path: &Path,
        workdir: &WorkDir,
        options: &PipelineOptions,
    ) -> Result<PathBuf> {
        // Step 1: audio
        info!("Extracting audio from video...");
        let format = AudioFormat {
            sample_rate: self.config.media.sample_rate,
            channels: self.config.media.channels,
        };
        let audio_path = with_spinner(
            "Extracting audio",
            self.media.extract_audio(video_path, &workdir.join(format!("{}.wav", video_stem)), format),
        )
        .await?;

        // Step 2: transcribe and translate
        info!(
            "Transcribing and translating audio using Whisper model '{}' for language '{}'...",
            options.model, options.language
        );
        let request = TranscribeRequest {
            model: options.model,
            language: options.language.clone(),
            task: TranscriptionTask::Translate,
            output_dir: Some(workdir.path().to_path_buf()),
            output_format: self.config.transcriber.output_format.clone(),
        };
        let subtitle_path = with_spinner("Transcribing", self.transcriber.transcribe(&audio_path, &request)).await?;

        // Step 3: normalize numbering and apply any timing correction
        let entries = read_srt(&subtitle_path).await?;
        let mut entries = if options.timing.is_identity() {
            entries
        } else {
            options.timing.apply(&entries)
        };
        let subtitle_path = write_srt(&mut entries, workdir.join(format!("{}.adjusted.srt", video_stem))).await?;

        // Step 4: burn in
        info!("Embedding subtitles into video...");
        with_spinner(
            "Embedding subtitles",
            self.media.burn_subtitles(video_path, &subtitle_path, output_path, &options.style),
        )
        .await
    }
}

/// Show a spinner on stderr while `stage` runs; hidden when not a terminal.
async fn with_spinner<T, F>(message: &'static str, stage: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = stage.await;
    spinner.finish_and_clear();
    result
}

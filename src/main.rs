//! subtitler - add English subtitles to videos with non-English audio
//!
//! Extracts the audio track with ffmpeg, transcribes and translates it with
//! whisper, then burns the resulting subtitles into a copy of the video.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use subtitler::cli::Args;
use subtitler::config::Config;
use subtitler::logging::LoggingConfig;
use subtitler::setup::SetupManager;
use subtitler::workflow::Workflow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref());
    let logging = LoggingConfig::new(args.verbose)
        .with_directory(config.as_ref().ok().and_then(|c| c.logging.directory.clone()));
    let _guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting video subtitling tool v{}", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = SetupManager::from_config(&config).check_dependencies() {
        error!("{}", e);
        error!("Missing required dependencies. Please install ffmpeg and whisper.");
        return ExitCode::FAILURE;
    }

    match run(&args, config).await {
        Ok(output) => {
            info!("Done: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, config: Config) -> Result<PathBuf> {
    let options = args
        .pipeline_options(&config.burn_in)
        .context("Invalid arguments")?;

    let workflow = Workflow::new(config);
    let output = workflow
        .run(&options)
        .await
        .with_context(|| format!("Failed to subtitle {}", options.video_path.display()))?;

    Ok(output)
}

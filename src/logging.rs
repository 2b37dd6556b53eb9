use std::path::PathBuf;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{Result, SubtitlerError};

pub const LOG_FILE_NAME: &str = "subtitler.log";

/// Process-wide logging setup, applied once by the binary.
///
/// Library code only emits `tracing` events and never installs a subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub verbose: bool,
    /// Also log to a daily rotated file in this directory
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            directory: None,
        }
    }

    pub fn with_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.directory = directory;
        self
    }

    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes the file writer and must live until exit.
    pub fn init(&self) -> Result<Option<WorkerGuard>> {
        let log_level = self.level();

        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed();

        let (file_layer, guard) = match &self.directory {
            Some(log_dir) => {
                std::fs::create_dir_all(log_dir)?;
                let (writer, guard) = non_blocking(rolling::daily(log_dir, LOG_FILE_NAME));
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(false)
                    .boxed();
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env().add_directive(log_level.into()))
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| SubtitlerError::Config(format!("Failed to initialize logging: {}", e)))?;

        match &self.directory {
            Some(dir) => info!("Logging initialized - level: {}, file: {}", log_level, dir.join(LOG_FILE_NAME).display()),
            None => info!("Logging initialized - level: {}", log_level),
        }

        Ok(guard)
    }
}

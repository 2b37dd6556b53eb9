// External process execution
//
// Pipeline stages never spawn processes directly. They build a ToolCommand
// and hand it to a ProcessExecutor, which lets tests substitute a mock.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::{Result, SubtitlerError};

/// Command line for an external tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub description: String,
    pub timeout: Option<Duration>,
}

impl ToolCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(program: S1, description: S2) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            description: description.into(),
            timeout: None,
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add a path argument
    pub fn path<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add a `--flag value` pair
    pub fn option<F: Into<String>, V: Into<String>>(self, flag: F, value: V) -> Self {
        self.arg(flag).arg(value)
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Command rendered for logs
    pub fn display_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run through `executor` and fail on a non-zero exit.
    pub async fn execute(&self, executor: &dyn ProcessExecutor) -> Result<ToolOutput> {
        debug!("Running command: {}", self.display_line());

        let output = executor.run(self).await?;

        if !output.success() {
            error!("{} failed: {}", self.description, output.stderr.trim_end());
            return Err(SubtitlerError::tool(&self.description, output.stderr.trim_end()));
        }

        Ok(output)
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn new<S1: Into<String>, S2: Into<String>>(code: Option<i32>, stdout: S1, stderr: S2) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit is reported through [`ToolOutput`], not as an error.
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

#[async_trait]
impl ProcessExecutor for SystemExecutor {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SubtitlerError::tool(&command.description, format!("Failed to execute {}: {}", command.program, e))
            })?;

        let output = match command.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    error!("Command timed out: {}", command.display_line());
                    SubtitlerError::tool(
                        &command.description,
                        format!("Command timed out after {} seconds", limit.as_secs()),
                    )
                })??,
            None => child.wait_with_output().await?,
        };

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

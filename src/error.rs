use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubtitlerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("{message}: {line}")]
    Parse { message: String, line: String },

    #[error("{tool} failed: {message}")]
    ToolExecution { tool: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing dependencies: {}", .0.join(", "))]
    MissingDependencies(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SubtitlerError {
    pub fn parse<M: Into<String>, L: Into<String>>(message: M, line: L) -> Self {
        Self::Parse {
            message: message.into(),
            line: line.into(),
        }
    }

    pub fn tool<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubtitlerError>;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutobuildError {
    #[error("{0}")]
    Usage(String),

    #[error("Platform not recognized")]
    PlatformNotRecognized,

    #[error("No such program: {0}")]
    ProgramMissing(String),

    #[error("No privilege escalation mechanism found (need sudo or su to run '{0}')")]
    NoElevation(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// Regenerate, configure or make step failed
    #[error("{0}")]
    BuildFailed(String),

    #[error("Cannot change to source directory '{path}': {reason}")]
    SourceDir { path: PathBuf, reason: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Should be unreachable; reported with a distinct exit status
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AutobuildError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AutobuildError::Internal(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AutobuildError>;

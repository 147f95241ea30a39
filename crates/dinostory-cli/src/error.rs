//! CLI-specific error types and exit codes.

use dinostory_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A wizard choice was missing or blank.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (output directory not writable, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Core(String),
}

impl CliError {
    /// Exit code following sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
            Self::Core(_) => 1,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Configuration(msg) => Self::Config(msg),
            other => Self::Core(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

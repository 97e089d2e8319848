//! Error types for advisor-cli

use device_advisor::AdvisorError;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Input rejected before reaching the model
    #[error("{0}")]
    InvalidInput(String),

    /// Training or prediction failed
    #[error("Model error: {0}")]
    Model(AdvisorError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Runtime or listener failure
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Raw process status for this error
    pub(crate) fn status(&self) -> u8 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::Model(_) => 1,
            Self::Io(_) => 7,
            Self::Server(_) => 10,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

impl From<AdvisorError> for CliError {
    fn from(e: AdvisorError) -> Self {
        if e.is_client_error() {
            Self::InvalidInput(e.to_string())
        } else {
            Self::Model(e)
        }
    }
}

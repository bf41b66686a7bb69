//! Error types for the esdump CLI
//!
//! Messages are user-facing and say what to check next.

use esdump_transfer::TransferError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Transfer or index operation failed
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Search backend could not be reached or answered with an error status
    #[error("{source}. Check that the search backend at '{host}' is running and reachable.")]
    Backend {
        host: String,
        #[source]
        source: TransferError,
    },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or flags.")]
    Config(String),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach the backend host to connection-level failures.
    pub fn from_transfer(err: TransferError, host: &str) -> Self {
        match err {
            TransferError::Http(_) | TransferError::Status { .. } => Self::Backend {
                host: host.to_string(),
                source: err,
            },
            other => Self::Transfer(other),
        }
    }
}

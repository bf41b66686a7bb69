//! Error types for the transfer engine

use esdump_common::CommonError;
pub use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for transfer operations
pub type Result<T> = std::result::Result<T, TransferError>;

/// Fatal errors of a transfer or index operation.
///
/// Per-document bulk failures are not errors; they are counted in the
/// [`TransferOutcome`](crate::pipeline::TransferOutcome).
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("search backend HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search backend returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("index '{0}' not found")]
    IndexNotFound(String),

    #[error("search backend returned a full page for index '{0}' without a scroll id")]
    MissingCursor(String),

    #[error("failed to decode search backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid document on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("line {line} is longer than the {max} byte limit")]
    LineTooLong { line: u64, max: usize },

    #[error("I/O error on '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid search backend URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("producer task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl TransferError {
    pub fn status(status: StatusCode, body: String) -> Self {
        TransferError::Status { status, body }
    }

    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        TransferError::File {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_option(msg: impl Into<String>) -> Self {
        TransferError::InvalidOption(msg.into())
    }

    /// True for the "index does not exist" answer of a delete or get.
    pub fn is_index_not_found(&self) -> bool {
        matches!(self, TransferError::IndexNotFound(_))
    }
}

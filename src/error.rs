//! Error types for gitgroup
//!
//! Only malformed input to the public API and failures of the ambient
//! layers (config, storage, directory service) surface as `Error`. Anything
//! that goes wrong inside a single repository is reported as an
//! [`OperationStatus`](crate::model::OperationStatus) instead.

use thiserror::Error;

/// Result type alias for gitgroup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gitgroup operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Git error outside of a batch item
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote directory service error
    #[error("Directory service error: {0}")]
    Directory(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

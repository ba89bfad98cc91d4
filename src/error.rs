//! Error types for planets

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] reqwest::Error),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: std::time::Duration,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the error is caused by the caller rather than by a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidId(_) | Error::InvalidRequest(_))
    }
}

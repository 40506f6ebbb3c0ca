use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input was rejected before anything was written.
    #[error("{0}")]
    Validation(String),

    #[error("Task {0} not found")]
    NotFound(Uuid),

    /// The backing document store failed (I/O, corrupt document, bad location).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

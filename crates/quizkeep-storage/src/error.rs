//! Storage error types.

use thiserror::Error;

/// Errors that can occur when writing to or reading from a store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The store cannot be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value is larger than the store accepts.
    #[error("storage quota exceeded: {attempted} bytes, limit is {limit} bytes")]
    QuotaExceeded { limit: usize, attempted: usize },

    /// The value could not be encoded without loss.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The key cannot be used by this store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The stored bytes are not text.
    #[error("stored value is corrupt: {0}")]
    Corrupt(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A saved snapshot exists but is not a submission.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("saved progress is not valid JSON answers: {0}")]
    Json(#[from] serde_json::Error),

    #[error("saved progress is not text: {0}")]
    NotText(String),
}

/// Why saved progress could not be read back.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

//! Error types for blob store operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Blob not found: {key}")]
    NotFound { key: String },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Read failed for '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed for '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        StorageError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

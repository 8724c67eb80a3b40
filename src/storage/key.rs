//! Blob key validation and generation

use uuid::Uuid;

use super::error::StorageError;
use crate::constants::MAX_KEY_LENGTH;

/// How an upload picks the key it is stored under
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Fresh UUID v4, no extension
    #[default]
    Random,
    /// Caller-chosen key
    Explicit(String),
}

impl KeyStrategy {
    /// Produce the key for a new upload
    pub fn generate(&self) -> String {
        match self {
            KeyStrategy::Random => Uuid::new_v4().to_string(),
            KeyStrategy::Explicit(key) => key.clone(),
        }
    }
}

/// Check that `key` is a single, safe storage path component
///
/// Keys live in a flat namespace, so separators and traversal sequences are
/// rejected outright.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::invalid_key(key, "key is empty"));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(StorageError::invalid_key(
            key,
            format!("key is too long (max {})", MAX_KEY_LENGTH),
        ));
    }

    if key.contains('/') || key.contains('\\') {
        return Err(StorageError::invalid_key(key, "key contains a path separator"));
    }

    // A key is one path component, so only the dot entries themselves traverse
    if key == "." || key == ".." {
        return Err(StorageError::invalid_key(key, "path traversal detected"));
    }

    // Leading-dot names are reserved for in-flight writes
    if key.starts_with('.') {
        return Err(StorageError::invalid_key(key, "key starts with '.'"));
    }

    if key.chars().any(|c| c.is_control()) {
        return Err(StorageError::invalid_key(key, "key contains control characters"));
    }

    Ok(())
}

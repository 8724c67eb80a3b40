//! Backend trait for blob storage

use super::error::StorageError;
use bytes::Bytes;

/// Abstraction over the object store holding source images and artifacts
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing blob
    fn put(&self, key: &str, data: Bytes) -> Result<(), StorageError>;

    /// Read the blob stored under `key`
    fn get(&self, key: &str) -> Result<Bytes, StorageError>;

    /// Check whether a blob exists under `key`
    fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

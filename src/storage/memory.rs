//! In-memory blob store (HashMap storage)

use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::backend::BlobStore;
use super::error::StorageError;
use super::key::validate_key;

/// Blob store that keeps everything in memory
///
/// Clones share the same underlying map. Read and write failures can be
/// simulated for testing error paths.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get`/`exists` fail with a read error
    pub fn set_read_failure(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Make every subsequent `put` fail with a write error
    pub fn set_write_failure(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Sorted list of stored keys
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.blobs.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn clear(&self) {
        self.blobs.write().clear();
    }

    fn check_read(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "simulated read failure"),
            });
        }
        Ok(())
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, key: &str, data: Bytes) -> Result<(), StorageError> {
        validate_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "simulated write failure"),
            });
        }
        self.blobs.write().insert(key.to_string(), data);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        self.check_read(key)?;
        self.blobs
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.check_read(key)?;
        Ok(self.blobs.read().contains_key(key))
    }
}

//! Filesystem blob store (one file per key in a flat directory)

use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::backend::BlobStore;
use super::error::StorageError;
use super::key::validate_key;

/// Blob store backed by a single directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Write {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &str, data: Bytes) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        // Unique temp name so concurrent writers never share a temp file
        let temp_path = self
            .root
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));

        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        if let Err(e) = std::fs::write(&temp_path, &data) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        if let Err(e) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        tracing::debug!(key = %key, bytes = data.len(), "Blob written");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        path.try_exists().map_err(|source| StorageError::Read {
            key: key.to_string(),
            source,
        })
    }
}

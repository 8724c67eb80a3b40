//! Blob store adapters
//!
//! The pipeline only sees the [`BlobStore`] trait: a flat namespace of string
//! keys mapping to byte blobs. Two backends are provided:
//! - **filesystem** ([`FsBlobStore`]): one file per key under a root directory
//! - **memory** ([`MemoryBlobStore`]): `HashMap` behind a lock, for tests and
//!   ephemeral runs
//!
//! Both are safe for concurrent use. Identical concurrent writes race benignly
//! (last writer wins).

pub mod backend;
mod error;
mod fs;
mod key;
mod memory;

pub use backend::BlobStore;
pub use error::StorageError;
pub use fs::FsBlobStore;
pub use key::{validate_key, KeyStrategy};
pub use memory::MemoryBlobStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};

/// Build the blob store selected by `config`
pub fn open(config: &StorageConfig) -> Result<Arc<dyn BlobStore>, StorageError> {
    let store: Arc<dyn BlobStore> = match config.backend {
        StorageBackend::Filesystem => Arc::new(FsBlobStore::new(&config.root)?),
        StorageBackend::Memory => Arc::new(MemoryBlobStore::new()),
    };

    tracing::debug!(
        backend = ?config.backend,
        root = %config.root,
        "Opened blob store"
    );

    Ok(store)
}

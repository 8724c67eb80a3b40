// Shared fixtures for pipeline integration tests

use bytes::Bytes;
use image::{Rgba, RgbaImage};
use pixelstore::codec::CodecRegistry;
use pixelstore::config::TransformConfig;
use pixelstore::pipeline::TransformEngine;
use pixelstore::storage::{BlobStore, MemoryBlobStore};
use pixelstore::transform::Raster;
use std::sync::Arc;

/// Opaque raster where every pixel differs from its neighbours
pub fn gradient(width: u32, height: u32) -> Raster {
    Raster::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    }))
}

pub fn encode(raster: &Raster, token: &str) -> Bytes {
    Bytes::from(CodecRegistry::global().encode(raster, token).unwrap().data)
}

pub fn decode(data: &[u8]) -> Raster {
    CodecRegistry::global().decode(data).unwrap().raster
}

/// Engine over a fresh memory store; the returned store shares its state
pub fn memory_engine() -> (TransformEngine, MemoryBlobStore) {
    let store = MemoryBlobStore::new();
    let engine = TransformEngine::new(
        CodecRegistry::global(),
        Arc::new(store.clone()),
        TransformConfig::default(),
    );
    (engine, store)
}

/// Store a `width`×`height` gradient under `key` in `token` format
pub fn seed(store: &dyn BlobStore, key: &str, width: u32, height: u32, token: &str) -> Raster {
    let raster = gradient(width, height);
    store.put(key, encode(&raster, token)).unwrap();
    raster
}

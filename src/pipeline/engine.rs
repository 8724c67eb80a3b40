//! Request → artifact pipeline

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use rayon::prelude::*;

use super::request::{TransformKind, TransformRequest};
use super::stats::{TransformStats, TransformationType};
use crate::codec::CodecRegistry;
use crate::config::{Config, TransformConfig};
use crate::constants::MAX_KEY_LENGTH;
use crate::error::ImageError;
use crate::naming;
use crate::storage::{self, BlobStore, KeyStrategy};
use crate::transform::{self, Raster};

/// Result of a processed request
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Artifact key for Rotate/Resize, `None` for Fetch
    pub key: Option<String>,
    /// Encoded output bytes
    pub data: Bytes,
    pub content_type: &'static str,
    /// Canonical format token of `data`
    pub format: &'static str,
    pub stats: TransformStats,
}

/// Stateless transform engine
///
/// Holds shared handles only, so one engine serves any number of threads.
pub struct TransformEngine {
    registry: Arc<CodecRegistry>,
    store: Arc<dyn BlobStore>,
    limits: TransformConfig,
}

impl std::fmt::Debug for TransformEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformEngine")
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl TransformEngine {
    pub fn new(
        registry: Arc<CodecRegistry>,
        store: Arc<dyn BlobStore>,
        limits: TransformConfig,
    ) -> Self {
        Self {
            registry,
            store,
            limits,
        }
    }

    /// Build the registry and blob store described by `config`
    pub fn from_config(config: &Config) -> Result<Self, ImageError> {
        let registry = Arc::new(CodecRegistry::with_defaults(&config.codec));
        let store = storage::open(&config.storage)?;
        Ok(Self::new(registry, store, config.transform))
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    /// Store `data` verbatim and return its key
    pub fn upload(&self, data: Bytes, strategy: &KeyStrategy) -> Result<String, ImageError> {
        let key = strategy.generate();
        let size = data.len();
        self.store.put(&key, data).map_err(|e| {
            tracing::warn!(key = %key, error = %e, "Upload failed");
            ImageError::from(e)
        })?;
        tracing::info!(key = %key, bytes = size, "Upload stored");
        Ok(key)
    }

    /// Re-encode the stored image, in `format` or its own format
    pub fn fetch(&self, key: &str, format: Option<&str>) -> Result<TransformOutput, ImageError> {
        self.process(&with_optional_format(TransformRequest::fetch(key), format))
    }

    /// Rotate by `angle` (decimal text) and persist the artifact
    pub fn rotate(
        &self,
        key: &str,
        angle: &str,
        format: Option<&str>,
    ) -> Result<TransformOutput, ImageError> {
        let request = TransformRequest::parse_rotate(key, angle)?;
        self.process(&with_optional_format(request, format))
    }

    /// Resize to `width`×`height` and persist the artifact
    pub fn resize(
        &self,
        key: &str,
        width: u32,
        height: u32,
        format: Option<&str>,
    ) -> Result<TransformOutput, ImageError> {
        self.process(&with_optional_format(
            TransformRequest::resize(key, width, height),
            format,
        ))
    }

    /// Run one request: read, decode, transform, encode, then persist
    ///
    /// Nothing is written unless encoding succeeded.
    pub fn process(&self, request: &TransformRequest) -> Result<TransformOutput, ImageError> {
        self.run(request).map_err(|e| {
            tracing::warn!(
                source_key = %request.source_key,
                kind = request.kind.as_label(),
                status = e.to_http_status(),
                error = %e,
                "Transform request failed"
            );
            e
        })
    }

    /// Run independent requests in parallel; results keep input order
    pub fn process_batch(
        &self,
        requests: &[TransformRequest],
    ) -> Vec<Result<TransformOutput, ImageError>> {
        requests
            .par_iter()
            .map(|request| self.process(request))
            .collect()
    }

    fn run(&self, request: &TransformRequest) -> Result<TransformOutput, ImageError> {
        let start = Instant::now();

        // Parameter checks come before any I/O
        let requested_format = match request.format.as_deref() {
            Some(token) => Some(
                self.registry
                    .canonical(token)
                    .ok_or_else(|| ImageError::unknown_format(token))?
                    .to_string(),
            ),
            None => None,
        };
        if let TransformKind::Resize { width, height } = request.kind {
            if width == 0 && height == 0 {
                return Err(ImageError::invalid_dimension(
                    "0x0",
                    "width and height cannot both be zero",
                ));
            }
            self.check_limits(width, height)?;
        }
        self.check_artifact_key(request, requested_format.as_deref())?;

        let source = self.store.get(&request.source_key)?;
        let decoded = self.registry.decode(&source)?;
        let token = requested_format.unwrap_or(decoded.format);
        let source_dimensions = decoded.raster.dimensions();

        tracing::debug!(
            source_key = %request.source_key,
            kind = request.kind.as_label(),
            source_width = source_dimensions.0,
            source_height = source_dimensions.1,
            format = %token,
            "Decoded source"
        );

        let key = artifact_key(request, &token);
        let (kind, output): (TransformationType, Raster) = match &request.kind {
            TransformKind::Fetch => (TransformationType::Fetch, decoded.raster),
            TransformKind::Rotate { angle } => (
                TransformationType::Rotate,
                transform::rotate(&decoded.raster, angle.degrees()),
            ),
            TransformKind::Resize { width, height } => {
                let (target_w, target_h) = transform::resolve_dimensions(
                    source_dimensions.0,
                    source_dimensions.1,
                    *width,
                    *height,
                )?;
                self.check_limits(target_w, target_h)?;
                (
                    TransformationType::Resize,
                    transform::resize(&decoded.raster, target_w, target_h)?,
                )
            }
        };

        let encoded = self.registry.encode(&output, &token)?;
        let data = Bytes::from(encoded.data);

        if let Some(key) = &key {
            self.store.put(key, data.clone())?;
        }

        let (out_w, out_h) = output.dimensions();
        let stats = TransformStats::builder(kind)
            .input_size(source.len())
            .output_size(data.len())
            .source_dimensions(source_dimensions.0, source_dimensions.1)
            .output_dimensions(out_w, out_h)
            .output_format(encoded.format)
            .elapsed(start.elapsed())
            .build();
        stats.log(&request.source_key, key.as_deref());

        Ok(TransformOutput {
            key,
            data,
            content_type: encoded.content_type,
            format: encoded.format,
            stats,
        })
    }

    /// Reject requests whose artifact key cannot be stored, before any I/O
    ///
    /// Without a format override the extension is unknown until decode, so
    /// the longest registered token stands in for it.
    fn check_artifact_key(
        &self,
        request: &TransformRequest,
        requested_format: Option<&str>,
    ) -> Result<(), ImageError> {
        storage::validate_key(&request.source_key)?;
        let extension = match requested_format.or_else(|| self.registry.longest_token()) {
            Some(extension) => extension,
            None => return Ok(()),
        };
        match artifact_key(request, extension) {
            Some(key) if key.len() > MAX_KEY_LENGTH => {
                Err(ImageError::artifact_key_too_long(key, MAX_KEY_LENGTH))
            }
            _ => Ok(()),
        }
    }

    fn check_limits(&self, width: u32, height: u32) -> Result<(), ImageError> {
        if width > self.limits.max_width {
            return Err(ImageError::invalid_dimension(
                width.to_string(),
                format!("width exceeds maximum of {}", self.limits.max_width),
            ));
        }
        if height > self.limits.max_height {
            return Err(ImageError::invalid_dimension(
                height.to_string(),
                format!("height exceeds maximum of {}", self.limits.max_height),
            ));
        }
        Ok(())
    }
}

/// Key the artifact of `request` is stored under, `None` for Fetch
fn artifact_key(request: &TransformRequest, extension: &str) -> Option<String> {
    match &request.kind {
        TransformKind::Fetch => None,
        TransformKind::Rotate { angle } => Some(naming::rotated_key(
            &request.source_key,
            angle.literal(),
            extension,
        )),
        TransformKind::Resize { width, height } => Some(naming::resized_key(
            &request.source_key,
            *width,
            *height,
            extension,
        )),
    }
}

fn with_optional_format(request: TransformRequest, format: Option<&str>) -> TransformRequest {
    match format {
        Some(format) => request.with_format(format),
        None => request,
    }
}

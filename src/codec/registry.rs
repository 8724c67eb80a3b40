//! Format-dispatched decode/encode table

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::encoder::{EncodedImage, GifEncoder, ImageEncoder, JpegEncoder, PngEncoder, WebPEncoder};
use super::format::{self, JPEG, JPG};
use image::ImageFormat;
use crate::config::CodecConfig;
use crate::error::ImageError;
use crate::transform::Raster;

/// A decoded image and the canonical token of the format it was stored in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub raster: Raster,
    pub format: String,
}

/// Tagged dispatch table from format token to encoder
///
/// Built once at startup and shared read-only. Tokens are matched exactly and
/// case-sensitively; aliases resolve to a registered canonical token.
pub struct CodecRegistry {
    encoders: HashMap<String, Arc<dyn ImageEncoder>>,
    aliases: HashMap<String, String>,
    decoders: HashMap<ImageFormat, String>,
}

static GLOBAL_REGISTRY: OnceLock<Arc<CodecRegistry>> = OnceLock::new();

impl CodecRegistry {
    /// Registry with no formats at all
    pub fn empty() -> Self {
        Self {
            encoders: HashMap::new(),
            aliases: HashMap::new(),
            decoders: HashMap::new(),
        }
    }

    /// Registry with jpeg (alias jpg), png, gif and webp
    pub fn with_defaults(config: &CodecConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(JpegEncoder::with_quality(config.jpeg_quality)));
        registry.register(Arc::new(PngEncoder));
        registry.register(Arc::new(GifEncoder::with_speed(config.gif_speed)));
        registry.register(Arc::new(WebPEncoder));
        registry.aliases.insert(JPG.to_string(), JPEG.to_string());
        registry
    }

    /// Process-wide registry built from default codec settings
    pub fn global() -> Arc<CodecRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(Self::with_defaults(&CodecConfig::default())))
            .clone()
    }

    /// Add or replace the encoder for `encoder.format()`
    ///
    /// If the encoder claims a container format, stored blobs of that format
    /// decode under its token from then on.
    pub fn register(&mut self, encoder: Arc<dyn ImageEncoder>) {
        let token = encoder.format().to_string();
        self.aliases.remove(&token);
        self.decoders.retain(|_, claimed| *claimed != token);
        if let Some(container) = encoder.image_format() {
            self.decoders.insert(container, token.clone());
        }
        self.encoders.insert(token, encoder);
    }

    /// Make `alias` resolve to the already registered `target`
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<(), ImageError> {
        let canonical = self
            .canonical(target)
            .ok_or_else(|| ImageError::unknown_format(target))?
            .to_string();
        self.aliases.insert(alias.to_string(), canonical);
        Ok(())
    }

    /// Canonical token for `token`, following aliases
    pub fn canonical(&self, token: &str) -> Option<&str> {
        if let Some((key, _)) = self.encoders.get_key_value(token) {
            return Some(key.as_str());
        }
        self.aliases
            .get(token)
            .filter(|target| self.encoders.contains_key(target.as_str()))
            .map(String::as_str)
    }

    pub fn supports(&self, token: &str) -> bool {
        self.canonical(token).is_some()
    }

    /// Every accepted token including aliases, sorted
    pub fn formats(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self
            .encoders
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .collect();
        tokens.sort_unstable();
        tokens
    }

    /// Longest canonical token; ties resolve to the alphabetically first
    pub fn longest_token(&self) -> Option<&str> {
        self.encoders
            .keys()
            .map(String::as_str)
            .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
    }

    /// MIME type of the bytes `encode` produces for `token`
    pub fn content_type(&self, token: &str) -> Option<&'static str> {
        self.encoder(token).map(|encoder| encoder.content_type())
    }

    fn encoder(&self, token: &str) -> Option<&Arc<dyn ImageEncoder>> {
        self.canonical(token)
            .and_then(|canonical| self.encoders.get(canonical))
    }

    /// Detect the format from the byte signature and decode to RGBA8
    pub fn decode(&self, data: &[u8]) -> Result<DecodedImage, ImageError> {
        let detected = image::guess_format(data)
            .map_err(|e| ImageError::corrupt(format!("unrecognised image data: {}", e)))?;

        let token = self
            .decoders
            .get(&detected)
            .map(String::as_str)
            .ok_or_else(|| {
                ImageError::corrupt(format!(
                    "no codec registered for {}",
                    format::format_name(detected)
                ))
            })?;

        let decoded = image::load_from_memory_with_format(data, detected)
            .map_err(|e| ImageError::corrupt(format!("failed to decode {}: {}", token, e)))?;

        let rgba = decoded.to_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(ImageError::corrupt(format!(
                "decoded {} image has zero size",
                token
            )));
        }

        tracing::debug!(
            format = token,
            width = rgba.width(),
            height = rgba.height(),
            "Decoded image"
        );

        Ok(DecodedImage {
            raster: Raster::from_rgba(rgba),
            format: token.to_string(),
        })
    }

    /// Encode `image` with the encoder registered for `token`
    pub fn encode(&self, image: &Raster, token: &str) -> Result<EncodedImage, ImageError> {
        let encoder = self
            .encoder(token)
            .ok_or_else(|| ImageError::unknown_format(token))?;
        let (width, height) = image.dimensions();
        encoder.encode(image.as_rgba().as_raw(), width, height)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults(&CodecConfig::default())
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

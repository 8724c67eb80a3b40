//! Image encoder abstraction
//!
//! Each output format is one [`ImageEncoder`] implementation. The registry
//! owns them as trait objects, so adding a format never touches the
//! transform code.

use std::io::Cursor;

use super::format::{GIF, JPEG, PNG, WEBP};
use crate::constants::{DEFAULT_GIF_SPEED, DEFAULT_JPEG_QUALITY, GIF_SPEED_RANGE};
use crate::error::ImageError;

/// Result of encoding an image
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// Canonical format token
    pub format: &'static str,
    /// Content-Type header value
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: &'static str, content_type: &'static str) -> Self {
        Self {
            data,
            format,
            content_type,
        }
    }
}

/// Trait for image encoders
///
/// Implementations turn raw RGBA8 pixels (4 bytes per pixel, row-major) into
/// an encoded byte stream. The trait is object-safe.
pub trait ImageEncoder: Send + Sync {
    /// Canonical token this encoder is registered under
    fn format(&self) -> &'static str;

    /// Content-Type of the produced bytes
    fn content_type(&self) -> &'static str;

    /// Encode raw RGBA image data
    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage, ImageError>;

    /// Container format whose decoding maps back to this encoder's token
    ///
    /// `None` registers an encode-only format.
    fn image_format(&self) -> Option<image::ImageFormat> {
        None
    }
}

/// Reject buffers that do not hold exactly `width * height` RGBA pixels
fn check_rgba_len(format: &str, data: &[u8], width: u32, height: u32) -> Result<(), ImageError> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 {
        return Err(ImageError::encode_failed(
            format,
            format!("invalid dimensions {}x{}", width, height),
        ));
    }
    if data.len() != expected {
        return Err(ImageError::encode_failed(
            format,
            format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                data.len()
            ),
        ));
    }
    Ok(())
}

/// JPEG encoder using the image crate
#[derive(Debug, Clone, Copy)]
pub struct JpegEncoder {
    /// Quality (1-100)
    pub quality: u8,
}

impl Default for JpegEncoder {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl JpegEncoder {
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> &'static str {
        JPEG
    }

    fn content_type(&self) -> &'static str {
        "image/jpeg"
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage, ImageError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;

        check_rgba_len(JPEG, data, width, height)?;

        // JPEG has no alpha channel
        let rgb_data = rgba_to_rgb(data);

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, self.quality);

        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8)
            .map_err(|e| ImageError::encode_failed(JPEG, e.to_string()))?;

        Ok(EncodedImage::new(
            output.into_inner(),
            JPEG,
            self.content_type(),
        ))
    }

    fn image_format(&self) -> Option<image::ImageFormat> {
        Some(image::ImageFormat::Jpeg)
    }
}

/// PNG encoder using the image crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> &'static str {
        PNG
    }

    fn content_type(&self) -> &'static str {
        "image/png"
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage, ImageError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;

        check_rgba_len(PNG, data, width, height)?;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder
            .write_image(data, width, height, image::ColorType::Rgba8)
            .map_err(|e| ImageError::encode_failed(PNG, e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), PNG, self.content_type()))
    }

    fn image_format(&self) -> Option<image::ImageFormat> {
        Some(image::ImageFormat::Png)
    }
}

/// GIF encoder using the image crate's NeuQuant quantizer
#[derive(Debug, Clone, Copy)]
pub struct GifEncoder {
    /// Quantizer speed (1 = best quality, 30 = fastest)
    pub speed: i32,
}

impl Default for GifEncoder {
    fn default() -> Self {
        Self {
            speed: DEFAULT_GIF_SPEED,
        }
    }
}

impl GifEncoder {
    pub fn with_speed(speed: i32) -> Self {
        Self {
            speed: speed.clamp(*GIF_SPEED_RANGE.start(), *GIF_SPEED_RANGE.end()),
        }
    }
}

impl ImageEncoder for GifEncoder {
    fn format(&self) -> &'static str {
        GIF
    }

    fn content_type(&self) -> &'static str {
        "image/gif"
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage, ImageError> {
        use image::codecs::gif::GifEncoder as ImageGifEncoder;

        check_rgba_len(GIF, data, width, height)?;

        let mut output = Vec::new();
        {
            // The trailer is written when the encoder drops
            let mut encoder = ImageGifEncoder::new_with_speed(&mut output, self.speed);
            encoder
                .encode(data, width, height, image::ColorType::Rgba8)
                .map_err(|e| ImageError::encode_failed(GIF, e.to_string()))?;
        }

        Ok(EncodedImage::new(output, GIF, self.content_type()))
    }

    fn image_format(&self) -> Option<image::ImageFormat> {
        Some(image::ImageFormat::Gif)
    }
}

/// WebP encoder using the image crate
///
/// Note: The `image` crate only supports lossless WebP encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPEncoder;

impl ImageEncoder for WebPEncoder {
    fn format(&self) -> &'static str {
        WEBP
    }

    fn content_type(&self) -> &'static str {
        "image/webp"
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage, ImageError> {
        use image::codecs::webp::WebPEncoder as ImageWebPEncoder;
        use image::ImageEncoder as _;

        check_rgba_len(WEBP, data, width, height)?;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageWebPEncoder::new_lossless(&mut output);

        encoder
            .write_image(data, width, height, image::ColorType::Rgba8)
            .map_err(|e| ImageError::encode_failed(WEBP, e.to_string()))?;

        Ok(EncodedImage::new(
            output.into_inner(),
            WEBP,
            self.content_type(),
        ))
    }

    fn image_format(&self) -> Option<image::ImageFormat> {
        Some(image::ImageFormat::WebP)
    }
}

/// Convert RGBA to RGB by discarding alpha channel
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for chunk in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }
    rgb
}

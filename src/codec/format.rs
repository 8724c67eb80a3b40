//! Format tokens and their mapping to `image` crate formats

use image::ImageFormat;

pub const JPEG: &str = "jpeg";
pub const JPG: &str = "jpg";
pub const PNG: &str = "png";
pub const GIF: &str = "gif";
pub const WEBP: &str = "webp";

/// Human-readable name for a detected format, used in error messages
pub fn format_name(format: ImageFormat) -> &'static str {
    format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("unknown")
}

/// MIME type for a canonical token
pub fn content_type(token: &str) -> Option<&'static str> {
    match token {
        JPEG => Some("image/jpeg"),
        PNG => Some("image/png"),
        GIF => Some("image/gif"),
        WEBP => Some("image/webp"),
        _ => None,
    }
}

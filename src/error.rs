//! Error types for the transform pipeline
//!
//! Every failure is terminal for the request that produced it. The HTTP
//! layer in front of this crate maps errors through [`ImageError::to_http_status`].

use std::fmt;

use crate::storage::StorageError;

/// Errors that can occur while storing, decoding, transforming or encoding images
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    // === Lookup Errors ===
    /// Source key is absent from the blob store
    NotFound { key: String },

    // === Codec Errors ===
    /// No decoder recognised the bytes, or the payload is malformed
    UnsupportedOrCorruptImage { message: String },
    /// Format token has no registered encoder
    UnknownFormat { format: String },
    /// The encoder for a known format failed
    EncodeFailed { format: String, message: String },

    // === Processing Errors ===
    /// Resampling backend failed
    ResizeFailed { message: String },

    // === Parameter Errors ===
    /// Width/height is unparsable, negative, zero in both axes or over the limit
    InvalidDimension { value: String, reason: String },
    /// Rotation angle is unparsable or not finite
    InvalidAngle { value: String },
    /// Blob key is not a single safe storage path component
    InvalidKey { key: String, reason: String },
    /// The artifact key derived from a valid source key and parameters
    /// exceeds the store's key length limit
    ArtifactKeyTooLong { key: String, max: usize },

    // === Storage Errors ===
    /// Blob store failed while reading
    StorageReadFailed { key: String, message: String },
    /// Blob store failed while writing
    StorageWriteFailed { key: String, message: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::NotFound { key } => write!(f, "Image not found: {}", key),

            ImageError::UnsupportedOrCorruptImage { message } => {
                write!(f, "Unsupported or corrupt image: {}", message)
            }
            ImageError::UnknownFormat { format } => {
                write!(f, "Unknown image format: {}", format)
            }
            ImageError::EncodeFailed { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }

            ImageError::ResizeFailed { message } => write!(f, "Resize failed: {}", message),

            ImageError::InvalidDimension { value, reason } => {
                write!(f, "Invalid dimension '{}': {}", value, reason)
            }
            ImageError::InvalidAngle { value } => {
                write!(f, "Invalid rotation angle '{}'", value)
            }
            ImageError::InvalidKey { key, reason } => {
                write!(f, "Invalid key '{}': {}", key, reason)
            }
            ImageError::ArtifactKeyTooLong { key, max } => write!(
                f,
                "Artifact key '{}' would exceed {} bytes; use a shorter source key or angle",
                key, max
            ),

            ImageError::StorageReadFailed { key, message } => {
                write!(f, "Failed to read '{}': {}", key, message)
            }
            ImageError::StorageWriteFailed { key, message } => {
                write!(f, "Failed to write '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    /// Maps errors to HTTP status codes
    ///
    /// Status mapping:
    /// - NotFound → 404
    /// - InvalidDimension, InvalidAngle, UnknownFormat, InvalidKey → 400
    /// - ArtifactKeyTooLong → 422 (the request is valid, its artifact is unstorable)
    /// - storage, codec and resampling failures → 500
    pub fn to_http_status(&self) -> u16 {
        match self {
            ImageError::NotFound { .. } => 404,

            ImageError::InvalidDimension { .. }
            | ImageError::InvalidAngle { .. }
            | ImageError::UnknownFormat { .. }
            | ImageError::InvalidKey { .. } => 400,

            ImageError::ArtifactKeyTooLong { .. } => 422,

            ImageError::UnsupportedOrCorruptImage { .. }
            | ImageError::EncodeFailed { .. }
            | ImageError::ResizeFailed { .. }
            | ImageError::StorageReadFailed { .. }
            | ImageError::StorageWriteFailed { .. } => 500,
        }
    }

    /// Helper constructors for common error patterns
    pub fn not_found(key: impl Into<String>) -> Self {
        ImageError::NotFound { key: key.into() }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        ImageError::UnsupportedOrCorruptImage {
            message: message.into(),
        }
    }

    pub fn unknown_format(format: impl Into<String>) -> Self {
        ImageError::UnknownFormat {
            format: format.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        ImageError::ResizeFailed {
            message: message.into(),
        }
    }

    pub fn invalid_dimension(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ImageError::InvalidDimension {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn artifact_key_too_long(key: impl Into<String>, max: usize) -> Self {
        ImageError::ArtifactKeyTooLong {
            key: key.into(),
            max,
        }
    }

    pub fn invalid_angle(value: impl Into<String>) -> Self {
        ImageError::InvalidAngle {
            value: value.into(),
        }
    }
}

impl From<StorageError> for ImageError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { key } => ImageError::NotFound { key },
            StorageError::InvalidKey { key, reason } => ImageError::InvalidKey { key, reason },
            StorageError::Read { key, source } => ImageError::StorageReadFailed {
                key,
                message: source.to_string(),
            },
            StorageError::Write { key, source } => ImageError::StorageWriteFailed {
                key,
                message: source.to_string(),
            },
        }
    }
}

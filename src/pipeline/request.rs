//! Transform requests and parameter parsing

use std::fmt;
use std::str::FromStr;

use crate::error::ImageError;

/// Rotation angle in degrees, with the text it was parsed from
///
/// The text is kept because artifact keys embed it verbatim: `90` and `90.0`
/// are distinct artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct Angle {
    degrees: f64,
    literal: String,
}

impl Angle {
    /// Build an angle from a number; the literal is its shortest decimal form
    pub fn from_degrees(degrees: f64) -> Result<Self, ImageError> {
        let literal = degrees.to_string();
        if !degrees.is_finite() {
            return Err(ImageError::invalid_angle(literal));
        }
        Ok(Self { degrees, literal })
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl FromStr for Angle {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: f64 = s.parse().map_err(|_| ImageError::invalid_angle(s))?;
        if !degrees.is_finite() {
            return Err(ImageError::invalid_angle(s));
        }
        Ok(Self {
            degrees,
            literal: s.to_string(),
        })
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Parse a width or height given as non-negative decimal integer text
///
/// `0` is accepted here; whether it is meaningful depends on the other axis.
pub fn parse_dimension(value: &str) -> Result<u32, ImageError> {
    value.parse::<u32>().map_err(|_| {
        let reason = if value.trim_start().starts_with('-') {
            "must be non-negative"
        } else {
            "must be a non-negative integer"
        };
        ImageError::invalid_dimension(value, reason)
    })
}

/// What to do with the source image
#[derive(Debug, Clone, PartialEq)]
pub enum TransformKind {
    /// Re-encode without geometric change; nothing is persisted
    Fetch,
    Rotate { angle: Angle },
    /// Zero in one axis keeps the source aspect ratio
    Resize { width: u32, height: u32 },
}

impl TransformKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            TransformKind::Fetch => "fetch",
            TransformKind::Rotate { .. } => "rotate",
            TransformKind::Resize { .. } => "resize",
        }
    }
}

/// One request against a stored source image
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRequest {
    pub source_key: String,
    pub kind: TransformKind,
    /// Output format override; the source format is used when absent
    pub format: Option<String>,
}

impl TransformRequest {
    pub fn new(source_key: impl Into<String>, kind: TransformKind) -> Self {
        Self {
            source_key: source_key.into(),
            kind,
            format: None,
        }
    }

    pub fn fetch(source_key: impl Into<String>) -> Self {
        Self::new(source_key, TransformKind::Fetch)
    }

    pub fn rotate(source_key: impl Into<String>, angle: Angle) -> Self {
        Self::new(source_key, TransformKind::Rotate { angle })
    }

    pub fn resize(source_key: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(source_key, TransformKind::Resize { width, height })
    }

    /// Rotate request from the angle's decimal text
    pub fn parse_rotate(source_key: impl Into<String>, angle: &str) -> Result<Self, ImageError> {
        Ok(Self::rotate(source_key, angle.parse()?))
    }

    /// Resize request from width/height decimal text
    pub fn parse_resize(
        source_key: impl Into<String>,
        width: &str,
        height: &str,
    ) -> Result<Self, ImageError> {
        Ok(Self::resize(
            source_key,
            parse_dimension(width)?,
            parse_dimension(height)?,
        ))
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

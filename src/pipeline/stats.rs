//! Per-request transform statistics

use std::time::Duration;

/// Kind of work a request performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationType {
    Fetch,
    Rotate,
    Resize,
}

impl TransformationType {
    /// Get the log label for this transformation type
    pub fn as_label(&self) -> &'static str {
        match self {
            TransformationType::Fetch => "fetch",
            TransformationType::Rotate => "rotate",
            TransformationType::Resize => "resize",
        }
    }
}

/// Sizes, dimensions and timing for one processed request
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStats {
    pub kind: TransformationType,
    /// Stored source size in bytes
    pub input_size: usize,
    /// Encoded output size in bytes
    pub output_size: usize,
    /// Decoded source dimensions (width, height)
    pub source_dimensions: (u32, u32),
    /// Output dimensions (width, height)
    pub output_dimensions: (u32, u32),
    /// Canonical output format token
    pub output_format: String,
    /// Wall time from blob read to encoded output
    pub elapsed: Duration,
}

impl TransformStats {
    pub fn builder(kind: TransformationType) -> TransformStatsBuilder {
        TransformStatsBuilder::new(kind)
    }

    /// Output size relative to the input (output / input)
    pub fn compression_ratio(&self) -> f64 {
        if self.input_size == 0 {
            0.0
        } else {
            self.output_size as f64 / self.input_size as f64
        }
    }

    pub fn was_resized(&self) -> bool {
        self.source_dimensions != self.output_dimensions
    }

    /// Emit these stats as one structured `info` event
    pub fn log(&self, source_key: &str, output_key: Option<&str>) {
        tracing::info!(
            kind = self.kind.as_label(),
            source_key = %source_key,
            output_key = output_key.unwrap_or("-"),
            format = %self.output_format,
            input_bytes = self.input_size,
            output_bytes = self.output_size,
            source_width = self.source_dimensions.0,
            source_height = self.source_dimensions.1,
            output_width = self.output_dimensions.0,
            output_height = self.output_dimensions.1,
            elapsed_ms = self.elapsed.as_secs_f64() * 1000.0,
            "Transform completed"
        );
    }
}

/// Builder for TransformStats
#[derive(Debug, Clone)]
pub struct TransformStatsBuilder {
    kind: TransformationType,
    input_size: usize,
    output_size: usize,
    source_dimensions: (u32, u32),
    output_dimensions: (u32, u32),
    output_format: String,
    elapsed: Duration,
}

impl TransformStatsBuilder {
    fn new(kind: TransformationType) -> Self {
        Self {
            kind,
            input_size: 0,
            output_size: 0,
            source_dimensions: (0, 0),
            output_dimensions: (0, 0),
            output_format: String::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn input_size(mut self, size: usize) -> Self {
        self.input_size = size;
        self
    }

    pub fn output_size(mut self, size: usize) -> Self {
        self.output_size = size;
        self
    }

    pub fn source_dimensions(mut self, width: u32, height: u32) -> Self {
        self.source_dimensions = (width, height);
        self
    }

    pub fn output_dimensions(mut self, width: u32, height: u32) -> Self {
        self.output_dimensions = (width, height);
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn build(self) -> TransformStats {
        TransformStats {
            kind: self.kind,
            input_size: self.input_size,
            output_size: self.output_size,
            source_dimensions: self.source_dimensions,
            output_dimensions: self.output_dimensions,
            output_format: self.output_format,
            elapsed: self.elapsed,
        }
    }
}

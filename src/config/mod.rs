// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_GIF_SPEED, DEFAULT_JPEG_QUALITY, DEFAULT_LOG_LEVEL, DEFAULT_MAX_HEIGHT,
    DEFAULT_MAX_WIDTH, DEFAULT_STORAGE_ROOT, GIF_SPEED_RANGE,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Blob store backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per key under `root` (default)
    #[default]
    Filesystem,
    /// Process-local map, contents are lost on exit
    Memory,
}

fn default_storage_root() -> String {
    DEFAULT_STORAGE_ROOT.to_string()
}

/// Blob store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type (default: filesystem)
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the filesystem backend (default: ./uploads)
    #[serde(default = "default_storage_root")]
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: default_storage_root(),
        }
    }
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_gif_speed() -> i32 {
    DEFAULT_GIF_SPEED
}

/// Encoder settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodecConfig {
    /// JPEG quality 1-100 (default: 75)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// GIF quantizer speed 1-30 (default: 10)
    #[serde(default = "default_gif_speed")]
    pub gif_speed: i32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            gif_speed: default_gif_speed(),
        }
    }
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

/// Limits applied to transform parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformConfig {
    /// Largest accepted resize width (default: 4096)
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Largest accepted resize height (default: 4096)
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event (default)
    #[default]
    Json,
    /// Multi-line human readable output
    Pretty,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive (default: info). RUST_LOG takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: json)
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });

        if let Some(var_name) = missing {
            return Err(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            ));
        }

        // An empty or comment-only document means "all defaults"
        let is_blank = substituted
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if is_blank {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.backend == StorageBackend::Filesystem && self.storage.root.trim().is_empty()
        {
            return Err("storage.root cannot be empty for the filesystem backend".to_string());
        }

        if !(1..=100).contains(&self.codec.jpeg_quality) {
            return Err(format!(
                "codec.jpeg_quality must be between 1 and 100, got {}",
                self.codec.jpeg_quality
            ));
        }

        if !GIF_SPEED_RANGE.contains(&self.codec.gif_speed) {
            return Err(format!(
                "codec.gif_speed must be between {} and {}, got {}",
                GIF_SPEED_RANGE.start(),
                GIF_SPEED_RANGE.end(),
                self.codec.gif_speed
            ));
        }

        if self.transform.max_width == 0 {
            return Err("transform.max_width must be greater than 0".to_string());
        }
        if self.transform.max_height == 0 {
            return Err("transform.max_height must be greater than 0".to_string());
        }

        if self.logging.level.trim().is_empty() {
            return Err("logging.level cannot be empty".to_string());
        }

        Ok(())
    }
}

// Constants module - centralized default values for configuration
//
// Defaults referenced by the config layer, the codec registry and the
// transform pipeline live here so the YAML defaults and the code agree.

// =============================================================================
// Storage defaults
// =============================================================================

/// Default directory for the filesystem blob store
pub const DEFAULT_STORAGE_ROOT: &str = "./uploads";

/// Maximum accepted blob key length in bytes
///
/// The filesystem backend writes through `.{key}.{uuid}.tmp`, which must stay
/// under the common 255-byte file name limit.
pub const MAX_KEY_LENGTH: usize = 200;

// =============================================================================
// Codec defaults
// =============================================================================

/// Default JPEG quality (matches the common libjpeg default)
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Default GIF quantizer speed (1 = best quality, 30 = fastest)
pub const DEFAULT_GIF_SPEED: i32 = 10;

/// Valid GIF quantizer speed range
pub const GIF_SPEED_RANGE: std::ops::RangeInclusive<i32> = 1..=30;

// =============================================================================
// Transform defaults
// =============================================================================

/// Default maximum width for resize targets
pub const DEFAULT_MAX_WIDTH: u32 = 4096;

/// Default maximum height for resize targets
pub const DEFAULT_MAX_HEIGHT: u32 = 4096;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

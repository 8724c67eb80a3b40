//! Derived artifact keys
//!
//! Artifact keys are a pure function of the source key, the transform
//! parameters and the canonical output format:
//!
//! ```text
//! photo.png, rotate "90", png     -> photo_rotated_90.png
//! photo.png, resize 50x25, jpeg   -> photo_resized_50x25.jpeg
//! 3f2a..c1,  rotate "-12.5", gif  -> 3f2a..c1_rotated_-12.5.gif
//! ```
//!
//! Parameters are embedded verbatim, so different parameter sets never
//! produce the same key for one source.

/// Remove exactly one trailing extension from `key`
///
/// The extension starts at the final `.` and only counts when that `.` comes
/// after the last `/`. A key that is all extension (`.png`) strips to empty.
pub fn strip_extension(key: &str) -> &str {
    let name_start = key.rfind('/').map_or(0, |i| i + 1);
    match key[name_start..].rfind('.') {
        Some(dot) => &key[..name_start + dot],
        None => key,
    }
}

/// `<stem>_rotated_<angle>.<ext>` where `angle` is the caller's original text
pub fn rotated_key(source_key: &str, angle_literal: &str, ext: &str) -> String {
    format!(
        "{}_rotated_{}.{}",
        strip_extension(source_key),
        angle_literal,
        ext
    )
}

/// `<stem>_resized_<width>x<height>.<ext>`
pub fn resized_key(source_key: &str, width: u32, height: u32, ext: &str) -> String {
    format!(
        "{}_resized_{}x{}.{}",
        strip_extension(source_key),
        width,
        height,
        ext
    )
}

//! Transform pipeline
//!
//! Turns a [`TransformRequest`] into encoded bytes:
//!
//! 1. read the source blob
//! 2. decode it (format detected from the bytes)
//! 3. rotate or resize (Fetch skips this)
//! 4. encode in the requested format, or the source format
//! 5. for Rotate/Resize, write the artifact under its derived key
//!
//! Any failure ends the request and nothing is written.

mod engine;
mod request;
mod stats;

pub use engine::{TransformEngine, TransformOutput};
pub use request::{parse_dimension, Angle, TransformKind, TransformRequest};
pub use stats::{TransformStats, TransformStatsBuilder, TransformationType};

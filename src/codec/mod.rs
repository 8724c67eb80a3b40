//! Codec registry
//!
//! Decoding auto-detects the container from the byte signature. Encoding is
//! dispatched by format token through [`CodecRegistry`], which maps each
//! token to an [`ImageEncoder`]. Built-in tokens: `jpeg` (alias `jpg`),
//! `png`, `gif`, `webp`.

pub mod encoder;
pub mod format;
mod registry;

pub use encoder::{EncodedImage, ImageEncoder};
pub use registry::{CodecRegistry, DecodedImage};

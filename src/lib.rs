// Pixelstore image transform library

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod naming;
pub mod pipeline;
pub mod storage;
pub mod transform;

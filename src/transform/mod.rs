//! Geometric transforms: rotation and resizing.
//!
//! Transforms are pure functions over [`Raster`] values: the source is never
//! mutated and every call returns a freshly allocated raster.
//!
//! # Coordinate System
//!
//! - Rasters carry explicit [`Bounds`]; the origin is not assumed to be `(0,0)`
//! - Rotation angles are in degrees
//! - Resize targets are absolute pixel counts

mod raster;
mod resize;
mod rotate;

pub use raster::{Bounds, Raster, TRANSPARENT};
pub use resize::{resize, resolve_dimensions};
pub use rotate::rotate;

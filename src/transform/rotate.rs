//! Nearest-neighbour rotation on a fixed canvas.
//!
//! # Algorithm
//!
//! The output canvas has exactly the input bounds, so rotated corners are
//! clipped. For every destination pixel the rotated coordinate is used to
//! look up a source pixel:
//!
//! ```text
//! mid  = (max_x / 2, max_y / 2)
//! p    = dst - mid
//! src  = (p.x·cosθ − p.y·sinθ, p.x·sinθ + p.y·cosθ) + mid
//! src  = trunc(src + 0.5)
//! ```
//!
//! Two properties differ from a textbook rotation and must not be "fixed",
//! since stored artifacts depend on them:
//! - the midpoint comes from the maximum bound alone, so it is off-centre
//!   when the bounds do not start at the origin
//! - the forward rotation matrix is applied as a source lookup, so content
//!   turns by `-θ` in image coordinates
//!
//! Destination pixels whose lookup lands outside the source stay transparent
//! black. There is no interpolation and no fill colour.

use super::raster::Raster;

/// Rotate `image` by `angle_degrees` around the max-bound midpoint.
///
/// The angle must be finite; the pipeline rejects anything else before
/// calling this.
pub fn rotate(image: &Raster, angle_degrees: f64) -> Raster {
    let bounds = image.bounds();
    let mut rotated = Raster::blank(bounds);

    let mid_x = bounds.max_x as f64 / 2.0;
    let mid_y = bounds.max_y as f64 / 2.0;

    let angle_rad = angle_degrees * std::f64::consts::PI / 180.0;
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    for y in bounds.min_y..bounds.max_y {
        for x in bounds.min_x..bounds.max_x {
            let px = x as f64 - mid_x;
            let py = y as f64 - mid_y;

            let new_x = px * cos - py * sin + mid_x;
            let new_y = px * sin + py * cos + mid_y;

            // Truncation toward zero after +0.5
            let src_x = (new_x + 0.5) as i64;
            let src_y = (new_y + 0.5) as i64;

            if bounds.contains(src_x, src_y) {
                rotated.put(x, y, image.pixel(src_x as i32, src_y as i32));
            }
        }
    }

    rotated
}

//! Lanczos3 resampling via `fast_image_resize`.

use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use std::num::NonZeroU32;

use super::raster::Raster;
use crate::error::ImageError;

/// Resolve requested target dimensions against the source size.
///
/// A zero in exactly one axis is derived from the other so the source aspect
/// ratio is kept (rounded, never below 1). Zero in both axes is rejected.
pub fn resolve_dimensions(
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
) -> Result<(u32, u32), ImageError> {
    match (width, height) {
        (0, 0) => Err(ImageError::invalid_dimension(
            "0x0",
            "width and height cannot both be zero",
        )),
        (0, h) => {
            let ratio = src_width as f64 / src_height.max(1) as f64;
            let w = (h as f64 * ratio).round() as u32;
            Ok((w.max(1), h))
        }
        (w, 0) => {
            let ratio = src_height as f64 / src_width.max(1) as f64;
            let h = (w as f64 * ratio).round() as u32;
            Ok((w, h.max(1)))
        }
        (w, h) => Ok((w, h)),
    }
}

/// Resize `image` to `width`×`height` (zero in one axis keeps aspect ratio).
///
/// The output origin is always `(0,0)`. When both dimensions are given the
/// image is stretched to fit them exactly. Filtering runs on premultiplied
/// alpha so transparent pixels contribute no colour.
pub fn resize(image: &Raster, width: u32, height: u32) -> Result<Raster, ImageError> {
    let (src_w, src_h) = image.dimensions();
    let (target_w, target_h) = resolve_dimensions(src_w, src_h, width, height)?;

    let src_width =
        NonZeroU32::new(src_w).ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height =
        NonZeroU32::new(src_h).ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let mut src_image = Image::from_vec_u8(
        src_width,
        src_height,
        image.as_rgba().as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Failed to premultiply alpha: {:?}", e)))?;

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    alpha_mul_div
        .divide_alpha_inplace(&mut dst_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Failed to unpremultiply alpha: {:?}", e)))?;

    let buffer = dst_image.into_vec();
    let rgba = image::RgbaImage::from_raw(target_w, target_h, buffer)
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))?;

    Ok(Raster::from_rgba(rgba))
}

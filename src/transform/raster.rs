//! In-memory RGBA raster with explicit bounds.

use image::{Rgba, RgbaImage};

/// Transparent black, the value of every pixel no transform wrote to
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Half-open rectangle `[min_x, max_x) × [min_y, max_y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds `(0,0)-(width,height)`
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    /// True when the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x as i64
            && x < self.max_x as i64
            && y >= self.min_y as i64
            && y < self.max_y as i64
    }
}

/// A decoded image: RGBA8 pixels addressed in bounds space
///
/// Rasters are read-only from outside the crate; transforms build new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    bounds: Bounds,
    pixels: RgbaImage,
}

impl Raster {
    /// Fully transparent raster covering `bounds`
    pub(crate) fn blank(bounds: Bounds) -> Self {
        Self {
            bounds,
            pixels: RgbaImage::new(bounds.width(), bounds.height()),
        }
    }

    /// Wrap an RGBA buffer with its origin at `(0,0)`
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self::with_origin(pixels, 0, 0)
    }

    /// Wrap an RGBA buffer whose top-left pixel sits at `(min_x, min_y)`
    pub fn with_origin(pixels: RgbaImage, min_x: i32, min_y: i32) -> Self {
        let bounds = Bounds::new(
            min_x,
            min_y,
            min_x + pixels.width() as i32,
            min_y + pixels.height() as i32,
        );
        Self { bounds, pixels }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Pixel at `(x, y)` in bounds space, `None` outside the bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if !self.bounds.contains(x as i64, y as i64) {
            return None;
        }
        Some(*self.pixels.get_pixel(
            (x - self.bounds.min_x) as u32,
            (y - self.bounds.min_y) as u32,
        ))
    }

    /// Pixel at `(x, y)`, transparent black outside the bounds
    pub fn pixel(&self, x: i32, y: i32) -> Rgba<u8> {
        self.get(x, y).unwrap_or(TRANSPARENT)
    }

    /// Caller guarantees `(x, y)` is inside the bounds
    #[inline]
    pub(crate) fn put(&mut self, x: i32, y: i32, value: Rgba<u8>) {
        self.pixels.put_pixel(
            (x - self.bounds.min_x) as u32,
            (y - self.bounds.min_y) as u32,
            value,
        );
    }

    /// Underlying pixel buffer (row-major, 4 bytes per pixel)
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

//! Source raster and the crop executor.
//!
//! [`SourceImage`] is the immutable RGBA8 raster an editing session is bound
//! to. The executor half of this module turns a resolved selection into a new
//! image: [`validate_selection`] clamps it to the source and enforces a minimum
//! pixel size, and [`SourceImage::crop`] cuts it out.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use image::{RgbaImage, imageops};
use tracing::warn;

use crate::consts::BYTES_PER_PIXEL;
use crate::geom::{PixelRect, Rect, Size};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CropError {
    #[error("pixel buffer of {actual} bytes does not match {width}x{height} RGBA")]
    BufferSize { width: u32, height: u32, actual: usize },
    #[error("selection {width}x{height} is below the {min}px minimum")]
    SelectionTooSmall { width: i64, height: i64, min: i64 },
    #[error("selection does not overlap the image")]
    EmptySelection,
    #[error("no image is bound")]
    NoImage,
}

/// An RGBA8 raster, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    raster: RgbaImage,
}

impl SourceImage {
    /// Wrap a pixel buffer, checking its length against the dimensions.
    ///
    /// Zero dimensions are accepted (with an empty buffer); the viewport
    /// refuses to fit such an image rather than failing here.
    ///
    /// # Errors
    ///
    /// [`CropError::BufferSize`] when `pixels.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CropError> {
        let actual = pixels.len();
        let raster = RgbaImage::from_raw(width, height, pixels).ok_or(CropError::BufferSize { width, height, actual })?;
        // from_raw accepted the buffer, so this product fits in usize.
        if actual != width as usize * height as usize * BYTES_PER_PIXEL {
            return Err(CropError::BufferSize { width, height, actual });
        }
        Ok(Self { raster })
    }

    #[must_use]
    pub fn from_rgba(raster: RgbaImage) -> Self {
        Self { raster }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.raster.as_raw()
    }

    #[must_use]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.raster
    }

    #[must_use]
    pub fn into_rgba(self) -> RgbaImage {
        self.raster
    }

    /// Dimensions as floating-point size for the viewport.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.raster.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Cut `rect` out into a new image.
    ///
    /// Negative origins are raised to zero without shrinking the size, and a
    /// size running past the right or bottom edge is cut at that edge.
    ///
    /// # Errors
    ///
    /// [`CropError::EmptySelection`] when nothing of `rect` lies inside the image.
    pub fn crop(&self, rect: PixelRect) -> Result<Self, CropError> {
        let width = i64::from(self.width());
        let height = i64::from(self.height());

        let x = rect.left.max(0);
        let y = rect.top.max(0);
        let w = rect.width().min(width.saturating_sub(x));
        let h = rect.height().min(height.saturating_sub(y));
        if w <= 0 || h <= 0 {
            return Err(CropError::EmptySelection);
        }

        let (x, y, w, h) = (to_u32(x)?, to_u32(y)?, to_u32(w)?, to_u32(h)?);
        Ok(Self { raster: imageops::crop_imm(&self.raster, x, y, w, h).to_image() })
    }
}

/// Clamp a resolved selection to `[0, width] × [0, height]` and require
/// each side to be at least `min_side` source pixels.
///
/// The returned rectangle has a truncated origin and a size truncated from
/// the clamped float size, so a selection from 10.7 to 61.0 is 50 pixels wide.
///
/// # Errors
///
/// [`CropError::SelectionTooSmall`] after clamping.
pub fn validate_selection(coords: Rect, width: u32, height: u32, min_side: f64) -> Result<PixelRect, CropError> {
    let w = f64::from(width);
    let h = f64::from(height);
    let clamped = Rect::new(
        clamp_coord(coords.left, w),
        clamp_coord(coords.top, h),
        clamp_coord(coords.right, w),
        clamp_coord(coords.bottom, h),
    );
    let pixels = PixelRect::from_rect_sized(clamped);
    if clamped.width() < min_side || clamped.height() < min_side {
        #[allow(clippy::cast_possible_truncation)]
        let min = min_side as i64;
        warn!(
            width = clamped.width(),
            height = clamped.height(),
            min_side,
            "crop: selection rejected as too small"
        );
        return Err(CropError::SelectionTooSmall { width: pixels.width(), height: pixels.height(), min });
    }
    Ok(pixels)
}

/// Clamp into `[0, max]`; NaN collapses to zero.
fn clamp_coord(value: f64, max: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

fn to_u32(value: i64) -> Result<u32, CropError> {
    u32::try_from(value).map_err(|_| CropError::EmptySelection)
}

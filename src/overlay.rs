//! Screen-space geometry of the crop overlay decorations.
//!
//! Computed from a read-only view of the crop rectangle so the renderer only
//! has to stroke and fill what it is given.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::consts::{BORDER_WIDTH_DP, CORNER_LENGTH_DP, CORNER_WIDTH_DP, GRID_WIDTH_DP};
use crate::geom::{Point, Rect, Size};

/// A straight line from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { from: Point::new(x0, y0), to: Point::new(x1, y1) }
    }
}

/// Everything drawn on top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Dimmed bands outside the selection: top, bottom, left, right.
    pub mask: [Rect; 4],
    /// Rule-of-thirds lines: two vertical, then two horizontal.
    pub grid: [Segment; 4],
    /// Selection outline.
    pub border: Rect,
    /// Two L-strokes per corner: top-left, top-right, bottom-left, bottom-right.
    pub corners: [Segment; 8],
    pub border_width: f64,
    pub corner_width: f64,
    pub grid_width: f64,
}

impl Overlay {
    /// Lay out the overlay for `crop` on a surface of `surface` size.
    ///
    /// Returns `None` for an empty selection, in which case nothing is drawn.
    #[must_use]
    pub fn compute(crop: Rect, surface: Size, density: f64) -> Option<Self> {
        if crop.is_empty() {
            return None;
        }
        let Rect { left, top, right, bottom } = crop;
        let (w, h) = (surface.width, surface.height);

        let mask = [
            Rect::new(0.0, 0.0, w, top),
            Rect::new(0.0, bottom, w, h),
            Rect::new(0.0, top, left, bottom),
            Rect::new(right, top, w, bottom),
        ];

        let third_w = crop.width() / 3.0;
        let third_h = crop.height() / 3.0;
        let grid = [
            Segment::new(left + third_w, top, left + third_w, bottom),
            Segment::new(left + third_w * 2.0, top, left + third_w * 2.0, bottom),
            Segment::new(left, top + third_h, right, top + third_h),
            Segment::new(left, top + third_h * 2.0, right, top + third_h * 2.0),
        ];

        let len = CORNER_LENGTH_DP * density;
        let corners = [
            Segment::new(left, top, left + len, top),
            Segment::new(left, top, left, top + len),
            Segment::new(right, top, right - len, top),
            Segment::new(right, top, right, top + len),
            Segment::new(left, bottom, left + len, bottom),
            Segment::new(left, bottom, left, bottom - len),
            Segment::new(right, bottom, right - len, bottom),
            Segment::new(right, bottom, right, bottom - len),
        ];

        Some(Self {
            mask,
            grid,
            border: crop,
            corners,
            border_width: BORDER_WIDTH_DP * density,
            corner_width: CORNER_WIDTH_DP * density,
            grid_width: GRID_WIDTH_DP * density,
        })
    }
}

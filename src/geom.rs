//! Plain geometry values shared by the viewport and the crop editor.
//!
//! `Point`, `Size` and `Rect` are `f64` and are used for both screen space and
//! image-pixel space; which space a value lives in is carried by the name of
//! the field or function that produces it. `PixelRect` is the integer form
//! handed to the crop executor.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a surface or an image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    ///
    /// Anything that divides by a dimension must check this first.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle given by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle anchored at the origin with the given size.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// A rectangle with no area (or inverted edges) is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Whether `other` lies entirely inside `self` (shared edges count as inside).
    ///
    /// An empty rectangle contains nothing.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !self.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }
}

/// Integer rectangle in source-image pixel coordinates.
///
/// Edges may be negative or exceed the image; the crop executor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl PixelRect {
    #[must_use]
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Truncate each edge toward zero.
    ///
    /// This is truncation, not flooring: an edge in `(-1, 0)` becomes `0`, so a
    /// point just off the left or top of the image lands on its first column
    /// or row. Callers that need to tell those apart must check the float
    /// coordinates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_rect_truncated(rect: Rect) -> Self {
        Self::new(rect.left as i64, rect.top as i64, rect.right as i64, rect.bottom as i64)
    }

    /// Truncate the origin and, separately, the float width and height.
    ///
    /// Differs from [`Self::from_rect_truncated`] when the edges have different
    /// fractional parts: `10.7..61.0` gives `10..60`, not `10..61`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_rect_sized(rect: Rect) -> Self {
        let left = rect.left as i64;
        let top = rect.top as i64;
        let width = rect.width() as i64;
        let height = rect.height() as i64;
        Self::new(left, top, left.saturating_add(width), top.saturating_add(height))
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }
}

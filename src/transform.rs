//! Two-dimensional affine transform between image-pixel space and screen space.
//!
//! The matrix uses the canvas convention so it can be handed straight to
//! `CanvasRenderingContext2d::set_transform`:
//!
//! ```text
//! | a  c  e |     x' = a*x + c*y + e
//! | b  d  f |     y' = b*x + d*y + f
//! ```
//!
//! Only scale and translation are produced by the viewport, but composition and
//! inversion are implemented for the general matrix.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// General 2×3 affine matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    #[must_use]
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self { e: tx, f: ty, ..Self::IDENTITY }
    }

    /// Compose: apply `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    /// Translate after the current transform.
    #[must_use]
    pub fn post_translate(&self, dx: f64, dy: f64) -> Self {
        self.then(&Self::translation(dx, dy))
    }

    /// Scale about the pivot `(px, py)` after the current transform.
    #[must_use]
    pub fn post_scale(&self, sx: f64, sy: f64, px: f64, py: f64) -> Self {
        self.post_translate(-px, -py)
            .then(&Self::scale(sx, sy))
            .post_translate(px, py)
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    /// The inverse transform, or `None` when the matrix is singular or non-finite.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if !self.is_finite() || !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    #[must_use]
    pub fn map_point(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }

    /// Axis-aligned bounds of the four mapped corners of `rect`.
    #[must_use]
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.map_point(Point::new(rect.left, rect.top)),
            self.map_point(Point::new(rect.right, rect.top)),
            self.map_point(Point::new(rect.left, rect.bottom)),
            self.map_point(Point::new(rect.right, rect.bottom)),
        ];
        let mut out = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for p in &corners[1..] {
            out.left = out.left.min(p.x);
            out.top = out.top.min(p.y);
            out.right = out.right.max(p.x);
            out.bottom = out.bottom.max(p.y);
        }
        out
    }

    /// Horizontal scale component.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.a
    }

    /// Vertical scale component.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.d
    }
}

//! Viewport transform controller: pan/zoom of the source image on the drawable surface.
//!
//! [`ViewportController`] owns the single [`AffineTransform`] mapping image-pixel
//! space to screen space. Every mutation goes through its methods, each of which
//! returns `true` when the transform changed and observers must re-derive the
//! image bounds (see [`crate::engine::EngineCore`]).
//!
//! No operation fails. Zoom steps past the configured limits are dropped,
//! pans are corrected by the boundary pass, and invalid geometry (zero or
//! negative dimensions) leaves the transform untouched.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use tracing::{debug, warn};

use crate::config::CropConfig;
use crate::geom::{Point, Rect, Size};
use crate::transform::AffineTransform;

/// Pan/zoom state for one editing session.
#[derive(Debug, Clone)]
pub struct ViewportController {
    min_scale: f64,
    max_scale: f64,
    image: Option<Size>,
    surface: Size,
    transform: AffineTransform,
    base_scale: f64,
    relative_scale: f64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(&CropConfig::default())
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(config: &CropConfig) -> Self {
        Self {
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            image: None,
            surface: Size::default(),
            transform: AffineTransform::IDENTITY,
            base_scale: 1.0,
            relative_scale: 1.0,
        }
    }

    // --- Session ---

    /// Attach an image of the given pixel size.
    ///
    /// Fits immediately when the surface size is known; otherwise the fit is
    /// deferred to the next [`Self::on_surface_resized`].
    pub fn bind(&mut self, image: Size, surface: Size) -> bool {
        self.image = Some(image);
        self.surface = surface;
        if surface.is_positive() { self.reset_to_fit() } else { false }
    }

    /// Drop the bound image and return to the identity transform.
    pub fn clear(&mut self) {
        self.image = None;
        self.transform = AffineTransform::IDENTITY;
        self.base_scale = 1.0;
        self.relative_scale = 1.0;
    }

    /// Record a new surface size. A bound image is refitted, discarding any pan/zoom.
    pub fn on_surface_resized(&mut self, surface: Size) -> bool {
        self.surface = surface;
        if self.image.is_some() { self.reset_to_fit() } else { false }
    }

    // --- Gestures ---

    /// Fit the image to the surface and center it.
    ///
    /// The fit is width-first: the scale that matches the image width to the
    /// surface width is used unless the scaled height would overflow the
    /// surface, in which case the height is matched instead. For an image that
    /// already fits on both axes this still stretches it to full width, which
    /// differs from a symmetric "contain" fit.
    pub fn reset_to_fit(&mut self) -> bool {
        let Some(image) = self.image else {
            return false;
        };
        if !image.is_positive() || !self.surface.is_positive() {
            warn!(
                image_w = image.width,
                image_h = image.height,
                surface_w = self.surface.width,
                surface_h = self.surface.height,
                "viewport: fit skipped for degenerate geometry"
            );
            return false;
        }

        let mut base = self.surface.width / image.width;
        if image.height * base > self.surface.height {
            base = self.surface.height / image.height;
        }

        let dx = (self.surface.width - image.width * base) / 2.0;
        let dy = (self.surface.height - image.height * base) / 2.0;
        self.transform = AffineTransform::scale(base, base).post_translate(dx, dy);
        self.base_scale = base;
        self.relative_scale = 1.0;
        debug!(base_scale = base, dx, dy, "viewport: reset to fit");
        true
    }

    /// Translate by a screen-space delta, then pull the image back against the edges.
    pub fn apply_pan(&mut self, dx: f64, dy: f64) -> bool {
        if self.image.is_none() {
            return false;
        }
        if !dx.is_finite() || !dy.is_finite() {
            warn!(dx, dy, "viewport: non-finite pan ignored");
            return false;
        }
        self.transform = self.transform.post_translate(dx, dy);
        self.constrain();
        true
    }

    /// Zoom by `factor` about a screen-space focus point.
    ///
    /// A step that would leave the relative scale outside `[min_scale, max_scale]`
    /// is dropped whole; the transform stays as it was and `false` is returned.
    pub fn apply_scale(&mut self, factor: f64, focus: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        if !factor.is_finite() || factor <= 0.0 || !focus.is_finite() {
            warn!(factor, focus_x = focus.x, focus_y = focus.y, "viewport: invalid scale ignored");
            return false;
        }
        let next = self.relative_scale * factor;
        if next < self.min_scale || next > self.max_scale {
            debug!(current = self.relative_scale, factor, "viewport: zoom step past limit dropped");
            return false;
        }
        self.transform = self.transform.post_scale(factor, factor, focus.x, focus.y);
        self.relative_scale = next;
        self.constrain();
        true
    }

    // --- Mapping ---

    /// Screen point to image-pixel point. `None` only if the transform is singular.
    #[must_use]
    pub fn map_to_image(&self, screen: Point) -> Option<Point> {
        self.transform.invert().map(|inv| inv.map_point(screen))
    }

    /// Image-pixel point to screen point.
    #[must_use]
    pub fn map_to_screen(&self, image: Point) -> Point {
        self.transform.map_point(image)
    }

    /// Screen-space rectangle covered by the image; empty when nothing is bound.
    #[must_use]
    pub fn current_image_bounds(&self) -> Rect {
        match self.image {
            Some(image) => self.transform.map_rect(Rect::from_size(image)),
            None => Rect::default(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn transform(&self) -> AffineTransform {
        self.transform
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    #[must_use]
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Scale that fits the image to the surface.
    #[must_use]
    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    /// User zoom on top of [`Self::base_scale`].
    #[must_use]
    pub fn relative_scale(&self) -> f64 {
        self.relative_scale
    }

    /// Absolute screen pixels per image pixel.
    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.transform.scale_x()
    }

    // --- Internals ---

    /// Center an axis that fits on the surface; otherwise close any gap at either end.
    fn constrain(&mut self) {
        let bounds = self.current_image_bounds();
        let dx = constrain_axis(bounds.left, bounds.right, self.surface.width);
        let dy = constrain_axis(bounds.top, bounds.bottom, self.surface.height);
        self.transform = self.transform.post_translate(dx, dy);
    }
}

/// Shift needed on one axis so the image either sits centered or leaves no gap.
fn constrain_axis(low: f64, high: f64, extent: f64) -> f64 {
    let span = high - low;
    if span <= extent {
        (extent - span) / 2.0 - low
    } else if low > 0.0 {
        -low
    } else if high < extent {
        extent - high
    } else {
        0.0
    }
}

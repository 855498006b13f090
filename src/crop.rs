//! Crop rectangle editor: a resizable selection kept inside the on-screen image.
//!
//! The rectangle lives in screen space. It is dragged by one edge or one
//! corner at a time (see [`crate::hit`]), each moving edge clamped against the
//! image bounds and against the opposite edge minus the minimum size. When the
//! viewport changes, [`CropEditor::on_image_bounds_changed`] re-checks
//! containment and falls back to a full-image selection if it no longer holds.

#[cfg(test)]
#[path = "crop_test.rs"]
mod crop_test;

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::config::CropConfig;
use crate::geom::{PixelRect, Point, Rect};
use crate::hit::{DragMode, HitZones, detect_drag_mode};
use crate::viewport::ViewportController;

#[derive(Debug, Clone)]
pub struct CropEditor {
    rect: Rect,
    image_bounds: Rect,
    mode: DragMode,
    last_screen: Point,
    min_size: f64,
    zones: HitZones,
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new(&CropConfig::default())
    }
}

impl CropEditor {
    #[must_use]
    pub fn new(config: &CropConfig) -> Self {
        Self {
            rect: Rect::default(),
            image_bounds: Rect::default(),
            mode: DragMode::None,
            last_screen: Point::default(),
            min_size: config.min_crop_size,
            zones: HitZones::from_config(config),
        }
    }

    // --- Viewport coupling ---

    /// Take new image bounds after a transform change.
    ///
    /// Resets the selection to the whole image when it is uninitialized or no
    /// longer fits; returns `true` if that happened.
    pub fn on_image_bounds_changed(&mut self, bounds: Rect) -> bool {
        self.image_bounds = bounds;
        if self.rect.is_empty() || !bounds.contains_rect(&self.rect) {
            debug!(?bounds, previous = ?self.rect, "crop: selection reset to image bounds");
            self.reset();
            return true;
        }
        false
    }

    /// Select the whole image.
    pub fn reset(&mut self) {
        self.rect = self.image_bounds;
    }

    /// Forget the selection and any held handle.
    pub fn clear(&mut self) {
        self.rect = Rect::default();
        self.image_bounds = Rect::default();
        self.mode = DragMode::None;
    }

    // --- Pointer ---

    /// Grab the handle under `pt`, if any. [`DragMode::None`] means the touch is not ours.
    pub fn pointer_down(&mut self, pt: Point) -> DragMode {
        self.mode = if pt.is_finite() { self.detect_drag_mode(pt) } else { DragMode::None };
        self.last_screen = pt;
        self.mode
    }

    /// Drag the held handle to `pt`. Returns `true` if a handle is held.
    pub fn pointer_move(&mut self, pt: Point) -> bool {
        if !self.mode.is_active() || !pt.is_finite() {
            return false;
        }
        let dx = pt.x - self.last_screen.x;
        let dy = pt.y - self.last_screen.y;
        self.apply_delta(dx, dy);
        self.last_screen = pt;
        true
    }

    /// Release the handle; the last applied position stays.
    pub fn pointer_up(&mut self) {
        self.mode = DragMode::None;
    }

    /// Same as [`Self::pointer_up`]: a cancel releases the lock without rolling back.
    pub fn pointer_cancel(&mut self) {
        self.mode = DragMode::None;
    }

    #[must_use]
    pub fn detect_drag_mode(&self, pt: Point) -> DragMode {
        detect_drag_mode(pt, &self.rect, self.zones)
    }

    /// Move the edges selected by the held handle by `(dx, dy)`.
    ///
    /// Corner modes move two edges; each clamps against the other, unmoved,
    /// edge so the order of the two updates does not matter.
    pub fn apply_delta(&mut self, dx: f64, dy: f64) {
        match self.mode {
            DragMode::None => {}
            DragMode::Left => self.rect.left = self.constrain_left(self.rect.left + dx),
            DragMode::Right => self.rect.right = self.constrain_right(self.rect.right + dx),
            DragMode::Top => self.rect.top = self.constrain_top(self.rect.top + dy),
            DragMode::Bottom => self.rect.bottom = self.constrain_bottom(self.rect.bottom + dy),
            DragMode::TopLeft => {
                self.rect.left = self.constrain_left(self.rect.left + dx);
                self.rect.top = self.constrain_top(self.rect.top + dy);
            }
            DragMode::TopRight => {
                self.rect.right = self.constrain_right(self.rect.right + dx);
                self.rect.top = self.constrain_top(self.rect.top + dy);
            }
            DragMode::BottomLeft => {
                self.rect.left = self.constrain_left(self.rect.left + dx);
                self.rect.bottom = self.constrain_bottom(self.rect.bottom + dy);
            }
            DragMode::BottomRight => {
                self.rect.right = self.constrain_right(self.rect.right + dx);
                self.rect.bottom = self.constrain_bottom(self.rect.bottom + dy);
            }
        }
    }

    // --- Resolution ---

    /// Map the selection's corners into source-image coordinates.
    ///
    /// The result is not clamped to the image or checked for size; that is the
    /// crop executor's job (see [`crate::image::validate_selection`]).
    #[must_use]
    pub fn resolve_to_image_coords(&self, viewport: &ViewportController) -> Option<Rect> {
        let top_left = viewport.map_to_image(self.rect.top_left())?;
        let bottom_right = viewport.map_to_image(self.rect.bottom_right())?;
        Some(Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y))
    }

    /// [`Self::resolve_to_image_coords`] truncated to whole pixels.
    #[must_use]
    pub fn resolve_to_image_pixels(&self, viewport: &ViewportController) -> Option<PixelRect> {
        let coords = self.resolve_to_image_coords(viewport)?;
        let pixels = PixelRect::from_rect_truncated(coords);
        info!(
            left = pixels.left,
            top = pixels.top,
            right = pixels.right,
            bottom = pixels.bottom,
            "crop: selection resolved to image pixels"
        );
        Some(pixels)
    }

    // --- Queries ---

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn image_bounds(&self) -> Rect {
        self.image_bounds
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.mode
    }

    // --- Edge constraints ---

    fn constrain_left(&self, value: f64) -> f64 {
        clamp_edge(value, self.image_bounds.left, self.rect.right - self.min_size, self.rect.left)
    }

    fn constrain_right(&self, value: f64) -> f64 {
        clamp_edge(value, self.rect.left + self.min_size, self.image_bounds.right, self.rect.right)
    }

    fn constrain_top(&self, value: f64) -> f64 {
        clamp_edge(value, self.image_bounds.top, self.rect.bottom - self.min_size, self.rect.top)
    }

    fn constrain_bottom(&self, value: f64) -> f64 {
        clamp_edge(value, self.rect.top + self.min_size, self.image_bounds.bottom, self.rect.bottom)
    }
}

/// Clamp `value` into `[lo, hi]`; when the range is empty or NaN the edge stays at `current`.
///
/// The range is empty when the image on screen is smaller than the minimum crop size.
fn clamp_edge(value: f64, lo: f64, hi: f64, current: f64) -> f64 {
    match lo.partial_cmp(&hi) {
        Some(Ordering::Less | Ordering::Equal) => value.clamp(lo, hi),
        _ => current,
    }
}

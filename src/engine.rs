use tracing::info;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::config::CropConfig;
use crate::consts::MIN_CROP_PIXELS;
use crate::crop::CropEditor;
use crate::geom::{PixelRect, Point, Rect, Size};
use crate::hit::DragMode;
use crate::image::{CropError, SourceImage, validate_selection};
use crate::input::{InputState, ScaleGesture};
use crate::render;
use crate::transform::AffineTransform;
use crate::viewport::ViewportController;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The selection moved or was reset; carries the new screen-space rectangle.
    CropRectChanged(Rect),
    /// CSS cursor name for the surface.
    SetCursor(&'static str),
    RenderNeeded,
}

/// Read-only view of everything a renderer draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub transform: AffineTransform,
    pub crop_rect: Rect,
    pub image_bounds: Rect,
    pub drag_mode: DragMode,
}

/// Core engine state: the viewport, the crop editor, and the glue between them.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every transform change is followed by [`CropEditor::on_image_bounds_changed`],
/// so the selection is always inside the image on screen.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: CropConfig,
    viewport: ViewportController,
    crop: CropEditor,
    input: InputState,
    image: Option<SourceImage>,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CropConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CropConfig) -> Self {
        Self {
            viewport: ViewportController::new(&config),
            crop: CropEditor::new(&config),
            config,
            input: InputState::Idle,
            image: None,
            cursor: DragMode::None.cursor(),
        }
    }

    // --- Session ---

    /// Start editing `image` on a surface of `surface` CSS pixels.
    ///
    /// With an unknown (zero) surface the fit waits for [`Self::on_surface_resized`].
    pub fn bind(&mut self, image: SourceImage, surface: Size) -> Vec<Action> {
        info!(width = image.width(), height = image.height(), "engine: image bound");
        self.crop.clear();
        self.input = InputState::Idle;
        let changed = self.viewport.bind(image.size(), surface);
        self.image = Some(image);
        let mut actions = self.after_transform_change(changed);
        if !changed {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Release the image and return to the unbound state.
    pub fn clear(&mut self) -> Vec<Action> {
        self.image = None;
        self.viewport.clear();
        self.crop.clear();
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    /// Layout change. Refits the image, dropping any pan/zoom.
    pub fn on_surface_resized(&mut self, surface: Size) -> Vec<Action> {
        let changed = self.viewport.on_surface_resized(surface);
        self.after_transform_change(changed)
    }

    /// Fit the image and select all of it (the reset button).
    pub fn reset(&mut self) -> Vec<Action> {
        if !self.viewport.is_bound() {
            return Vec::new();
        }
        if self.viewport.reset_to_fit() {
            self.crop.on_image_bounds_changed(self.viewport.current_image_bounds());
        }
        self.crop.reset();
        vec![Action::CropRectChanged(self.crop.rect()), Action::RenderNeeded]
    }

    // --- Decoded gestures ---

    /// Scroll/drag delta in screen pixels.
    pub fn on_pan_gesture(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        if !self.input.accepts_pan() {
            return Vec::new();
        }
        let changed = self.viewport.apply_pan(dx, dy);
        self.after_transform_change(changed)
    }

    /// One pinch step. Pans are ignored while a pinch is in progress.
    pub fn on_scale_gesture(&mut self, gesture: ScaleGesture) -> Vec<Action> {
        if !self.input.accepts_scale() {
            return Vec::new();
        }
        if gesture.in_progress {
            self.input = InputState::Scaling;
        } else if self.input == InputState::Scaling {
            self.input = InputState::Gesturing;
        }
        let changed = self.viewport.apply_scale(gesture.factor, gesture.focus);
        self.after_transform_change(changed)
    }

    /// Double tap resets viewport and selection, unless a handle is held.
    pub fn on_double_tap(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::DraggingHandle { .. }) {
            return Vec::new();
        }
        self.reset()
    }

    // --- Raw pointer ---

    /// Grab a crop handle, or hand the touch sequence to the viewport.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        let mode = self.crop.pointer_down(screen_pt);
        let mut actions = Vec::new();
        if mode.is_active() {
            self.input = InputState::DraggingHandle { mode };
            actions.extend(self.set_cursor(mode.cursor()));
        } else {
            self.input = InputState::Gesturing;
        }
        actions
    }

    /// Drag the held handle, or update the hover cursor when no pointer is down.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input {
            InputState::DraggingHandle { .. } => {
                if self.crop.pointer_move(screen_pt) {
                    vec![Action::CropRectChanged(self.crop.rect()), Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::Idle => {
                let hover = self.crop.detect_drag_mode(screen_pt);
                self.set_cursor(hover.cursor()).into_iter().collect()
            }
            InputState::Gesturing | InputState::Scaling => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.crop.pointer_up();
        self.input = InputState::Idle;
        Vec::new()
    }

    /// Release without rolling back the last drag step.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.crop.pointer_cancel();
        self.input = InputState::Idle;
        Vec::new()
    }

    // --- Output ---

    /// The selection in source-image pixels, unclamped and unvalidated.
    #[must_use]
    pub fn resolve_to_image_pixels(&self) -> Option<PixelRect> {
        if !self.viewport.is_bound() {
            return None;
        }
        self.crop.resolve_to_image_pixels(&self.viewport)
    }

    /// Clamp, validate and copy the current selection out of the bound image.
    ///
    /// # Errors
    ///
    /// [`CropError::NoImage`] when nothing is bound, [`CropError::SelectionTooSmall`]
    /// when the clamped selection is under the minimum, or an error from the copy.
    pub fn crop_image(&self) -> Result<SourceImage, CropError> {
        let image = self.image.as_ref().ok_or(CropError::NoImage)?;
        let coords = self.crop.resolve_to_image_coords(&self.viewport).ok_or(CropError::EmptySelection)?;
        let rect = validate_selection(coords, image.width(), image.height(), MIN_CROP_PIXELS)?;
        let cropped = image.crop(rect)?;
        info!(width = cropped.width(), height = cropped.height(), "engine: image cropped");
        Ok(cropped)
    }

    // --- Queries ---

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            transform: self.viewport.transform(),
            crop_rect: self.crop.rect(),
            image_bounds: self.viewport.current_image_bounds(),
            drag_mode: self.crop.drag_mode(),
        }
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    #[must_use]
    pub fn crop(&self) -> &CropEditor {
        &self.crop
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Internals ---

    /// Re-derive image bounds and re-check the selection after the viewport notified a change.
    fn after_transform_change(&mut self, changed: bool) -> Vec<Action> {
        if !changed {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.crop.on_image_bounds_changed(self.viewport.current_image_bounds()) {
            actions.push(Action::CropRectChanged(self.crop.rect()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor(cursor))
    }
}

/// The full crop engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    /// Offscreen copy of the bound image, drawn under the viewport transform.
    bitmap: Option<HtmlCanvasElement>,
    pub core: EngineCore,
    dpr: f64,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: CropConfig) -> Self {
        Self { canvas, bitmap: None, core: EngineCore::new(config), dpr: 1.0 }
    }

    // --- Session ---

    /// Upload `image` to an offscreen canvas and start editing it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the offscreen canvas cannot be created or filled.
    pub fn bind(&mut self, image: SourceImage) -> Result<Vec<Action>, JsValue> {
        self.bitmap = Some(render::image_to_canvas(&image)?);
        let surface = self.core.viewport().surface();
        Ok(self.core.bind(image, surface))
    }

    pub fn clear(&mut self) -> Vec<Action> {
        self.bitmap = None;
        self.core.clear()
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((width_css * self.dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * self.dpr).round().max(0.0) as u32);
        self.core.on_surface_resized(Size::new(width_css, height_css))
    }

    // --- Delegated input ---

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    pub fn on_pan_gesture(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.core.on_pan_gesture(dx, dy)
    }

    pub fn on_scale_gesture(&mut self, gesture: ScaleGesture) -> Vec<Action> {
        self.core.on_scale_gesture(gesture)
    }

    pub fn on_double_tap(&mut self) -> Vec<Action> {
        self.core.on_double_tap()
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = render::context_2d(&self.canvas)?;
        render::draw(&ctx, self.bitmap.as_ref(), &self.core, self.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot()
    }

    #[must_use]
    pub fn resolve_to_image_pixels(&self) -> Option<PixelRect> {
        self.core.resolve_to_image_pixels()
    }

    /// # Errors
    ///
    /// See [`EngineCore::crop_image`].
    pub fn crop_image(&self) -> Result<SourceImage, CropError> {
        self.core.crop_image()
    }
}

//! Single-writer access to an [`EngineCore`] for hosts that deliver input on several threads.
//!
//! Each call takes the lock for the duration of one engine operation, so
//! gesture handlers never interleave mutations of the transform and the
//! selection.

#[cfg(test)]
#[path = "shared_test.rs"]
mod shared_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::engine::{Action, EngineCore, Snapshot};
use crate::geom::{PixelRect, Point, Size};
use crate::image::SourceImage;
use crate::input::ScaleGesture;

#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<EngineCore>>,
}

impl SharedEngine {
    #[must_use]
    pub fn new(core: EngineCore) -> Self {
        Self { inner: Arc::new(Mutex::new(core)) }
    }

    /// Run `f` with exclusive access to the engine.
    ///
    /// A poisoned lock is recovered: every engine method leaves the state
    /// consistent before it returns.
    pub fn with<R>(&self, f: impl FnOnce(&mut EngineCore) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn bind(&self, image: SourceImage, surface: Size) -> Vec<Action> {
        self.with(|core| core.bind(image, surface))
    }

    pub fn on_surface_resized(&self, surface: Size) -> Vec<Action> {
        self.with(|core| core.on_surface_resized(surface))
    }

    pub fn on_pan_gesture(&self, dx: f64, dy: f64) -> Vec<Action> {
        self.with(|core| core.on_pan_gesture(dx, dy))
    }

    pub fn on_scale_gesture(&self, gesture: ScaleGesture) -> Vec<Action> {
        self.with(|core| core.on_scale_gesture(gesture))
    }

    pub fn on_double_tap(&self) -> Vec<Action> {
        self.with(EngineCore::on_double_tap)
    }

    pub fn on_pointer_down(&self, screen_pt: Point) -> Vec<Action> {
        self.with(|core| core.on_pointer_down(screen_pt))
    }

    pub fn on_pointer_move(&self, screen_pt: Point) -> Vec<Action> {
        self.with(|core| core.on_pointer_move(screen_pt))
    }

    pub fn on_pointer_up(&self) -> Vec<Action> {
        self.with(EngineCore::on_pointer_up)
    }

    pub fn on_pointer_cancel(&self) -> Vec<Action> {
        self.with(EngineCore::on_pointer_cancel)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.with(|core| core.snapshot())
    }

    #[must_use]
    pub fn resolve_to_image_pixels(&self) -> Option<PixelRect> {
        self.with(|core| core.resolve_to_image_pixels())
    }
}

//! Input model: decoded gestures from the host and the pointer routing state machine.
//!
//! Gesture recognition (pinch, scroll, double tap) happens in the host. The
//! engine receives its outcomes as [`ScaleGesture`] values, pan deltas and a
//! double-tap signal, alongside raw pointer down/move/up/cancel events that
//! drive the crop handles. [`InputState`] decides which of the two consumers
//! (crop editor or viewport) owns the current touch sequence.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;
use crate::hit::DragMode;

/// One step of a pinch gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleGesture {
    /// Multiplicative zoom since the previous step.
    pub factor: f64,
    /// Screen-space pivot of the pinch.
    pub focus: Point,
    /// `false` on the final step of the pinch.
    pub in_progress: bool,
}

/// Who owns the current touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A crop handle was grabbed on pointer-down; the viewport ignores gestures.
    DraggingHandle {
        /// The handle being dragged.
        mode: DragMode,
    },
    /// The pointer-down missed every handle; gestures go to the viewport.
    Gesturing,
    /// A pinch is in progress; pans are suppressed until it ends.
    Scaling,
}

impl InputState {
    /// Whether a pan gesture may move the viewport in this state.
    #[must_use]
    pub fn accepts_pan(self) -> bool {
        matches!(self, Self::Idle | Self::Gesturing)
    }

    /// Whether a pinch step may zoom the viewport in this state.
    #[must_use]
    pub fn accepts_scale(self) -> bool {
        !matches!(self, Self::DraggingHandle { .. })
    }
}

//! Hit-testing of a pointer against the crop rectangle's edges and corners.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::CropConfig;
use crate::geom::{Point, Rect};

/// Which handle of the crop rectangle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Left,
    Top,
    Right,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DragMode {
    /// Whether a handle is held.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::None => "default",
            Self::Left | Self::Right => "ew-resize",
            Self::Top | Self::Bottom => "ns-resize",
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
        }
    }
}

/// Touch zone half-widths in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZones {
    pub edge: f64,
    pub corner: f64,
}

impl HitZones {
    #[must_use]
    pub fn from_config(config: &CropConfig) -> Self {
        Self { edge: config.edge_hit_px(), corner: config.corner_hit_px() }
    }
}

/// Pick the handle under `pt`.
///
/// Corners are tested first with the larger corner zone, so a touch that is
/// near both a corner and an edge always grabs the corner. Edges follow in the
/// order left, right, top, bottom, each gated by the pointer lying within the
/// rectangle's span (widened by the edge zone) on the other axis.
///
/// An empty rectangle (nothing bound, or not yet laid out) has no handles.
#[must_use]
pub fn detect_drag_mode(pt: Point, rect: &Rect, zones: HitZones) -> DragMode {
    if rect.is_empty() {
        return DragMode::None;
    }

    let near_left = (pt.x - rect.left).abs() < zones.corner;
    let near_right = (pt.x - rect.right).abs() < zones.corner;
    let near_top = (pt.y - rect.top).abs() < zones.corner;
    let near_bottom = (pt.y - rect.bottom).abs() < zones.corner;

    if near_left && near_top {
        return DragMode::TopLeft;
    }
    if near_right && near_top {
        return DragMode::TopRight;
    }
    if near_left && near_bottom {
        return DragMode::BottomLeft;
    }
    if near_right && near_bottom {
        return DragMode::BottomRight;
    }

    let in_vertical_span = pt.y > rect.top - zones.edge && pt.y < rect.bottom + zones.edge;
    let in_horizontal_span = pt.x > rect.left - zones.edge && pt.x < rect.right + zones.edge;

    if (pt.x - rect.left).abs() < zones.edge && in_vertical_span {
        DragMode::Left
    } else if (pt.x - rect.right).abs() < zones.edge && in_vertical_span {
        DragMode::Right
    } else if (pt.y - rect.top).abs() < zones.edge && in_horizontal_span {
        DragMode::Top
    } else if (pt.y - rect.bottom).abs() < zones.edge && in_horizontal_span {
        DragMode::Bottom
    } else {
        DragMode::None
    }
}

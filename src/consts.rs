//! Shared numeric constants for the crop view crate.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest user zoom, relative to the fit-to-view scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.5;

/// Largest user zoom, relative to the fit-to-view scale.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

// ── Crop rectangle ──────────────────────────────────────────────

/// Minimum crop rectangle width/height in screen pixels.
pub const DEFAULT_MIN_CROP_SIZE_PX: f64 = 50.0;

/// Half-width of the touch zone around each edge, in density-independent pixels.
pub const DEFAULT_EDGE_HIT_DP: f64 = 40.0;

/// Half-width of the touch zone around each corner, in density-independent pixels.
pub const DEFAULT_CORNER_HIT_DP: f64 = 50.0;

// ── Crop executor ───────────────────────────────────────────────

/// Smallest accepted selection side in source-image pixels.
pub const MIN_CROP_PIXELS: f64 = 50.0;

/// Bytes per pixel in a [`crate::image::SourceImage`] buffer (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

// ── Overlay ─────────────────────────────────────────────────────

pub const BORDER_WIDTH_DP: f64 = 2.0;
pub const CORNER_LENGTH_DP: f64 = 24.0;
pub const CORNER_WIDTH_DP: f64 = 4.0;
pub const GRID_WIDTH_DP: f64 = 1.0;

pub const MASK_COLOR: &str = "rgba(0, 0, 0, 0.5)";
pub const BORDER_COLOR: &str = "#FFFFFF";
pub const GRID_COLOR: &str = "rgba(255, 255, 255, 0.5)";

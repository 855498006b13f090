//! Rendering: draws the transformed image and the crop overlay to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it never mutates anything.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::consts::{BORDER_COLOR, GRID_COLOR, MASK_COLOR};
use crate::engine::EngineCore;
use crate::image::SourceImage;
use crate::overlay::{Overlay, Segment};

/// Draw the full scene: image under the viewport transform, then the overlay.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    bitmap: Option<&HtmlCanvasElement>,
    core: &EngineCore,
    dpr: f64,
) -> Result<(), JsValue> {
    let surface = core.viewport().surface();

    // Layer 1: clear in CSS pixels.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, surface.width, surface.height);

    // Layer 2: the image.
    if let Some(bitmap) = bitmap {
        let t = core.viewport().transform();
        ctx.save();
        ctx.transform(t.a, t.b, t.c, t.d, t.e, t.f)?;
        ctx.draw_image_with_html_canvas_element(bitmap, 0.0, 0.0)?;
        ctx.restore();
    }

    // Layer 3: overlay in screen space.
    if let Some(overlay) = Overlay::compute(core.crop().rect(), surface, core.config().density) {
        draw_overlay(ctx, &overlay);
    }

    Ok(())
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, overlay: &Overlay) {
    ctx.save();

    ctx.set_fill_style_str(MASK_COLOR);
    for band in &overlay.mask {
        ctx.fill_rect(band.left, band.top, band.width(), band.height());
    }

    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(overlay.grid_width);
    stroke_segments(ctx, &overlay.grid);

    ctx.set_stroke_style_str(BORDER_COLOR);
    ctx.set_line_width(overlay.border_width);
    let b = overlay.border;
    ctx.stroke_rect(b.left, b.top, b.width(), b.height());

    ctx.set_line_width(overlay.corner_width);
    ctx.set_line_cap("square");
    stroke_segments(ctx, &overlay.corners);

    ctx.restore();
}

fn stroke_segments(ctx: &CanvasRenderingContext2d, segments: &[Segment]) {
    ctx.begin_path();
    for s in segments {
        ctx.move_to(s.from.x, s.from.y);
        ctx.line_to(s.to.x, s.to.y);
    }
    ctx.stroke();
}

/// Get the 2D context of `canvas`.
///
/// # Errors
///
/// Returns `Err` if the browser refuses a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("context is not a CanvasRenderingContext2d"))
}

/// Copy an RGBA image into a new offscreen canvas of the same size.
///
/// # Errors
///
/// Returns `Err` outside a browser document or if the pixel upload fails.
pub fn image_to_canvas(image: &SourceImage) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("created element is not a canvas"))?;
    canvas.set_width(image.width());
    canvas.set_height(image.height());

    // ImageData rejects zero-sized buffers; leave the canvas blank.
    if image.width() == 0 || image.height() == 0 {
        return Ok(canvas);
    }

    let ctx = context_2d(&canvas)?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(image.pixels()), image.width(), image.height())?;
    ctx.put_image_data(&data, 0.0, 0.0)?;
    Ok(canvas)
}

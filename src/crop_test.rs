#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::geom::Size;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Editor whose image occupies `bounds` and whose selection is the full image.
fn editor_with_bounds(bounds: Rect) -> CropEditor {
    let mut editor = CropEditor::default();
    assert!(editor.on_image_bounds_changed(bounds));
    editor
}

/// Grab at `from`, move to `to`, release.
fn drag(editor: &mut CropEditor, from: Point, to: Point) -> DragMode {
    let mode = editor.pointer_down(from);
    editor.pointer_move(to);
    editor.pointer_up();
    mode
}

fn assert_valid(editor: &CropEditor) {
    let r = editor.rect();
    let b = editor.image_bounds();
    assert!(b.contains_rect(&r), "{r:?} escaped {b:?}");
    assert!(r.width() >= 50.0 - EPSILON, "width below minimum: {r:?}");
    assert!(r.height() >= 50.0 - EPSILON, "height below minimum: {r:?}");
}

// =============================================================
// Image bounds coupling
// =============================================================

#[test]
fn new_editor_is_empty_and_idle() {
    let editor = CropEditor::default();
    assert!(editor.rect().is_empty());
    assert_eq!(editor.drag_mode(), DragMode::None);
}

#[test]
fn empty_editor_ignores_touches_near_origin() {
    let mut editor = CropEditor::default();
    assert_eq!(editor.pointer_down(pt(10.0, 10.0)), DragMode::None);
    assert!(!editor.pointer_move(pt(40.0, 40.0)));
    assert!(editor.rect().is_empty());
}

#[test]
fn first_bounds_initialize_full_selection() {
    let bounds = Rect::new(0.0, 750.0, 1000.0, 1250.0);
    let editor = editor_with_bounds(bounds);
    assert_eq!(editor.rect(), bounds);
}

#[test]
fn contained_selection_survives_bounds_change() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 500.0, 500.0));
    drag(&mut editor, pt(0.0, 0.0), pt(100.0, 100.0));
    let selection = editor.rect();

    // Zooming in grows the bounds; the selection still fits.
    assert!(!editor.on_image_bounds_changed(Rect::new(-250.0, -250.0, 750.0, 750.0)));
    assert_eq!(editor.rect(), selection);
}

#[test]
fn shrinking_bounds_resets_full_selection() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 500.0, 500.0));
    // Zoom out: the image shrinks to the middle of the surface.
    let smaller = Rect::new(125.0, 125.0, 375.0, 375.0);
    assert!(editor.on_image_bounds_changed(smaller));
    assert_eq!(editor.rect(), smaller);
    assert_valid(&editor);
}

#[test]
fn panned_bounds_discard_partial_selection() {
    let mut editor = editor_with_bounds(Rect::new(-250.0, -250.0, 750.0, 750.0));
    drag(&mut editor, pt(-250.0, -250.0), pt(0.0, 0.0));
    assert_eq!(editor.rect(), Rect::new(0.0, 0.0, 750.0, 750.0));

    // Panning right by 100 still covers the selection.
    let shifted = Rect::new(-150.0, -250.0, 850.0, 750.0);
    assert!(!editor.on_image_bounds_changed(shifted));
    // Panning left by 100 puts its right edge past the image.
    let shifted = Rect::new(-350.0, -250.0, 650.0, 750.0);
    assert!(editor.on_image_bounds_changed(shifted));
    assert_eq!(editor.rect(), shifted);
}

#[test]
fn reset_selects_whole_image() {
    let bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
    let mut editor = editor_with_bounds(bounds);
    drag(&mut editor, pt(400.0, 400.0), pt(200.0, 200.0));
    assert_ne!(editor.rect(), bounds);
    editor.reset();
    assert_eq!(editor.rect(), bounds);
}

#[test]
fn clear_forgets_everything() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    editor.pointer_down(pt(0.0, 0.0));
    editor.clear();
    assert!(editor.rect().is_empty());
    assert!(editor.image_bounds().is_empty());
    assert_eq!(editor.drag_mode(), DragMode::None);
}

// =============================================================
// Pointer state machine
// =============================================================

#[test]
fn pointer_down_on_handle_sets_mode() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    assert_eq!(editor.pointer_down(pt(0.0, 200.0)), DragMode::Left);
    assert_eq!(editor.drag_mode(), DragMode::Left);
}

#[test]
fn pointer_down_inside_is_not_consumed() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    assert_eq!(editor.pointer_down(pt(200.0, 200.0)), DragMode::None);
    assert!(!editor.pointer_move(pt(250.0, 250.0)));
    assert_eq!(editor.rect(), Rect::new(0.0, 0.0, 400.0, 400.0));
}

#[test]
fn pointer_up_returns_to_none() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    editor.pointer_down(pt(400.0, 400.0));
    editor.pointer_up();
    assert_eq!(editor.drag_mode(), DragMode::None);
    assert!(!editor.pointer_move(pt(300.0, 300.0)));
}

#[test]
fn pointer_cancel_keeps_last_position() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    editor.pointer_down(pt(0.0, 200.0));
    assert!(editor.pointer_move(pt(60.0, 200.0)));
    editor.pointer_cancel();
    assert_eq!(editor.drag_mode(), DragMode::None);
    assert_eq!(editor.rect().left, 60.0);
}

#[test]
fn moves_are_incremental() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    editor.pointer_down(pt(400.0, 200.0));
    editor.pointer_move(pt(380.0, 200.0));
    editor.pointer_move(pt(350.0, 210.0));
    assert_eq!(editor.rect().right, 350.0);
    assert_eq!(editor.rect().top, 0.0);
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    assert_eq!(editor.pointer_down(pt(f64::NAN, 0.0)), DragMode::None);
    editor.pointer_down(pt(0.0, 200.0));
    assert!(!editor.pointer_move(pt(f64::INFINITY, 200.0)));
    assert_eq!(editor.rect().left, 0.0);
}

// =============================================================
// Edge constraints
// =============================================================

#[test]
fn single_edges_move_independently() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    assert_eq!(drag(&mut editor, pt(0.0, 200.0), pt(30.0, 260.0)), DragMode::Left);
    assert_eq!(drag(&mut editor, pt(400.0, 200.0), pt(370.0, 100.0)), DragMode::Right);
    assert_eq!(drag(&mut editor, pt(200.0, 0.0), pt(100.0, 20.0)), DragMode::Top);
    assert_eq!(drag(&mut editor, pt(200.0, 400.0), pt(300.0, 390.0)), DragMode::Bottom);
    assert_eq!(editor.rect(), Rect::new(30.0, 20.0, 370.0, 390.0));
}

#[test]
fn edges_stop_at_image_bounds() {
    let mut editor = editor_with_bounds(Rect::new(100.0, 100.0, 500.0, 500.0));
    drag(&mut editor, pt(100.0, 300.0), pt(150.0, 300.0));
    drag(&mut editor, pt(150.0, 300.0), pt(-900.0, 300.0));
    assert_eq!(editor.rect().left, 100.0);

    drag(&mut editor, pt(300.0, 500.0), pt(300.0, 5000.0));
    assert_eq!(editor.rect().bottom, 500.0);
}

#[test]
fn edges_stop_at_minimum_size() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    drag(&mut editor, pt(200.0, 400.0), pt(200.0, -1000.0));
    assert_eq!(editor.rect().bottom, 50.0);

    // The strip is now shorter than the corner zone, so the left end grabs a corner.
    assert_eq!(drag(&mut editor, pt(0.0, 25.0), pt(1000.0, 25.0)), DragMode::TopLeft);
    assert_eq!(editor.rect(), Rect::new(350.0, 0.0, 400.0, 50.0));
    assert_valid(&editor);
}

#[test]
fn top_left_corner_clamps_to_image_left() {
    let mut editor = editor_with_bounds(Rect::new(100.0, 100.0, 900.0, 700.0));
    // Pull the corner in first so there is room to push it back out.
    drag(&mut editor, pt(100.0, 100.0), pt(300.0, 300.0));
    assert_eq!(editor.rect().top_left(), pt(300.0, 300.0));

    editor.pointer_down(pt(300.0, 300.0));
    assert_eq!(editor.drag_mode(), DragMode::TopLeft);
    editor.pointer_move(pt(-700.0, 290.0));
    assert_eq!(editor.rect().left, 100.0);
    assert_eq!(editor.rect().top, 290.0);
}

#[test]
fn every_corner_moves_two_edges() {
    let bounds = Rect::new(0.0, 0.0, 600.0, 600.0);
    let mut editor = editor_with_bounds(bounds);
    assert_eq!(drag(&mut editor, pt(0.0, 0.0), pt(10.0, 20.0)), DragMode::TopLeft);
    assert_eq!(drag(&mut editor, pt(600.0, 20.0), pt(590.0, 40.0)), DragMode::TopRight);
    assert_eq!(drag(&mut editor, pt(10.0, 600.0), pt(30.0, 580.0)), DragMode::BottomLeft);
    assert_eq!(drag(&mut editor, pt(590.0, 580.0), pt(560.0, 570.0)), DragMode::BottomRight);
    assert_eq!(editor.rect(), Rect::new(30.0, 40.0, 560.0, 570.0));
}

#[test]
fn corner_dragged_past_opposite_corner_stops_at_minimum() {
    let mut editor = editor_with_bounds(Rect::new(0.0, 0.0, 600.0, 600.0));
    drag(&mut editor, pt(600.0, 600.0), pt(-5000.0, -5000.0));
    assert_eq!(editor.rect(), Rect::new(0.0, 0.0, 50.0, 50.0));
}

#[test]
fn image_smaller_than_minimum_keeps_edges_still() {
    // On-screen image narrower and shorter than the minimum crop size.
    let tiny = Rect::new(100.0, 100.0, 130.0, 120.0);
    let mut editor = editor_with_bounds(tiny);
    editor.pointer_down(pt(100.0, 100.0));
    editor.pointer_move(pt(90.0, 50.0));
    editor.pointer_move(pt(200.0, 300.0));
    assert_eq!(editor.rect(), tiny);
}

#[test]
fn random_drags_preserve_containment_and_minimum() {
    let mut editor = editor_with_bounds(Rect::new(40.0, 300.0, 1040.0, 1700.0));
    let mut rng = StdRng::seed_from_u64(0x2545_F491_4F6C_DD1D);
    for _ in 0..2000 {
        let r = editor.rect();
        // Aim at a random corner or edge midpoint so a handle is usually grabbed.
        let targets = [
            r.top_left(),
            r.bottom_right(),
            pt(r.left, r.bottom),
            pt(r.right, r.top),
            pt(r.left, (r.top + r.bottom) / 2.0),
            pt((r.left + r.right) / 2.0, r.bottom),
        ];
        let from = targets[rng.random_range(0..targets.len())];
        editor.pointer_down(from);
        editor.pointer_move(pt(from.x + rng.random_range(-150.0..450.0), from.y + rng.random_range(-150.0..450.0)));
        editor.pointer_move(pt(rng.random_range(-100.0..2300.0), rng.random_range(400.0..2800.0)));
        editor.pointer_up();
        assert_valid(&editor);
    }
}

// =============================================================
// Resolution through the viewport
// =============================================================

#[test]
fn resolve_full_selection_is_whole_image() {
    let mut vp = ViewportController::default();
    assert!(vp.bind(Size::new(2000.0, 1000.0), Size::new(1000.0, 2000.0)));
    let editor = editor_with_bounds(vp.current_image_bounds());
    assert_eq!(editor.resolve_to_image_pixels(&vp), Some(PixelRect::new(0, 0, 2000, 1000)));
}

#[test]
fn resolve_partial_selection_scales_by_inverse() {
    let mut vp = ViewportController::default();
    assert!(vp.bind(Size::new(2000.0, 1000.0), Size::new(1000.0, 2000.0)));
    // Screen bounds are (0, 750)-(1000, 1250) at scale 0.5.
    let mut editor = editor_with_bounds(vp.current_image_bounds());
    drag(&mut editor, pt(0.0, 750.0), pt(100.0, 800.0));
    let Some(coords) = editor.resolve_to_image_coords(&vp) else {
        panic!("viewport is invertible");
    };
    assert!(approx_eq(coords.left, 200.0));
    assert!(approx_eq(coords.top, 100.0));
    assert!(approx_eq(coords.right, 2000.0));
    assert!(approx_eq(coords.bottom, 1000.0));
}

#[test]
fn resolve_after_zoom_is_not_clamped() {
    let mut vp = ViewportController::default();
    assert!(vp.bind(Size::new(500.0, 500.0), Size::new(500.0, 500.0)));
    let mut editor = editor_with_bounds(vp.current_image_bounds());
    drag(&mut editor, pt(500.0, 500.0), pt(-1000.0, -1000.0));
    assert_eq!(editor.rect(), Rect::new(0.0, 0.0, 50.0, 50.0));

    assert!(vp.apply_scale(5.0, Point::new(0.0, 0.0)));
    assert!(!editor.on_image_bounds_changed(vp.current_image_bounds()));
    // At 5x the 50px screen square covers only 10 source pixels.
    assert_eq!(editor.resolve_to_image_pixels(&vp), Some(PixelRect::new(0, 0, 10, 10)));
}

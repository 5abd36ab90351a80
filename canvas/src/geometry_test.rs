#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::consts::{ALIGNMENT_THRESHOLD, DEFAULT_GRID_SIZE};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn grid_only() -> SnapOptions {
    SnapOptions { grid: Some(DEFAULT_GRID_SIZE), guide_threshold: None }
}

fn grid_and_guides() -> SnapOptions {
    SnapOptions { grid: Some(DEFAULT_GRID_SIZE), guide_threshold: Some(ALIGNMENT_THRESHOLD) }
}

// --- Rect ---

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 60.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 80.0);
    assert_eq!(r.center(), Point::new(60.0, 50.0));
}

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.01, 5.0)));
}

#[test]
fn bounded_with_inverted_range_returns_lower() {
    assert_eq!(bounded(5.0, 10.0, 2.0), 10.0);
}

// --- snap ---

#[test]
fn snap_rounds_to_nearest() {
    assert_eq!(snap(29.0, 20.0), 20.0);
    assert_eq!(snap(31.0, 20.0), 40.0);
    assert_eq!(snap(-11.0, 20.0), -20.0);
}

#[test]
fn snap_is_idempotent() {
    for v in [-37.3, 0.0, 9.99, 10.0, 123.456, 987.6] {
        for g in [5.0, 20.0, 33.0] {
            let once = snap(v, g);
            assert_eq!(snap(once, g), once, "v={v} g={g}");
        }
    }
}

#[test]
fn snap_zero_grid_is_identity() {
    assert_eq!(snap(17.3, 0.0), 17.3);
}

#[test]
fn snap_within_steps_back_inside_range() {
    // 690 rounds up to 700, beyond 695.
    assert_eq!(snap_within(690.0, 20.0, 0.0, 695.0), 680.0);
    assert_eq!(snap_within(-3.0, 20.0, 5.0, 100.0), 20.0);
}

// --- clamp / sanitize ---

#[test]
fn clamp_position_keeps_slide_on_canvas() {
    let p = clamp_position(320.0, 192.0, 900.0, -40.0);
    assert_eq!(p, Point::new(680.0, 0.0));
}

#[test]
fn sanitize_rect_repairs_bad_values() {
    let r = sanitize_rect(Rect::new(f64::NAN, 950.0, 10.0, f64::INFINITY));
    assert_eq!(r.x, 0.0);
    assert_eq!(r.width, MIN_SLIDE_WIDTH);
    assert_eq!(r.height, DEFAULT_SLIDE_HEIGHT);
    assert!(r.bottom() <= CANVAS_SIZE);
}

#[test]
fn sanitize_rect_keeps_valid_rect() {
    let r = Rect::new(100.0, 100.0, 320.0, 192.0);
    assert_eq!(sanitize_rect(r), r);
}

// --- alignment guides ---

#[test]
fn guide_left_edge_within_threshold() {
    let sib = [Rect::new(400.0, 100.0, 200.0, 100.0)];
    let g = compute_alignment_guides(100.0, 100.0, Point::new(399.0, 700.0), &sib, ALIGNMENT_THRESHOLD);
    assert_eq!(g.x, Some(Guide { value: 400.0, line: 400.0 }));
    assert_eq!(g.y, None);
}

#[test]
fn guide_threshold_is_inclusive() {
    let sib = [Rect::new(400.0, 0.0, 100.0, 100.0)];
    let g = compute_alignment_guides(100.0, 100.0, Point::new(405.0, 600.0), &sib, 5.0);
    assert!(g.x.is_some());
    let g = compute_alignment_guides(100.0, 100.0, Point::new(405.5, 600.0), &sib, 5.0);
    assert!(g.x.is_none());
}

#[test]
fn guide_right_edge_aligns_ends() {
    let sib = [Rect::new(400.0, 0.0, 300.0, 100.0)];
    // moving right edge at 598 + 100 = 698, sibling right at 700
    let g = compute_alignment_guides(100.0, 100.0, Point::new(598.0, 600.0), &sib, 5.0);
    assert_eq!(g.x, Some(Guide { value: 600.0, line: 700.0 }));
}

#[test]
fn guide_center_alignment() {
    let sib = [Rect::new(0.0, 400.0, 100.0, 200.0)];
    // sibling mid-y 500; moving height 60, candidate y 468 -> mid 498
    let g = compute_alignment_guides(100.0, 60.0, Point::new(600.0, 468.0), &sib, 5.0);
    assert_eq!(g.y, Some(Guide { value: 470.0, line: 500.0 }));
}

#[test]
fn guide_earliest_sibling_wins() {
    let sibs = [Rect::new(402.0, 0.0, 50.0, 50.0), Rect::new(399.0, 0.0, 50.0, 50.0)];
    let g = compute_alignment_guides(100.0, 100.0, Point::new(400.0, 700.0), &sibs, 5.0);
    assert_eq!(g.x.map(|g| g.value), Some(402.0));
}

#[test]
fn guide_axes_resolve_independently() {
    let sibs = [Rect::new(400.0, 0.0, 50.0, 50.0), Rect::new(0.0, 300.0, 50.0, 50.0)];
    let g = compute_alignment_guides(100.0, 100.0, Point::new(401.0, 302.0), &sibs, 5.0);
    assert_eq!(g.x.map(|g| g.value), Some(400.0));
    assert_eq!(g.y.map(|g| g.value), Some(300.0));
}

// --- place_slide ---

#[test]
fn place_slide_guide_overrides_grid() {
    let sib = [Rect::new(405.0, 0.0, 100.0, 100.0)];
    let (p, g) = place_slide(100.0, 100.0, Point::new(403.0, 611.0), &sib, grid_and_guides());
    assert_eq!(p.x, 405.0);
    assert_eq!(p.y, 620.0);
    assert!(g.x.is_some());
}

#[test]
fn place_slide_grid_only() {
    let (p, g) = place_slide(320.0, 192.0, Point::new(133.0, 47.0), std::iter::empty(), grid_only());
    assert_eq!(p, Point::new(140.0, 40.0));
    assert!(g.is_empty());
}

#[test]
fn place_slide_never_leaves_canvas() {
    let opts = grid_and_guides();
    for (x, y) in [(-500.0, -500.0), (2000.0, 2000.0), (687.0, 809.0), (999.0, 0.0)] {
        let (p, _) = place_slide(320.0, 190.0, Point::new(x, y), std::iter::empty(), opts);
        assert!(p.x >= 0.0 && p.x + 320.0 <= CANVAS_SIZE, "x={x}");
        assert!(p.y >= 0.0 && p.y + 190.0 <= CANVAS_SIZE, "y={y}");
    }
}

#[test]
fn place_slide_without_snapping_only_clamps() {
    let opts = SnapOptions { grid: None, guide_threshold: None };
    let (p, _) = place_slide(100.0, 100.0, Point::new(123.4, 950.0), std::iter::empty(), opts);
    assert_eq!(p, Point::new(123.4, 900.0));
}

// --- resize ---

#[test]
fn resize_east_grows_width_only() {
    let start = Rect::new(100.0, 100.0, 320.0, 192.0);
    let r = resize_slide(start, ResizeHandle::E, 37.0, 99.0, None);
    assert_eq!(r, Rect::new(100.0, 100.0, 357.0, 192.0));
}

#[test]
fn resize_west_keeps_right_edge_fixed() {
    let start = Rect::new(200.0, 100.0, 300.0, 200.0);
    let r = resize_slide(start, ResizeHandle::W, -40.0, 0.0, Some(20.0));
    assert_eq!(r.right(), 500.0);
    assert_eq!(r.width, 340.0);
    assert_eq!(r.x, 160.0);
}

#[test]
fn resize_west_cannot_pass_canvas_origin() {
    let start = Rect::new(50.0, 100.0, 300.0, 200.0);
    let r = resize_slide(start, ResizeHandle::W, -500.0, 0.0, None);
    assert_eq!(r.x, 0.0);
    assert_eq!(r.width, 350.0);
}

#[test]
fn resize_north_west_moves_origin() {
    let start = Rect::new(200.0, 200.0, 300.0, 200.0);
    let r = resize_slide(start, ResizeHandle::Nw, 20.0, 40.0, Some(20.0));
    assert_eq!(r, Rect::new(220.0, 240.0, 280.0, 160.0));
}

#[test]
fn resize_respects_minimums() {
    let start = Rect::new(100.0, 100.0, 320.0, 192.0);
    let r = resize_slide(start, ResizeHandle::Se, -1000.0, -1000.0, Some(20.0));
    assert_eq!(r.width, MIN_SLIDE_WIDTH);
    assert_eq!(r.height, MIN_SLIDE_HEIGHT);
}

#[test]
fn resize_respects_canvas_edge() {
    let start = Rect::new(700.0, 800.0, 200.0, 100.0);
    let r = resize_slide(start, ResizeHandle::Se, 500.0, 500.0, Some(20.0));
    assert_eq!(r.right(), CANVAS_SIZE);
    assert_eq!(r.bottom(), CANVAS_SIZE);
}

#[test]
fn resize_snaps_size_to_grid() {
    let start = Rect::new(0.0, 0.0, 320.0, 200.0);
    let r = resize_slide(start, ResizeHandle::S, 0.0, 13.0, Some(20.0));
    assert_eq!(r.height, 220.0);
}

#[test]
fn handle_positions_cover_corners_and_midpoints() {
    let r = Rect::new(0.0, 0.0, 100.0, 60.0);
    assert_eq!(ResizeHandle::Nw.position(&r), Point::new(0.0, 0.0));
    assert_eq!(ResizeHandle::E.position(&r), Point::new(100.0, 30.0));
    assert_eq!(ResizeHandle::S.position(&r), Point::new(50.0, 60.0));
    assert_eq!(ResizeHandle::ALL.len(), 8);
}

// --- fit ---

#[test]
fn fit_zoom_picks_tighter_axis() {
    let z = fit_zoom(700.0, 500.0, 600.0, 600.0, 100.0);
    assert!(approx(z, 400.0 / 700.0));
}

#[test]
fn fit_zoom_empty_content_is_max() {
    assert_eq!(fit_zoom(0.0, 0.0, 800.0, 600.0, 40.0), MAX_ZOOM);
}

#[test]
fn fit_zoom_tiny_viewport_clamps_to_min() {
    assert_eq!(fit_zoom(500.0, 500.0, 50.0, 50.0, 40.0), MIN_ZOOM);
}

#[test]
fn bounding_box_covers_all() {
    let rects = [Rect::new(0.0, 0.0, 320.0, 192.0), Rect::new(380.0, 308.0, 320.0, 192.0)];
    assert_eq!(bounding_box(&rects), Some(Rect::new(0.0, 0.0, 700.0, 500.0)));
    assert_eq!(bounding_box(std::iter::empty()), None);
}

#[test]
fn letterbox_shrinks_to_the_tighter_axis_and_centers() {
    let r = letterbox(1600.0, 600.0, 1920.0, 1080.0);
    assert!((r.height - 600.0).abs() < 1e-9);
    assert!((r.width - 1920.0 * 600.0 / 1080.0).abs() < 1e-9);
    assert!((r.center().x - 800.0).abs() < 1e-9);
    assert!(r.y.abs() < 1e-9);
}

#[test]
fn letterbox_never_scales_up() {
    let r = letterbox(2560.0, 1440.0, 1920.0, 1080.0);
    assert_eq!(r, Rect::new(320.0, 180.0, 1920.0, 1080.0));
}

#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{Slide, SlideMetadata};

fn make_slide(x: f64, y: f64, w: f64, h: f64) -> Slide {
    Slide {
        id: Uuid::new_v4(),
        title: String::new(),
        content: String::new(),
        x,
        y,
        width: w,
        height: h,
        order: 0,
        background_color: None,
        text_color: None,
        metadata: SlideMetadata::default(),
    }
}

fn doc_with(slides: Vec<Slide>) -> Presentation {
    let mut p = Presentation::new(Uuid::new_v4(), "Hit");
    p.slides = slides;
    p
}

// =============================================================
// Bodies
// =============================================================

#[test]
fn miss_on_empty_canvas() {
    let doc = doc_with(vec![make_slide(0.0, 0.0, 100.0, 100.0)]);
    assert_eq!(hit_test(Point::new(500.0, 500.0), &doc, &Camera::default()), None);
}

#[test]
fn body_hit() {
    let s = make_slide(100.0, 100.0, 200.0, 100.0);
    let id = s.id;
    let doc = doc_with(vec![s]);
    let hit = hit_test(Point::new(150.0, 150.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit, Hit { slide_id: id, part: HitPart::Body });
}

#[test]
fn topmost_slide_wins() {
    let below = make_slide(0.0, 0.0, 300.0, 300.0);
    let above = make_slide(100.0, 100.0, 300.0, 300.0);
    let above_id = above.id;
    let doc = doc_with(vec![below, above]);
    let hit = hit_test(Point::new(150.0, 150.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit.slide_id, above_id);
}

// =============================================================
// Handles
// =============================================================

#[test]
fn handles_only_on_current_slide() {
    let s = make_slide(100.0, 100.0, 200.0, 100.0);
    let id = s.id;
    let mut doc = doc_with(vec![s]);

    let corner = Point::new(300.0, 200.0);
    let hit = hit_test(corner, &doc, &Camera::default()).unwrap();
    assert_eq!(hit.part, HitPart::Body);

    doc.current_slide_id = Some(id);
    let hit = hit_test(corner, &doc, &Camera::default()).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(ResizeHandle::Se));
}

#[test]
fn handle_radius_is_screen_space() {
    let s = make_slide(100.0, 100.0, 200.0, 100.0);
    let id = s.id;
    let mut doc = doc_with(vec![s]);
    doc.current_slide_id = Some(id);

    // 6 canvas units outside the west edge midpoint.
    let p = Point::new(94.0, 150.0);
    let near = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 };
    assert_eq!(hit_test(p, &doc, &near).unwrap().part, HitPart::ResizeHandle(ResizeHandle::W));

    // At 2x zoom the 8px radius covers only 4 canvas units.
    let zoomed = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    assert_eq!(hit_test(p, &doc, &zoomed), None);
}

#[test]
fn handle_beats_overlapping_body() {
    let current = make_slide(100.0, 100.0, 200.0, 100.0);
    let cur_id = current.id;
    let cover = make_slide(250.0, 150.0, 200.0, 200.0);
    let mut doc = doc_with(vec![current, cover]);
    doc.current_slide_id = Some(cur_id);
    let hit = hit_test(Point::new(300.0, 200.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit, Hit { slide_id: cur_id, part: HitPart::ResizeHandle(ResizeHandle::Se) });
}

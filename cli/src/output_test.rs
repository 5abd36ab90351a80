#![allow(clippy::float_cmp)]

use super::*;
use canvas::doc::{BackgroundType, NewSlide, ViewerAnimation, ViewerSize};
use canvas::geometry::Rect;
use uuid::Uuid;

#[test]
fn summary_line_marks_live_presentations() {
    let summary = PresentationSummary {
        id: Uuid::nil(),
        title: "Sunday Service".into(),
        description: None,
        slide_count: 1,
        is_presenting: true,
    };
    assert_eq!(summary_line(&summary), format!("{}  Sunday Service  (1 slide)  [live]", Uuid::nil()));
}

#[test]
fn presentation_lines_follow_path_order_and_mark_current() {
    let mut p = Presentation::new(Uuid::nil(), "Sunday Service");
    let second = NewSlide::at(Rect::new(400.0, 0.0, 300.0, 200.0)).into_slide(Uuid::new_v4(), 1);
    let first = NewSlide::at(Rect::new(0.0, 0.0, 300.0, 200.0)).into_slide(Uuid::new_v4(), 0);
    p.current_slide_id = Some(second.id);
    p.slides = vec![second.clone(), first.clone()];

    let lines = presentation_lines(&p);
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("presenting=false ring=true"));
    assert!(lines[2].starts_with(' ') && lines[2].contains(&first.id.to_string()));
    assert!(lines[3].starts_with('>') && lines[3].contains(&second.id.to_string()));
}

#[test]
fn waiting_scene_shows_countdown() {
    let scene = ViewerScene::Waiting {
        title: "Evening".into(),
        animation: ViewerAnimation::Wave,
        background: BackgroundType::Stars,
        countdown: Some(65),
    };
    assert_eq!(scene_line(&scene), "waiting  \"Evening\"  animation=wave background=stars starts in 1:05");
}

#[test]
fn live_scene_without_slide() {
    let scene = ViewerScene::Live {
        current: None,
        show_ring: false,
        viewer_size: ViewerSize::Fixed16x9,
        background: BackgroundType::Plain,
    };
    assert_eq!(scene_line(&scene), "live  no slide  ring=off size=1920x1080 background=plain");
}

#[test]
fn centered_origin_uses_template_size() {
    assert_eq!(centered_origin(SlideTemplate::Title), (300.0, 350.0));
    assert_eq!(centered_origin(SlideTemplate::Blank), (340.0, 404.0));
}

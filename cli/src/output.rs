//! Plain-text rendering of presentations and viewer scenes for the terminal.

use canvas::consts::CANVAS_SIZE;
use canvas::doc::{Presentation, PresentationSummary, SlideTemplate};
use canvas::render::format_countdown;
use relay::viewer::ViewerScene;

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;

/// One line per presentation in `list`.
pub fn summary_line(summary: &PresentationSummary) -> String {
    let live = if summary.is_presenting { "  [live]" } else { "" };
    let noun = if summary.slide_count == 1 { "slide" } else { "slides" };
    format!("{}  {}  ({} {noun}){live}", summary.id, summary.title, summary.slide_count)
}

/// Outline printed by `show`: header, broadcast state, then slides in path order.
pub fn presentation_lines(p: &Presentation) -> Vec<String> {
    let b = &p.broadcast;
    let mut lines = vec![
        format!("{}  {}", p.id, p.title),
        format!(
            "presenting={} ring={} size={} background={} animation={} countdown={}",
            b.is_presenting,
            b.show_slide_ring,
            b.viewer_size,
            b.background_type,
            b.viewer_animation,
            b.viewer_countdown_seconds
        ),
    ];
    for slide in p.slides_in_order() {
        let marker = if p.current_slide_id == Some(slide.id) { '>' } else { ' ' };
        lines.push(format!(
            "{marker} {:>3}  {}  {:<24} at ({}, {}) {}x{}",
            slide.order, slide.id, slide.title, slide.x, slide.y, slide.width, slide.height
        ));
    }
    lines
}

/// One line per scene change in `watch`.
pub fn scene_line(scene: &ViewerScene) -> String {
    match scene {
        ViewerScene::Loading => "loading".to_owned(),
        ViewerScene::Waiting { title, animation, background, countdown } => {
            let mut line = format!("waiting  \"{title}\"  animation={animation} background={background}");
            if let Some(seconds) = countdown {
                line.push_str(&format!(" starts in {}", format_countdown(*seconds)));
            }
            line
        }
        ViewerScene::Live { current, show_ring, viewer_size, background } => {
            let slide = match current {
                Some(s) => format!("\"{}\" ({})", s.title, s.id),
                None => "no slide".to_owned(),
            };
            let ring = if *show_ring { "on" } else { "off" };
            format!("live  {slide}  ring={ring} size={viewer_size} background={background}")
        }
    }
}

/// Origin that centers a template-sized slide on the canvas.
pub fn centered_origin(template: SlideTemplate) -> (f64, f64) {
    let (width, height) = template.size();
    ((CANVAS_SIZE - width) / 2.0, (CANVAS_SIZE - height) / 2.0)
}

//! Rendering: turns editor and viewer state into a display list, then paints it.
//!
//! Scene building is pure: [`build_editor_scene`], [`build_viewer_live`] and
//! [`build_viewer_waiting`] produce `Vec<DrawCmd>` from read-only state and never
//! touch the browser, so they are unit-tested natively. [`paint`] is the only place
//! that touches [`web_sys::CanvasRenderingContext2d`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::{CANVAS_SIZE, HANDLE_RADIUS_PX};
use crate::doc::{BackgroundType, BroadcastFields, FrameType, Presentation, Slide, ViewerAnimation, ViewerSize};
use crate::engine::EngineCore;
use crate::geometry::{Rect, ResizeHandle};
use crate::viewport::stage_rect;

/// Editor backdrop behind the canvas square.
const EDITOR_BACKDROP: &str = "#e2e8f0";
/// Fill of the canvas square itself.
const CANVAS_FILL: &str = "#f8fafc";
/// Slide fill when the slide has no background colour.
const DEFAULT_SLIDE_FILL: &str = "#0a0a0a";
/// Slide text colour when the slide has none.
const DEFAULT_TEXT_COLOR: &str = "#ffffff";
const SELECTION_COLOR: &str = "#2563eb";
const CURRENT_COLOR: &str = "#f59e0b";
const GUIDE_COLOR: &str = "#ec4899";
/// Bars around a letterboxed viewer stage.
const LETTERBOX_FILL: &str = "#000000";
/// Stroke widths below, in screen pixels.
const RING_WIDTH_PX: f64 = 2.0;
const GUIDE_WIDTH_PX: f64 = 1.0;

/// Which axis a guide line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Vertical line at a fixed x.
    X,
    /// Horizontal line at a fixed y.
    Y,
}

/// One slide as the painter sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame {
    pub rect: Rect,
    pub rotation_deg: f64,
    pub frame: FrameType,
    pub fill: String,
    pub text_color: String,
    pub title: String,
    /// Draw an outline for frames that are otherwise invisible.
    pub show_invisible: bool,
}

impl SlideFrame {
    fn from_slide(slide: &Slide, show_invisible: bool) -> Self {
        Self {
            rect: slide.rect(),
            rotation_deg: f64::from(slide.metadata.rotation_degrees),
            frame: slide.metadata.frame_type,
            fill: slide.background_color.clone().unwrap_or_else(|| DEFAULT_SLIDE_FILL.to_owned()),
            text_color: slide.text_color.clone().unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_owned()),
            title: slide.title.clone(),
            show_invisible,
        }
    }
}

/// A single display-list entry.
///
/// Entries before the first `Camera` are in screen space (CSS pixels); entries after
/// it are in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole viewport.
    Clear { width: f64, height: f64, color: &'static str },
    /// Viewer backdrop pattern over the whole viewport.
    Backdrop { width: f64, height: f64, kind: BackgroundType },
    /// Letterbox everything outside `rect` and clip what follows to it.
    Stage { width: f64, height: f64, rect: Rect },
    /// Switch to canvas space through this camera.
    Camera(Camera),
    /// The canvas square.
    CanvasBounds,
    /// Grid lines across the canvas square.
    Grid { spacing: f64, line_width: f64 },
    /// Path segment between two consecutive slides.
    PathLine { from: Point, to: Point, line_width: f64 },
    Slide(SlideFrame),
    SelectionRing { rect: Rect, rotation_deg: f64, line_width: f64 },
    /// Highlight for the presented slide. `glow` adds a soft outer halo.
    CurrentRing { rect: Rect, rotation_deg: f64, line_width: f64, glow: bool },
    /// Square resize handle centred on `center`, `half` units from centre to edge.
    Handle { center: Point, half: f64 },
    GuideLine { axis: Axis, at: f64, line_width: f64 },
    /// Waiting animation centred in the viewport. `phase` is seconds since start.
    Waiting { width: f64, height: f64, animation: ViewerAnimation, phase: f64 },
    /// Large countdown digits centred in the viewport.
    Countdown { width: f64, height: f64, seconds: u32 },
    /// Caption line near the bottom of the viewport.
    Caption { width: f64, height: f64, text: String },
}

// =============================================================
// Scene builders
// =============================================================

fn path_lines(doc: &Presentation, line_width: f64) -> impl Iterator<Item = DrawCmd> + '_ {
    let ordered = doc.slides_in_order();
    let pairs: Vec<(Point, Point)> = ordered.windows(2).map(|w| (w[0].rect().center(), w[1].rect().center())).collect();
    pairs.into_iter().map(move |(from, to)| DrawCmd::PathLine { from, to, line_width })
}

/// Display list for the editor.
#[must_use]
pub fn build_editor_scene(core: &EngineCore) -> Vec<DrawCmd> {
    let camera = core.viewport.camera;
    let px = |v: f64| camera.screen_dist_to_canvas(v);
    let mut cmds = vec![
        DrawCmd::Clear { width: core.viewport.width(), height: core.viewport.height(), color: EDITOR_BACKDROP },
        DrawCmd::Camera(camera),
        DrawCmd::CanvasBounds,
    ];

    if core.settings.snap_to_grid {
        cmds.push(DrawCmd::Grid { spacing: core.settings.grid_size, line_width: px(0.5) });
    }
    cmds.extend(path_lines(&core.doc, px(1.5)));

    for slide in &core.doc.slides {
        cmds.push(DrawCmd::Slide(SlideFrame::from_slide(slide, true)));
    }

    for slide in core.doc.slides.iter().filter(|s| core.selection.contains(s.id)) {
        cmds.push(DrawCmd::SelectionRing {
            rect: slide.rect(),
            rotation_deg: f64::from(slide.metadata.rotation_degrees),
            line_width: px(RING_WIDTH_PX),
        });
    }

    if let Some(current) = core.doc.current_slide() {
        let rect = current.rect();
        cmds.push(DrawCmd::CurrentRing {
            rect,
            rotation_deg: f64::from(current.metadata.rotation_degrees),
            line_width: px(RING_WIDTH_PX * 1.5),
            glow: false,
        });
        let half = px(HANDLE_RADIUS_PX) / 2.0;
        for handle in ResizeHandle::ALL {
            cmds.push(DrawCmd::Handle { center: handle.position(&rect), half });
        }
    }

    if let Some(g) = core.guides.x {
        cmds.push(DrawCmd::GuideLine { axis: Axis::X, at: g.line, line_width: px(GUIDE_WIDTH_PX) });
    }
    if let Some(g) = core.guides.y {
        cmds.push(DrawCmd::GuideLine { axis: Axis::Y, at: g.line, line_width: px(GUIDE_WIDTH_PX) });
    }

    cmds
}

/// Display list for a viewer while the presenter is live. A fixed viewer size adds
/// a letterboxed stage ahead of the camera.
#[must_use]
pub fn build_viewer_live(doc: &Presentation, camera: Camera, width: f64, height: f64) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Backdrop { width, height, kind: doc.broadcast.background_type }];
    if doc.broadcast.viewer_size == ViewerSize::Fixed16x9 {
        cmds.push(DrawCmd::Stage { width, height, rect: stage_rect(ViewerSize::Fixed16x9, width, height) });
    }
    cmds.push(DrawCmd::Camera(camera));
    for slide in &doc.slides {
        cmds.push(DrawCmd::Slide(SlideFrame::from_slide(slide, false)));
    }
    if doc.broadcast.show_slide_ring {
        if let Some(current) = doc.current_slide() {
            cmds.push(DrawCmd::CurrentRing {
                rect: current.rect(),
                rotation_deg: f64::from(current.metadata.rotation_degrees),
                line_width: camera.screen_dist_to_canvas(RING_WIDTH_PX * 2.0),
                glow: true,
            });
        }
    }
    cmds
}

/// Display list for a viewer while nobody is presenting.
///
/// The countdown animation needs a running countdown; without one it falls back to
/// the pulse animation.
#[must_use]
pub fn build_viewer_waiting(
    broadcast: &BroadcastFields,
    title: &str,
    countdown: Option<u32>,
    width: f64,
    height: f64,
    phase: f64,
) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Backdrop { width, height, kind: broadcast.background_type }];
    let running = countdown.filter(|s| *s > 0);
    match (broadcast.viewer_animation, running) {
        (ViewerAnimation::Countdown, Some(seconds)) => cmds.push(DrawCmd::Countdown { width, height, seconds }),
        (ViewerAnimation::Countdown, None) => {
            cmds.push(DrawCmd::Waiting { width, height, animation: ViewerAnimation::Pulse, phase });
        }
        (animation, _) => {
            cmds.push(DrawCmd::Waiting { width, height, animation, phase });
            if let Some(seconds) = running {
                cmds.push(DrawCmd::Caption { width, height, text: format!("Starting in {}", format_countdown(seconds)) });
            }
        }
    }
    if !title.is_empty() {
        cmds.push(DrawCmd::Caption { width, height: height * 0.85, text: title.to_owned() });
    }
    cmds
}

/// `m:ss`, or `h:mm:ss` past an hour.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    if h > 0 { format!("{h}:{m:02}:{s:02}") } else { format!("{m}:{s:02}") }
}

// =============================================================
// Painter
// =============================================================

/// Paint a display list. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd], dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    let mut clipped = false;
    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { width, height, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(0.0, 0.0, *width, *height);
            }
            DrawCmd::Backdrop { width, height, kind } => draw_backdrop(ctx, *kind, *width, *height)?,
            DrawCmd::Stage { width, height, rect } => {
                ctx.set_fill_style_str(LETTERBOX_FILL);
                ctx.fill_rect(0.0, 0.0, *width, rect.y);
                ctx.fill_rect(0.0, rect.bottom(), *width, height - rect.bottom());
                ctx.fill_rect(0.0, rect.y, rect.x, rect.height);
                ctx.fill_rect(rect.right(), rect.y, width - rect.right(), rect.height);
                if !clipped {
                    ctx.save();
                    clipped = true;
                }
                ctx.begin_path();
                ctx.rect(rect.x, rect.y, rect.width, rect.height);
                ctx.clip();
            }
            DrawCmd::Camera(camera) => {
                ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
                ctx.translate(camera.pan_x, camera.pan_y)?;
                ctx.scale(camera.zoom, camera.zoom)?;
            }
            DrawCmd::CanvasBounds => {
                ctx.set_fill_style_str(CANVAS_FILL);
                ctx.fill_rect(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);
            }
            DrawCmd::Grid { spacing, line_width } => draw_grid(ctx, *spacing, *line_width),
            DrawCmd::PathLine { from, to, line_width } => {
                ctx.save();
                ctx.set_stroke_style_str("rgba(100, 116, 139, 0.6)");
                ctx.set_line_width(*line_width);
                ctx.set_line_dash(&dash(*line_width * 4.0))?;
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
                ctx.restore();
            }
            DrawCmd::Slide(frame) => draw_slide(ctx, frame)?,
            DrawCmd::SelectionRing { rect, rotation_deg, line_width } => {
                ring(ctx, rect, *rotation_deg, *line_width, SELECTION_COLOR, *line_width * 2.0)?;
            }
            DrawCmd::CurrentRing { rect, rotation_deg, line_width, glow } => {
                ctx.save();
                if *glow {
                    ctx.set_shadow_color(CURRENT_COLOR);
                    ctx.set_shadow_blur(24.0);
                }
                ring(ctx, rect, *rotation_deg, *line_width, CURRENT_COLOR, *line_width)?;
                ctx.restore();
            }
            DrawCmd::Handle { center, half } => {
                ctx.set_fill_style_str("#ffffff");
                ctx.fill_rect(center.x - half, center.y - half, half * 2.0, half * 2.0);
                ctx.set_stroke_style_str(CURRENT_COLOR);
                ctx.set_line_width(half / 3.0);
                ctx.stroke_rect(center.x - half, center.y - half, half * 2.0, half * 2.0);
            }
            DrawCmd::GuideLine { axis, at, line_width } => {
                ctx.save();
                ctx.set_stroke_style_str(GUIDE_COLOR);
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                match axis {
                    Axis::X => {
                        ctx.move_to(*at, 0.0);
                        ctx.line_to(*at, CANVAS_SIZE);
                    }
                    Axis::Y => {
                        ctx.move_to(0.0, *at);
                        ctx.line_to(CANVAS_SIZE, *at);
                    }
                }
                ctx.stroke();
                ctx.restore();
            }
            DrawCmd::Waiting { width, height, animation, phase } => {
                draw_waiting(ctx, *animation, *width, *height, *phase)?;
            }
            DrawCmd::Countdown { width, height, seconds } => {
                let size = (width.min(*height) / 4.0).max(24.0);
                ctx.set_fill_style_str("#ffffff");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_font(&format!("bold {size}px sans-serif"));
                ctx.fill_text(&format_countdown(*seconds), width / 2.0, height / 2.0)?;
            }
            DrawCmd::Caption { width, height, text } => {
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_font("20px sans-serif");
                let fitted = fit_text_with_ellipsis(ctx, text, width * 0.9);
                ctx.fill_text(&fitted, width / 2.0, height * 0.8)?;
            }
        }
    }
    if clipped {
        ctx.restore();
    }
    Ok(())
}

// =============================================================
// Slides
// =============================================================

fn draw_slide(ctx: &CanvasRenderingContext2d, frame: &SlideFrame) -> Result<(), JsValue> {
    let r = frame.rect;
    ctx.save();
    translate_and_rotate(ctx, &r, frame.rotation_deg)?;
    let (x, y) = (-r.width / 2.0, -r.height / 2.0);

    match frame.frame {
        FrameType::Rectangle => {
            ctx.set_fill_style_str(&frame.fill);
            ctx.fill_rect(x, y, r.width, r.height);
            ctx.set_stroke_style_str("rgba(15, 23, 42, 0.4)");
            ctx.set_line_width(1.0);
            ctx.stroke_rect(x, y, r.width, r.height);
        }
        FrameType::Circle => {
            ctx.begin_path();
            ctx.ellipse(0.0, 0.0, r.width / 2.0, r.height / 2.0, 0.0, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str(&frame.fill);
            ctx.fill();
            ctx.set_stroke_style_str("rgba(15, 23, 42, 0.4)");
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
        FrameType::Bracket => {
            ctx.set_fill_style_str(&frame.fill);
            ctx.set_global_alpha(0.15);
            ctx.fill_rect(x, y, r.width, r.height);
            ctx.set_global_alpha(1.0);
            draw_brackets(ctx, x, y, r.width, r.height, &frame.fill);
        }
        FrameType::Invisible => {
            if frame.show_invisible {
                ctx.set_stroke_style_str("rgba(100, 116, 139, 0.5)");
                ctx.set_line_width(1.0);
                ctx.set_line_dash(&dash(6.0))?;
                ctx.stroke_rect(x, y, r.width, r.height);
                ctx.set_line_dash(&dash(0.0))?;
            }
        }
    }

    draw_title(ctx, frame)?;
    ctx.restore();
    Ok(())
}

fn draw_brackets(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, color: &str) {
    let arm = (w.min(h) * 0.15).max(8.0);
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(3.0);
    ctx.begin_path();
    for (cx, cy, sx, sy) in [(x, y, 1.0, 1.0), (x + w, y, -1.0, 1.0), (x, y + h, 1.0, -1.0), (x + w, y + h, -1.0, -1.0)] {
        ctx.move_to(cx + sx * arm, cy);
        ctx.line_to(cx, cy);
        ctx.line_to(cx, cy + sy * arm);
    }
    ctx.stroke();
}

fn draw_title(ctx: &CanvasRenderingContext2d, frame: &SlideFrame) -> Result<(), JsValue> {
    if frame.title.is_empty() {
        return Ok(());
    }
    let font_size = (frame.rect.height / 8.0).clamp(10.0, 48.0);
    ctx.set_fill_style_str(&frame.text_color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{font_size}px sans-serif"));
    let fitted = fit_text_with_ellipsis(ctx, &frame.title, (frame.rect.width - 12.0).max(1.0));
    ctx.fill_text(&fitted, 0.0, 0.0)?;
    Ok(())
}

fn ring(
    ctx: &CanvasRenderingContext2d,
    rect: &Rect,
    rotation_deg: f64,
    line_width: f64,
    color: &str,
    inset: f64,
) -> Result<(), JsValue> {
    ctx.save();
    translate_and_rotate(ctx, rect, rotation_deg)?;
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(line_width);
    ctx.stroke_rect(-rect.width / 2.0 - inset, -rect.height / 2.0 - inset, rect.width + inset * 2.0, rect.height + inset * 2.0);
    ctx.restore();
    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, spacing: f64, line_width: f64) {
    if spacing <= 0.0 {
        return;
    }
    ctx.save();
    ctx.set_stroke_style_str("rgba(148, 163, 184, 0.35)");
    ctx.set_line_width(line_width);
    ctx.begin_path();
    let mut v = 0.0;
    while v <= CANVAS_SIZE {
        ctx.move_to(v, 0.0);
        ctx.line_to(v, CANVAS_SIZE);
        ctx.move_to(0.0, v);
        ctx.line_to(CANVAS_SIZE, v);
        v += spacing;
    }
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Viewer backdrops and animations
// =============================================================

fn draw_backdrop(ctx: &CanvasRenderingContext2d, kind: BackgroundType, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.save();
    match kind {
        BackgroundType::Plain => {
            ctx.set_fill_style_str("#0f172a");
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        BackgroundType::Interactive | BackgroundType::Radial => {
            let g = ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) / 1.5)?;
            let inner = if kind == BackgroundType::Radial { "#312e81" } else { "#1e293b" };
            g.add_color_stop(0.0, inner)?;
            g.add_color_stop(1.0, "#020617")?;
            ctx.set_fill_style_canvas_gradient(&g);
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        BackgroundType::Paper => {
            ctx.set_fill_style_str("#f5f0e6");
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        BackgroundType::Dots | BackgroundType::Stars => {
            ctx.set_fill_style_str("#020617");
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.35)");
            let step = if kind == BackgroundType::Dots { 24.0 } else { 53.0 };
            let mut y = step / 2.0;
            let mut row = 0.0;
            while y < h {
                let mut x = if kind == BackgroundType::Stars { (row * 17.0) % step } else { step / 2.0 };
                while x < w {
                    ctx.begin_path();
                    ctx.arc(x, y, 1.2, 0.0, 2.0 * PI)?;
                    ctx.fill();
                    x += step;
                }
                y += step;
                row += 1.0;
            }
        }
        BackgroundType::Hexagon | BackgroundType::Circuit => {
            ctx.set_fill_style_str("#020617");
            ctx.fill_rect(0.0, 0.0, w, h);
            let color = if kind == BackgroundType::Hexagon { "rgba(99, 102, 241, 0.25)" } else { "rgba(16, 185, 129, 0.25)" };
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(1.0);
            let step = 40.0;
            ctx.begin_path();
            let mut y = 0.0;
            while y < h {
                let mut x = 0.0;
                while x < w {
                    ctx.move_to(x, y);
                    ctx.line_to(x + step / 2.0, y + step / 4.0);
                    ctx.line_to(x + step / 2.0, y + step * 0.75);
                    x += step;
                }
                y += step;
            }
            ctx.stroke();
        }
    }
    ctx.restore();
    Ok(())
}

fn draw_waiting(ctx: &CanvasRenderingContext2d, animation: ViewerAnimation, w: f64, h: f64, phase: f64) -> Result<(), JsValue> {
    let (cx, cy) = (w / 2.0, h / 2.0);
    let base = w.min(h) / 8.0;
    ctx.save();
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
    match animation {
        ViewerAnimation::Pulse | ViewerAnimation::Countdown => {
            let t = (phase * PI).sin().abs();
            ctx.set_global_alpha(0.4 + 0.6 * t);
            ctx.begin_path();
            ctx.arc(cx, cy, base * (0.8 + 0.4 * t), 0.0, 2.0 * PI)?;
            ctx.fill();
        }
        ViewerAnimation::Wave => {
            let bars = 7;
            let bar_w = base / 3.0;
            for i in 0..bars {
                let fi = f64::from(i);
                let amp = ((phase * 4.0 + fi * 0.6).sin() + 1.0) / 2.0;
                let bh = base * (0.4 + amp * 1.2);
                let x = cx + (fi - f64::from(bars - 1) / 2.0) * bar_w * 1.6 - bar_w / 2.0;
                ctx.fill_rect(x, cy - bh / 2.0, bar_w, bh);
            }
        }
        ViewerAnimation::Spinner => {
            let start = phase * 2.0 * PI;
            ctx.set_line_width(base / 6.0);
            ctx.begin_path();
            ctx.arc(cx, cy, base, start, start + PI * 1.5)?;
            ctx.stroke();
        }
        ViewerAnimation::Particles => {
            for i in 0..24 {
                let fi = f64::from(i);
                let angle = fi * 0.9 + phase * 0.5;
                let radius = base * (1.0 + ((fi * 1.7 + phase).sin() + 1.0));
                ctx.begin_path();
                ctx.arc(cx + angle.cos() * radius, cy + angle.sin() * radius, 2.5, 0.0, 2.0 * PI)?;
                ctx.fill();
            }
        }
        ViewerAnimation::Gradient => {
            let shift = (phase * 0.2).fract() * w;
            let g = ctx.create_linear_gradient(shift - w, 0.0, shift + w, h);
            g.add_color_stop(0.0, "rgba(59, 130, 246, 0.6)")?;
            g.add_color_stop(0.5, "rgba(168, 85, 247, 0.6)")?;
            g.add_color_stop(1.0, "rgba(236, 72, 153, 0.6)")?;
            ctx.set_fill_style_canvas_gradient(&g);
            ctx.fill_rect(0.0, 0.0, w, h);
        }
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the rectangle's center and rotate by `rotation_deg`.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, rect: &Rect, rotation_deg: f64) -> Result<(), JsValue> {
    let c = rect.center();
    ctx.translate(c.x, c.y)?;
    ctx.rotate(rotation_deg.to_radians())?;
    Ok(())
}

/// Dash pattern array; a zero length resets to solid.
fn dash(len: f64) -> JsValue {
    let segments: Vec<JsValue> = if len > 0.0 { vec![JsValue::from_f64(len), JsValue::from_f64(len)] } else { Vec::new() };
    JsValue::from(segments.into_iter().collect::<js_sys::Array>())
}

fn fit_text_with_ellipsis(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if measured_text_width(ctx, trimmed) <= max_w {
        return trimmed.to_owned();
    }

    let ellipsis = "...";
    let mut chars: Vec<char> = trimmed.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{}", chars.iter().collect::<String>().trim_end(), ellipsis);
        if measured_text_width(ctx, &candidate) <= max_w {
            return candidate;
        }
    }
    ellipsis.to_owned()
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

//! Geometry engine: rectangles, grid snapping, alignment guides, resize math and fit zoom.
//!
//! Everything here is a pure function of its inputs. Pointer math funnels through
//! [`crate::camera::Camera`] before it reaches this module, so these functions only ever
//! see canvas-space values.
//!
//! Ordering rules shared by drag and resize:
//! 1. clamp to the canvas and the slide minimums,
//! 2. apply an alignment guide if one fires on that axis,
//! 3. otherwise snap to the grid, without leaving the clamped range.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{CANVAS_SIZE, DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH, MAX_ZOOM, MIN_SLIDE_HEIGHT, MIN_SLIDE_WIDTH, MIN_ZOOM};

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// Clamp without panicking when the range is inverted; the lower bound wins.
#[must_use]
pub fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo { lo } else { value.max(lo).min(hi) }
}

// =============================================================
// Snapping
// =============================================================

/// Round `value` to the nearest multiple of `grid`. A non-positive grid disables snapping.
#[must_use]
pub fn snap(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 || !grid.is_finite() {
        return value;
    }
    (value / grid).round() * grid
}

/// Snap `value` to the grid, then step back inside `[lo, hi]` if rounding left the range.
#[must_use]
pub fn snap_within(value: f64, grid: f64, lo: f64, hi: f64) -> f64 {
    if grid <= 0.0 || !grid.is_finite() {
        return bounded(value, lo, hi);
    }
    let mut snapped = snap(value, grid);
    if snapped > hi {
        snapped = (hi / grid).floor() * grid;
    }
    if snapped < lo {
        snapped = (lo / grid).ceil() * grid;
    }
    bounded(snapped, lo, hi)
}

/// Keep a slide of the given size fully inside the canvas.
#[must_use]
pub fn clamp_position(width: f64, height: f64, x: f64, y: f64) -> Point {
    Point::new(bounded(x, 0.0, CANVAS_SIZE - width), bounded(y, 0.0, CANVAS_SIZE - height))
}

/// Repair a rectangle read from outside: finite numbers, minimum size, inside the canvas.
#[must_use]
pub fn sanitize_rect(rect: Rect) -> Rect {
    let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
    let width = bounded(finite_or(rect.width, DEFAULT_SLIDE_WIDTH), MIN_SLIDE_WIDTH, CANVAS_SIZE);
    let height = bounded(finite_or(rect.height, DEFAULT_SLIDE_HEIGHT), MIN_SLIDE_HEIGHT, CANVAS_SIZE);
    let pos = clamp_position(width, height, finite_or(rect.x, 0.0), finite_or(rect.y, 0.0));
    Rect::new(pos.x, pos.y, width, height)
}

// =============================================================
// Alignment guides
// =============================================================

/// A guide that fired on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    /// Origin coordinate the moving slide snaps to on this axis.
    pub value: f64,
    /// Canvas coordinate of the sibling edge or center line to draw.
    pub line: f64,
}

/// Guides for both axes; `None` when nothing is within the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentGuides {
    pub x: Option<Guide>,
    pub y: Option<Guide>,
}

impl AlignmentGuides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Test one axis of one sibling: start-to-start, end-to-end, then center-to-center.
fn axis_guide(candidate: f64, size: f64, sib_start: f64, sib_size: f64, threshold: f64) -> Option<Guide> {
    let sib_end = sib_start + sib_size;
    let sib_mid = sib_start + sib_size / 2.0;
    if (candidate - sib_start).abs() <= threshold {
        return Some(Guide { value: sib_start, line: sib_start });
    }
    if (candidate + size - sib_end).abs() <= threshold {
        return Some(Guide { value: sib_end - size, line: sib_end });
    }
    if (candidate + size / 2.0 - sib_mid).abs() <= threshold {
        return Some(Guide { value: sib_mid - size / 2.0, line: sib_mid });
    }
    None
}

/// Find alignment guides for a slide of `size` whose origin would land at `candidate`.
///
/// The first sibling (iteration order) that matches on an axis wins that axis; later
/// siblings are only consulted for axes still unresolved. `siblings` must not include
/// the moving slide itself.
pub fn compute_alignment_guides<'a, I>(width: f64, height: f64, candidate: Point, siblings: I, threshold: f64) -> AlignmentGuides
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut guides = AlignmentGuides::default();
    for sib in siblings {
        if guides.x.is_none() {
            guides.x = axis_guide(candidate.x, width, sib.x, sib.width, threshold);
        }
        if guides.y.is_none() {
            guides.y = axis_guide(candidate.y, height, sib.y, sib.height, threshold);
        }
        if guides.x.is_some() && guides.y.is_some() {
            break;
        }
    }
    guides
}

/// Snapping options applied by [`place_slide`] and [`resize_slide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOptions {
    /// Grid spacing; `None` disables grid snapping.
    pub grid: Option<f64>,
    /// Guide threshold; `None` disables alignment guides.
    pub guide_threshold: Option<f64>,
}

/// Compute the final origin for a dragged slide and the guides that fired.
pub fn place_slide<'a, I>(width: f64, height: f64, candidate: Point, siblings: I, opts: SnapOptions) -> (Point, AlignmentGuides)
where
    I: IntoIterator<Item = &'a Rect>,
{
    let clamped = clamp_position(width, height, candidate.x, candidate.y);
    let guides = match opts.guide_threshold {
        Some(threshold) => compute_alignment_guides(width, height, clamped, siblings, threshold),
        None => AlignmentGuides::default(),
    };

    let max_x = CANVAS_SIZE - width;
    let max_y = CANVAS_SIZE - height;
    let grid = opts.grid.unwrap_or(0.0);

    let x = match guides.x {
        Some(g) => bounded(g.value, 0.0, max_x),
        None => snap_within(clamped.x, grid, 0.0, max_x),
    };
    let y = match guides.y {
        Some(g) => bounded(g.value, 0.0, max_y),
        None => snap_within(clamped.y, grid, 0.0, max_y),
    };
    (Point::new(x, y), guides)
}

// =============================================================
// Resize
// =============================================================

/// One of the eight resize handles around a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from the top edge.
    pub const ALL: [ResizeHandle; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Canvas position of this handle on `rect`.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.right()
        } else {
            cx
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.bottom()
        } else {
            cy
        };
        Point::new(x, y)
    }

    /// CSS cursor name shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Resize `start` by a canvas-space pointer delta through `handle`.
///
/// The edge opposite the handle stays fixed. Width and height are clamped to the slide
/// minimums and to what still fits on the canvas, then snapped to the grid inside that
/// same range.
#[must_use]
pub fn resize_slide(start: Rect, handle: ResizeHandle, dx: f64, dy: f64, grid: Option<f64>) -> Rect {
    let grid = grid.unwrap_or(0.0);
    let mut out = start;

    if handle.moves_right() {
        let max = CANVAS_SIZE - start.x;
        out.width = snap_within(bounded(start.width + dx, MIN_SLIDE_WIDTH, max), grid, MIN_SLIDE_WIDTH, max);
    } else if handle.moves_left() {
        let max = start.right();
        out.width = snap_within(bounded(start.width - dx, MIN_SLIDE_WIDTH, max), grid, MIN_SLIDE_WIDTH, max);
        out.x = start.right() - out.width;
    }

    if handle.moves_bottom() {
        let max = CANVAS_SIZE - start.y;
        out.height = snap_within(bounded(start.height + dy, MIN_SLIDE_HEIGHT, max), grid, MIN_SLIDE_HEIGHT, max);
    } else if handle.moves_top() {
        let max = start.bottom();
        out.height = snap_within(bounded(start.height - dy, MIN_SLIDE_HEIGHT, max), grid, MIN_SLIDE_HEIGHT, max);
        out.y = start.bottom() - out.height;
    }

    out
}

// =============================================================
// Fit
// =============================================================

/// Largest zoom at which `content` fits inside the viewport minus `padding` on every side.
#[must_use]
pub fn fit_zoom(content_width: f64, content_height: f64, viewport_width: f64, viewport_height: f64, padding: f64) -> f64 {
    if content_width <= 0.0 || content_height <= 0.0 {
        return MAX_ZOOM;
    }
    let zx = (viewport_width - 2.0 * padding) / content_width;
    let zy = (viewport_height - 2.0 * padding) / content_height;
    bounded(zx.min(zy), MIN_ZOOM, MAX_ZOOM)
}

/// Largest `max_width × max_height` rectangle (same aspect, never scaled up) that
/// fits a `width × height` area, centred in it.
#[must_use]
pub fn letterbox(width: f64, height: f64, max_width: f64, max_height: f64) -> Rect {
    let scale = (width / max_width).min(height / max_height).min(1.0);
    let (w, h) = (max_width * scale, max_height * scale);
    Rect::new((width - w) / 2.0, (height - h) / 2.0, w, h)
}

/// Bounding box of all rectangles, or `None` for an empty input.
pub fn bounding_box<'a, I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects.into_iter().fold(None, |acc, r| match acc {
        None => Some(*r),
        Some(b) => Some(b.union(r)),
    })
}

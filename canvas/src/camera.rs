#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for zoom/pan over the virtual canvas.
///
/// `pan_x` / `pan_y` are the screen position (CSS pixels) of the canvas origin.
/// `zoom` is a scale factor (1.0 = one canvas unit per pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to a canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Change zoom while keeping the canvas point under `anchor` (screen space) fixed.
    ///
    /// The requested zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`. Returns `false` when the
    /// clamped zoom equals the current one and nothing changed.
    pub fn zoom_at(&mut self, anchor: Point, zoom: f64) -> bool {
        let next = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (next - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        let pinned = self.screen_to_canvas(anchor);
        self.zoom = next;
        self.pan_x = anchor.x - pinned.x * next;
        self.pan_y = anchor.y - pinned.y * next;
        true
    }

    /// Set zoom and pan so `center` (canvas space) lands on `screen_center`.
    pub fn look_at(&mut self, center: Point, screen_center: Point, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = screen_center.x - center.x * self.zoom;
        self.pan_y = screen_center.y - center.y * self.zoom;
    }

    /// Translate the canvas by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }
}

//! Viewport controller: zoom/pan state, fit algorithms and the fullscreen lifecycle.
//!
//! The viewport owns a [`Camera`] and the current viewport size in CSS pixels. It is
//! used by both the editor engine and the read-only viewer.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::{Camera, Point};
use crate::consts::{
    CENTER_PADDING_PX, DEFAULT_CENTER_ZOOM, DEFAULT_EDITOR_ZOOM, FALLBACK_VIEWPORT_PX, KEY_ZOOM_STEP, OVERVIEW_MAX_ZOOM,
    OVERVIEW_MIN_ZOOM, OVERVIEW_PADDING_PX, STAGE_MAX_HEIGHT_PX, STAGE_MAX_WIDTH_PX, STAGE_PADDING_PX, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT,
};
use crate::doc::ViewerSize;
use crate::geometry::{Rect, bounded, bounding_box, fit_zoom, letterbox};

/// Screen area a viewer draws slides into: the whole `width × height` viewport, or
/// a letterboxed 16:9 stage of at most 1920×1080 for [`ViewerSize::Fixed16x9`].
#[must_use]
pub fn stage_rect(size: ViewerSize, width: f64, height: f64) -> Rect {
    match size {
        ViewerSize::Responsive => Rect::new(0.0, 0.0, width, height),
        ViewerSize::Fixed16x9 => letterbox(width, height, STAGE_MAX_WIDTH_PX, STAGE_MAX_HEIGHT_PX),
    }
}

/// Fullscreen lifecycle. Requests go out as actions; the host reports the outcome
/// through [`ViewportController::on_fullscreen_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    Windowed,
    /// Enter requested, waiting for the host.
    Entering,
    Fullscreen,
    /// Exit requested, waiting for the host.
    Exiting,
}

/// What the host should do after a fullscreen toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenRequest {
    Enter,
    Exit,
}

/// Zoom/pan state plus viewport dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    pub camera: Camera,
    width: f64,
    height: f64,
    fullscreen: FullscreenState,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(FALLBACK_VIEWPORT_PX, FALLBACK_VIEWPORT_PX)
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut vp = Self {
            camera: Camera { pan_x: 0.0, pan_y: 0.0, zoom: DEFAULT_EDITOR_ZOOM },
            width: FALLBACK_VIEWPORT_PX,
            height: FALLBACK_VIEWPORT_PX,
            fullscreen: FullscreenState::Windowed,
        };
        vp.set_size(width, height);
        vp
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn fullscreen(&self) -> FullscreenState {
        self.fullscreen
    }

    /// Update the viewport size. Non-positive or non-finite sizes fall back to a default.
    pub fn set_size(&mut self, width: f64, height: f64) {
        let valid = |v: f64| if v.is_finite() && v > 0.0 { v } else { FALLBACK_VIEWPORT_PX };
        self.width = valid(width);
        self.height = valid(height);
    }

    #[must_use]
    pub fn screen_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Center `rect` at the largest zoom not above `target_zoom` that still fits it
    /// inside the viewport minus padding.
    pub fn center_on_rect(&mut self, rect: Rect, target_zoom: f64) {
        let fit = fit_zoom(rect.width, rect.height, self.width, self.height, CENTER_PADDING_PX);
        self.camera.look_at(rect.center(), self.screen_center(), fit.min(target_zoom));
    }

    /// [`Self::center_on_rect`] with the default target zoom.
    pub fn center_on_slide(&mut self, rect: Rect) {
        self.center_on_rect(rect, DEFAULT_CENTER_ZOOM);
    }

    /// Overview: fit the bounding box of every rectangle, zoom held inside the overview
    /// band. Returns `false` (camera untouched) when there is nothing to fit.
    pub fn fit_all(&mut self, rects: &[Rect]) -> bool {
        self.fit_all_in(rects, ViewerSize::Responsive)
    }

    #[must_use]
    pub fn stage(&self, size: ViewerSize) -> Rect {
        stage_rect(size, self.width, self.height)
    }

    /// Viewer centering. Inside the fixed stage the padding shrinks so small text
    /// gets as much room as possible.
    pub fn center_on_slide_in(&mut self, rect: Rect, size: ViewerSize) {
        let stage = self.stage(size);
        let padding = match size {
            ViewerSize::Responsive => CENTER_PADDING_PX,
            ViewerSize::Fixed16x9 => STAGE_PADDING_PX,
        };
        let fit = fit_zoom(rect.width, rect.height, stage.width, stage.height, padding);
        self.camera.look_at(rect.center(), stage.center(), fit.min(DEFAULT_CENTER_ZOOM));
    }

    /// [`Self::fit_all`] inside the stage for `size`.
    pub fn fit_all_in(&mut self, rects: &[Rect], size: ViewerSize) -> bool {
        let Some(bbox) = bounding_box(rects) else {
            return false;
        };
        let stage = self.stage(size);
        let fit = fit_zoom(bbox.width, bbox.height, stage.width, stage.height, OVERVIEW_PADDING_PX);
        let zoom = bounded(fit, OVERVIEW_MIN_ZOOM, OVERVIEW_MAX_ZOOM);
        self.camera.look_at(bbox.center(), stage.center(), zoom);
        true
    }

    /// Wheel gesture. Zooms around `anchor` only while Ctrl/Cmd is held; otherwise the
    /// gesture belongs to the page. Returns `true` when the camera changed.
    pub fn on_wheel(&mut self, anchor: Point, delta_y: f64, command: bool) -> bool {
        if !command || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT };
        self.camera.zoom_at(anchor, self.camera.zoom * factor)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.camera.zoom_at(self.screen_center(), self.camera.zoom + KEY_ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.camera.zoom_at(self.screen_center(), self.camera.zoom - KEY_ZOOM_STEP)
    }

    /// Back to 100% around the viewport center.
    pub fn reset_zoom(&mut self) -> bool {
        self.camera.zoom_at(self.screen_center(), 1.0)
    }

    /// Flip fullscreen. Returns the request for the host, or `None` while a previous
    /// request is still pending.
    pub fn toggle_fullscreen(&mut self) -> Option<FullscreenRequest> {
        match self.fullscreen {
            FullscreenState::Windowed => {
                self.fullscreen = FullscreenState::Entering;
                Some(FullscreenRequest::Enter)
            }
            FullscreenState::Fullscreen => {
                self.fullscreen = FullscreenState::Exiting;
                Some(FullscreenRequest::Exit)
            }
            FullscreenState::Entering | FullscreenState::Exiting => None,
        }
    }

    /// Host reported a fullscreen transition (including ones the user triggered with
    /// Escape). Adopts the new size and re-centers on `current`, if any.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool, width: f64, height: f64, current: Option<Rect>) {
        self.fullscreen = if is_fullscreen { FullscreenState::Fullscreen } else { FullscreenState::Windowed };
        self.set_size(width, height);
        if let Some(rect) = current {
            self.center_on_slide(rect);
        }
    }
}

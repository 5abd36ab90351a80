//! Shared numeric constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Side length of the square virtual canvas, in canvas units.
pub const CANVAS_SIZE: f64 = 1000.0;

/// Smallest width a slide may have, in canvas units.
pub const MIN_SLIDE_WIDTH: f64 = 100.0;

/// Smallest height a slide may have, in canvas units.
pub const MIN_SLIDE_HEIGHT: f64 = 60.0;

/// Width given to a new slide when the caller does not pick one.
pub const DEFAULT_SLIDE_WIDTH: f64 = 320.0;

/// Height given to a new slide when the caller does not pick one.
pub const DEFAULT_SLIDE_HEIGHT: f64 = 192.0;

/// Offset applied to pasted and duplicated slides so they don't cover the original.
pub const PASTE_OFFSET: f64 = 50.0;

/// Slide rotation bound in degrees (symmetric).
pub const MAX_ROTATION_DEG: i32 = 180;

// ── Snapping ────────────────────────────────────────────────────

/// Default grid spacing in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Maximum edge/center distance, in canvas units, at which a sibling guide fires.
pub const ALIGNMENT_THRESHOLD: f64 = 5.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom the editor opens at before any slide is known.
pub const DEFAULT_EDITOR_ZOOM: f64 = 0.4;

/// Zoom `center_on_slide` aims for when the slide fits.
pub const DEFAULT_CENTER_ZOOM: f64 = 2.0;

/// Screen padding kept around a centered slide.
pub const CENTER_PADDING_PX: f64 = 40.0;

/// Screen padding kept around the overview bounding box.
pub const OVERVIEW_PADDING_PX: f64 = 100.0;

/// Overview zoom never drops below this.
pub const OVERVIEW_MIN_ZOOM: f64 = 0.3;

/// Overview zoom never exceeds this, even for a single small slide.
pub const OVERVIEW_MAX_ZOOM: f64 = 0.6;

/// Wheel zoom multiplier for one notch toward the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Wheel zoom multiplier for one notch away from the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Additive zoom step for keyboard zoom shortcuts.
pub const KEY_ZOOM_STEP: f64 = 0.1;

/// Viewport edge used when the host has not reported a size yet.
pub const FALLBACK_VIEWPORT_PX: f64 = 600.0;

// ── Viewer stage ────────────────────────────────────────────────

/// Largest stage the fixed 16:9 viewer size draws into, in CSS pixels.
pub const STAGE_MAX_WIDTH_PX: f64 = 1920.0;

/// See [`STAGE_MAX_WIDTH_PX`].
pub const STAGE_MAX_HEIGHT_PX: f64 = 1080.0;

/// Screen padding kept around a centered slide inside the fixed stage.
pub const STAGE_PADDING_PX: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

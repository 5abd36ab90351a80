//! Input model: modifier keys, pointer buttons, editor settings and the interaction
//! state machine.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a pointer event.
//! `InteractionState` is the gesture tracked between pointer-down and pointer-up; at
//! most one drag or resize is active at a time, scoped to one slide.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::{ALIGNMENT_THRESHOLD, DEFAULT_GRID_SIZE};
use crate::doc::SlideId;
use crate::geometry::{Rect, ResizeHandle, SnapOptions};
use crate::selection::ClickMode;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Selection behaviour implied by these modifiers. Ctrl/Cmd takes precedence.
    #[must_use]
    pub fn click_mode(self) -> ClickMode {
        if self.command() {
            ClickMode::Toggle
        } else if self.shift {
            ClickMode::Range
        } else {
            ClickMode::Single
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button; pans the canvas.
    Middle,
    /// Right mouse button; ignored by the editor.
    Secondary,
}

/// A keyboard key as reported by the browser (`KeyboardEvent.key`, e.g. `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Case-insensitive comparison for single-letter shortcuts.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Editor toggles that shape drag and resize results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub show_alignment_guides: bool,
    pub guide_threshold: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            grid_size: DEFAULT_GRID_SIZE,
            show_alignment_guides: true,
            guide_threshold: ALIGNMENT_THRESHOLD,
        }
    }
}

impl EditorSettings {
    /// Snapping options for the geometry engine.
    #[must_use]
    pub fn snap_options(&self) -> SnapOptions {
        SnapOptions {
            grid: self.snap_to_grid.then_some(self.grid_size),
            guide_threshold: self.show_alignment_guides.then_some(self.guide_threshold),
        }
    }
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Middle-button pan.
    Panning {
        /// Screen position at the previous event.
        last_screen: Point,
    },
    /// A slide is following the pointer.
    Dragging {
        id: SlideId,
        /// Pointer canvas position minus the slide origin at press time.
        offset: Point,
        /// Slide origin at press time.
        start: Point,
        /// Whether any move changed the slide; a release without movement is a click.
        moved: bool,
    },
    /// A slide is being resized through one of its handles.
    Resizing {
        id: SlideId,
        handle: ResizeHandle,
        /// Pointer canvas position at press time.
        start_pointer: Point,
        /// Slide rectangle at press time.
        start: Rect,
        moved: bool,
    },
}

impl InteractionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Slide the active drag/resize is scoped to.
    #[must_use]
    pub fn slide_id(&self) -> Option<SlideId> {
        match self {
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}

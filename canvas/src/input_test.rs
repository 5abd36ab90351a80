#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.command());
}

#[test]
fn command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.command());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.command());
    assert!(!Modifiers { alt: true, shift: true, ..Modifiers::default() }.command());
}

#[test]
fn click_mode_precedence() {
    assert_eq!(Modifiers::default().click_mode(), ClickMode::Single);
    assert_eq!(Modifiers { shift: true, ..Modifiers::default() }.click_mode(), ClickMode::Range);
    assert_eq!(Modifiers { meta: true, shift: true, ..Modifiers::default() }.click_mode(), ClickMode::Toggle);
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_is_case_insensitive() {
    assert!(Key::new("F").is("f"));
    assert!(Key::new("Delete").is("delete"));
    assert!(!Key::new("d").is("Delete"));
}

// =============================================================
// EditorSettings
// =============================================================

#[test]
fn default_settings_snap_and_guide() {
    let opts = EditorSettings::default().snap_options();
    assert_eq!(opts.grid, Some(DEFAULT_GRID_SIZE));
    assert_eq!(opts.guide_threshold, Some(ALIGNMENT_THRESHOLD));
}

#[test]
fn disabled_settings_produce_none() {
    let s = EditorSettings { snap_to_grid: false, show_alignment_guides: false, ..EditorSettings::default() };
    let opts = s.snap_options();
    assert_eq!(opts.grid, None);
    assert_eq!(opts.guide_threshold, None);
}

// =============================================================
// InteractionState
// =============================================================

#[test]
fn interaction_default_is_idle() {
    assert!(InteractionState::default().is_idle());
    assert_eq!(InteractionState::default().slide_id(), None);
}

#[test]
fn interaction_slide_id() {
    let id = Uuid::new_v4();
    let drag = InteractionState::Dragging {
        id,
        offset: Point::new(1.0, 2.0),
        start: Point::new(0.0, 0.0),
        moved: false,
    };
    assert_eq!(drag.slide_id(), Some(id));
    let resize = InteractionState::Resizing {
        id,
        handle: ResizeHandle::Se,
        start_pointer: Point::new(0.0, 0.0),
        start: Rect::new(0.0, 0.0, 100.0, 60.0),
        moved: false,
    };
    assert_eq!(resize.slide_id(), Some(id));
    let pan = InteractionState::Panning { last_screen: Point::new(0.0, 0.0) };
    assert_eq!(pan.slide_id(), None);
    assert!(!pan.is_idle());
}

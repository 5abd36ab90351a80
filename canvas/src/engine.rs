use std::collections::HashSet;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::PASTE_OFFSET;
use crate::doc::{BroadcastPatch, GeometryPatch, NewSlide, Presentation, PropertiesPatch, Slide, SlideId, SlideTemplate};
use crate::geometry::{AlignmentGuides, Rect, clamp_position, place_slide, resize_slide};
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, EditorSettings, InteractionState, Key, Modifiers, WheelDelta};
use crate::render;
use crate::selection::{ClickMode, Selection};
use crate::viewport::{FullscreenRequest, ViewportController};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Optimistic geometry edit already applied locally; persist on a debounce.
    SlideGeometryChanged { id: SlideId, patch: GeometryPatch },
    /// Final geometry of a drag or resize; persist now.
    SlideGeometryCommitted { id: SlideId, patch: GeometryPatch },
    /// The presented slide changed.
    CurrentSlideChanged { id: Option<SlideId> },
    BroadcastChanged(BroadcastPatch),
    SlidePropertiesChanged { id: SlideId, patch: PropertiesPatch },
    /// New path order, first to last.
    SlidesReordered(Vec<SlideId>),
    CreateSlideRequested(NewSlide),
    /// Slides already removed locally; delete them from the store.
    DeleteSlidesRequested(Vec<SlideId>),
    /// Open the edit form for a slide.
    EditSlideRequested { id: SlideId },
    /// Enable or disable page text selection.
    SetTextSelection(bool),
    FullscreenRequested(FullscreenRequest),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: Presentation,
    pub viewport: ViewportController,
    pub selection: Selection,
    pub interaction: InteractionState,
    pub settings: EditorSettings,
    /// Guides that fired on the last drag move; cleared when the drag ends.
    pub guides: AlignmentGuides,
    pub dpr: f64,
    clipboard: Vec<Slide>,
    cursor: String,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: Presentation::new(SlideId::nil(), ""),
            viewport: ViewportController::default(),
            selection: Selection::new(),
            interaction: InteractionState::Idle,
            settings: EditorSettings::default(),
            guides: AlignmentGuides::default(),
            dpr: 1.0,
            clipboard: Vec::new(),
            cursor: "default".into(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the document and pick the initial view: the current slide if there is
    /// one, otherwise an overview of every slide.
    pub fn load_presentation(&mut self, mut presentation: Presentation) -> Vec<Action> {
        presentation.sanitize();
        self.doc = presentation;
        self.selection.clear();
        self.interaction = InteractionState::Idle;
        self.guides = AlignmentGuides::default();
        self.initial_view();
        vec![Action::RenderNeeded]
    }

    fn initial_view(&mut self) {
        if let Some(rect) = self.doc.current_slide().map(Slide::rect) {
            self.viewport.center_on_slide(rect);
        } else {
            let rects = self.slide_rects();
            self.viewport.fit_all(&rects);
        }
    }

    /// Merge a poll result. Geometry of slides in `in_flight`, and of the slide under an
    /// active drag/resize, is kept local.
    pub fn apply_server_state(&mut self, server: Presentation, in_flight: &HashSet<SlideId>) -> Vec<Action> {
        let mut guard = in_flight.clone();
        if let Some(id) = self.interaction.slide_id() {
            guard.insert(id);
        }
        let before = self.doc.clone();
        self.doc.merge_from_server(server, &guard);

        let ids = self.slide_ids();
        self.selection.retain_existing(&ids);

        let mut actions = Vec::new();
        if let Some(id) = self.interaction.slide_id() {
            if self.doc.slide(id).is_none() {
                self.interaction = InteractionState::Idle;
                self.guides = AlignmentGuides::default();
                actions.push(Action::SetTextSelection(true));
            }
        }
        if self.doc != before || !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// The store created a slide this engine asked for.
    pub fn apply_slide_created(&mut self, slide: Slide) -> Vec<Action> {
        let id = slide.id;
        if self.doc.slide(id).is_none() {
            self.doc.slides.push(slide);
        }
        self.selection.select_only(id);
        vec![Action::RenderNeeded]
    }

    /// Slides were deleted elsewhere (or the delete was confirmed).
    pub fn apply_slides_deleted(&mut self, ids: &[SlideId]) -> Vec<Action> {
        for id in ids {
            self.doc.remove_slide(*id);
        }
        let remaining = self.slide_ids();
        self.selection.retain_existing(&remaining);
        vec![Action::RenderNeeded]
    }

    pub fn set_settings(&mut self, settings: EditorSettings) -> Vec<Action> {
        self.settings = settings;
        vec![Action::RenderNeeded]
    }

    /// Present `id` (or nothing) and bring it into view.
    pub fn set_current_slide(&mut self, id: Option<SlideId>) -> Vec<Action> {
        let id = id.filter(|id| self.doc.slide(*id).is_some());
        let mut actions = Vec::new();
        if self.doc.current_slide_id != id {
            self.doc.current_slide_id = id;
            actions.push(Action::CurrentSlideChanged { id });
        }
        if let Some(rect) = self.doc.current_slide().map(Slide::rect) {
            self.viewport.center_on_slide(rect);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_broadcast(&mut self, patch: BroadcastPatch) -> Vec<Action> {
        if patch.is_empty() {
            return Vec::new();
        }
        self.doc.broadcast.apply(&patch);
        vec![Action::BroadcastChanged(patch), Action::RenderNeeded]
    }

    /// Edit-form save.
    pub fn update_slide_properties(&mut self, id: SlideId, patch: PropertiesPatch) -> Vec<Action> {
        let Some(slide) = self.doc.slide_mut(id) else {
            return Vec::new();
        };
        if patch.is_empty() {
            return Vec::new();
        }
        slide.apply_properties(&patch);
        vec![Action::SlidePropertiesChanged { id, patch }, Action::RenderNeeded]
    }

    /// Path editor: rewrite the traversal order.
    pub fn reorder_slides(&mut self, ids: &[SlideId]) -> Vec<Action> {
        self.doc.reorder(ids);
        let ordered = self.doc.slides_in_order().iter().map(|s| s.id).collect();
        vec![Action::SlidesReordered(ordered), Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport.set_size(width_css, height_css);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        vec![Action::RenderNeeded]
    }

    /// Host reported a fullscreen transition.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool, width_css: f64, height_css: f64) -> Vec<Action> {
        let current = self.doc.current_slide().map(Slide::rect);
        self.viewport.on_fullscreen_change(is_fullscreen, width_css, height_css, current);
        vec![Action::RenderNeeded]
    }

    /// Zoom to the current slide.
    pub fn fit_current(&mut self) -> Vec<Action> {
        match self.doc.current_slide().map(Slide::rect) {
            Some(rect) => {
                self.viewport.center_on_slide(rect);
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Zoom out to show every slide.
    pub fn overview(&mut self) -> Vec<Action> {
        let rects = self.slide_rects();
        if self.viewport.fit_all(&rects) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Step along the path. `forward` moves to the next slide in order.
    pub fn step(&mut self, forward: bool) -> Vec<Action> {
        let path: Vec<SlideId> = self.doc.slides_in_order().iter().map(|s| s.id).collect();
        let Some(first) = path.first().copied() else {
            return Vec::new();
        };
        let target = match self.doc.current_slide_id.and_then(|id| path.iter().position(|p| *p == id)) {
            None => Some(first),
            Some(i) if forward => path.get(i + 1).copied(),
            Some(i) => i.checked_sub(1).and_then(|j| path.get(j).copied()),
        };
        match target {
            Some(id) => {
                self.selection.select_only(id);
                self.set_current_slide(Some(id))
            }
            None => Vec::new(),
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !self.interaction.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Middle => {
                self.interaction = InteractionState::Panning { last_screen: screen_pt };
                return self.cursor_action("grabbing");
            }
            Button::Secondary => return Vec::new(),
            Button::Primary => {}
        }

        let canvas_pt = self.viewport.camera.screen_to_canvas(screen_pt);
        let Some(hit) = hit_test(canvas_pt, &self.doc, &self.viewport.camera) else {
            if modifiers.click_mode() == ClickMode::Single && !self.selection.is_empty() {
                self.selection.clear();
                return vec![Action::RenderNeeded];
            }
            return Vec::new();
        };
        let Some(slide) = self.doc.slide(hit.slide_id) else {
            return Vec::new();
        };
        let rect = slide.rect();

        let mut actions = match hit.part {
            HitPart::ResizeHandle(handle) => {
                self.interaction = InteractionState::Resizing {
                    id: hit.slide_id,
                    handle,
                    start_pointer: canvas_pt,
                    start: rect,
                    moved: false,
                };
                self.cursor_action(handle.cursor())
            }
            HitPart::Body => {
                let mode = modifiers.click_mode();
                if mode != ClickMode::Single {
                    let ids = self.slide_ids();
                    self.selection.click(hit.slide_id, mode, &ids);
                    return vec![Action::RenderNeeded];
                }
                self.interaction = InteractionState::Dragging {
                    id: hit.slide_id,
                    offset: Point::new(canvas_pt.x - rect.x, canvas_pt.y - rect.y),
                    start: Point::new(rect.x, rect.y),
                    moved: false,
                };
                self.cursor_action("grabbing")
            }
        };
        actions.insert(0, Action::SetTextSelection(false));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let canvas_pt = self.viewport.camera.screen_to_canvas(screen_pt);
        match self.interaction.clone() {
            InteractionState::Idle => self.hover(canvas_pt),
            InteractionState::Panning { last_screen } => {
                self.viewport.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.interaction = InteractionState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InteractionState::Dragging { id, offset, start, moved } => self.drag_to(id, offset, start, moved, canvas_pt),
            InteractionState::Resizing { id, handle, start_pointer, start, moved } => {
                let grid = self.settings.snap_options().grid;
                let next = resize_slide(start, handle, canvas_pt.x - start_pointer.x, canvas_pt.y - start_pointer.y, grid);
                let Some(slide) = self.doc.slide_mut(id) else {
                    return Vec::new();
                };
                if slide.rect() == next {
                    return Vec::new();
                }
                slide.set_rect(next);
                self.interaction = InteractionState::Resizing { id, handle, start_pointer, start, moved: moved || next != start };
                vec![Action::SlideGeometryChanged { id, patch: GeometryPatch::from_rect(next) }, Action::RenderNeeded]
            }
        }
    }

    fn drag_to(&mut self, id: SlideId, offset: Point, start: Point, moved: bool, canvas_pt: Point) -> Vec<Action> {
        let Some(rect) = self.doc.slide(id).map(Slide::rect) else {
            return Vec::new();
        };
        let siblings: Vec<Rect> = self.doc.slides.iter().filter(|s| s.id != id).map(Slide::rect).collect();
        let candidate = Point::new(canvas_pt.x - offset.x, canvas_pt.y - offset.y);
        let (pos, guides) = place_slide(rect.width, rect.height, candidate, &siblings, self.settings.snap_options());
        self.guides = guides;

        if pos.x == rect.x && pos.y == rect.y {
            return vec![Action::RenderNeeded];
        }
        if let Some(slide) = self.doc.slide_mut(id) {
            slide.x = pos.x;
            slide.y = pos.y;
        }
        self.interaction = InteractionState::Dragging { id, offset, start, moved: moved || pos != start };
        vec![Action::SlideGeometryChanged { id, patch: GeometryPatch::position(pos.x, pos.y) }, Action::RenderNeeded]
    }

    fn hover(&mut self, canvas_pt: Point) -> Vec<Action> {
        let cursor = match hit_test(canvas_pt, &self.doc, &self.viewport.camera) {
            Some(hit) => match hit.part {
                HitPart::ResizeHandle(handle) => handle.cursor(),
                HitPart::Body => "grab",
            },
            None => "default",
        };
        self.cursor_action(cursor)
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.interaction) {
            InteractionState::Idle => Vec::new(),
            InteractionState::Panning { .. } => self.cursor_action("default"),
            InteractionState::Dragging { id, moved, .. } => {
                let mut actions = self.finish(id, moved);
                if !moved {
                    self.selection.select_only(id);
                    actions.extend(self.set_current_slide(Some(id)));
                }
                actions.extend(self.cursor_action("grab"));
                actions
            }
            InteractionState::Resizing { id, moved, .. } => {
                let mut actions = self.finish(id, moved);
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// Pointer capture was lost or the window blurred. Ends the interaction without
    /// click semantics; a moved slide is still committed at its last optimistic value.
    pub fn on_capture_lost(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.interaction) {
            InteractionState::Idle => Vec::new(),
            InteractionState::Panning { .. } => self.cursor_action("default"),
            InteractionState::Dragging { id, moved, .. } | InteractionState::Resizing { id, moved, .. } => {
                let mut actions = self.finish(id, moved);
                actions.extend(self.cursor_action("default"));
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// Common drag/resize teardown: commit if anything moved, drop guides, restore
    /// text selection.
    fn finish(&mut self, id: SlideId, moved: bool) -> Vec<Action> {
        self.guides = AlignmentGuides::default();
        let mut actions = Vec::new();
        if moved {
            if let Some(rect) = self.doc.slide(id).map(Slide::rect) {
                actions.push(Action::SlideGeometryCommitted { id, patch: GeometryPatch::from_rect(rect) });
            }
        }
        actions.push(Action::SetTextSelection(true));
        actions
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let canvas_pt = self.viewport.camera.screen_to_canvas(screen_pt);
        match hit_test(canvas_pt, &self.doc, &self.viewport.camera) {
            Some(hit) if hit.part == HitPart::Body => vec![Action::EditSlideRequested { id: hit.slide_id }],
            _ => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if self.viewport.on_wheel(screen_pt, delta.dy, modifiers.command()) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            return match key.0.to_ascii_lowercase().as_str() {
                "n" => self.request_new_slide(SlideTemplate::Blank),
                "d" => self.duplicate_selection(),
                "c" => {
                    self.copy_selection();
                    Vec::new()
                }
                "x" => self.cut_selection(),
                "v" => self.paste(),
                "a" => {
                    let ids = self.slide_ids();
                    self.selection.select_all(&ids);
                    vec![Action::RenderNeeded]
                }
                "+" | "=" => self.render_if(|vp| vp.zoom_in()),
                "-" => self.render_if(|vp| vp.zoom_out()),
                "0" => self.render_if(|vp| vp.reset_zoom()),
                _ => Vec::new(),
            };
        }
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(),
            "ArrowRight" => self.step(true),
            "ArrowLeft" => self.step(false),
            "F11" => self.toggle_fullscreen(),
            "Escape" => {
                if self.interaction.is_idle() {
                    self.selection.clear();
                    vec![Action::RenderNeeded]
                } else {
                    self.on_capture_lost()
                }
            }
            _ if key.is("f") => self.fit_current(),
            _ if key.is("o") => self.overview(),
            _ => Vec::new(),
        }
    }

    fn render_if(&mut self, f: impl FnOnce(&mut ViewportController) -> bool) -> Vec<Action> {
        if f(&mut self.viewport) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn toggle_fullscreen(&mut self) -> Vec<Action> {
        self.viewport.toggle_fullscreen().map(Action::FullscreenRequested).into_iter().collect()
    }

    // --- Slide commands ---

    /// Ask the store for a new slide from `template`, centered in the viewport.
    pub fn request_new_slide(&mut self, template: SlideTemplate) -> Vec<Action> {
        let center = self.viewport.camera.screen_to_canvas(self.viewport.screen_center());
        let (w, h) = template.size();
        let origin = clamp_position(w, h, center.x - w / 2.0, center.y - h / 2.0);
        let mut new_slide = template.new_slide(origin.x, origin.y);
        new_slide.order = Some(self.doc.next_order());
        vec![Action::CreateSlideRequested(new_slide)]
    }

    /// Ids a bulk command acts on: the selection in array order, or the current slide.
    fn targets(&self) -> Vec<SlideId> {
        if self.selection.is_empty() {
            return self.doc.current_slide_id.into_iter().collect();
        }
        self.selection.ids_in(&self.slide_ids())
    }

    /// Remove the targeted slides locally and ask the store to delete them.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let ids = self.targets();
        if ids.is_empty() {
            return Vec::new();
        }
        for id in &ids {
            self.doc.remove_slide(*id);
        }
        self.selection.clear();
        vec![Action::DeleteSlidesRequested(ids), Action::RenderNeeded]
    }

    pub fn copy_selection(&mut self) {
        let ids = self.targets();
        if ids.is_empty() {
            return;
        }
        self.clipboard = ids.iter().filter_map(|id| self.doc.slide(*id)).cloned().collect();
    }

    pub fn cut_selection(&mut self) -> Vec<Action> {
        self.copy_selection();
        self.delete_selection()
    }

    /// Create copies of the clipboard offset from the originals. Repeated pastes cascade.
    pub fn paste(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut order = self.doc.next_order();
        for slide in &mut self.clipboard {
            let pos = clamp_position(slide.width, slide.height, slide.x + PASTE_OFFSET, slide.y + PASTE_OFFSET);
            slide.x = pos.x;
            slide.y = pos.y;
            let mut new_slide = NewSlide::copy_of(slide, pos.x, pos.y);
            new_slide.order = Some(order);
            order = order.saturating_add(1);
            actions.push(Action::CreateSlideRequested(new_slide));
        }
        actions
    }

    pub fn duplicate_selection(&mut self) -> Vec<Action> {
        let mut order = self.doc.next_order();
        let mut actions = Vec::new();
        for id in self.targets() {
            let Some(slide) = self.doc.slide(id) else {
                continue;
            };
            let pos = clamp_position(slide.width, slide.height, slide.x + PASTE_OFFSET, slide.y + PASTE_OFFSET);
            let mut new_slide = NewSlide::copy_of(slide, pos.x, pos.y);
            new_slide.order = Some(order);
            order = order.saturating_add(1);
            actions.push(Action::CreateSlideRequested(new_slide));
        }
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.viewport.camera
    }

    #[must_use]
    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.doc.slide(id)
    }

    #[must_use]
    pub fn clipboard_len(&self) -> usize {
        self.clipboard.len()
    }

    fn slide_ids(&self) -> Vec<SlideId> {
        self.doc.slides.iter().map(|s| s.id).collect()
    }

    fn slide_rects(&self) -> Vec<Rect> {
        self.doc.slides.iter().map(Slide::rect).collect()
    }

    fn cursor_action(&mut self, cursor: &str) -> Vec<Action> {
        if self.cursor == cursor {
            return Vec::new();
        }
        self.cursor = cursor.to_owned();
        vec![Action::SetCursor(self.cursor.clone())]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_presentation(&mut self, presentation: Presentation) -> Vec<Action> {
        self.core.load_presentation(presentation)
    }

    pub fn apply_server_state(&mut self, server: Presentation, in_flight: &HashSet<SlideId>) -> Vec<Action> {
        self.core.apply_server_state(server, in_flight)
    }

    pub fn apply_slide_created(&mut self, slide: Slide) -> Vec<Action> {
        self.core.apply_slide_created(slide)
    }

    // --- Viewport ---

    /// Resize the backing store to match the CSS size at `dpr`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((self.core.viewport.width() * self.core.dpr).round() as u32);
        self.canvas.set_height((self.core.viewport.height() * self.core.dpr).round() as u32);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_capture_lost(&mut self) -> Vec<Action> {
        self.core.on_capture_lost()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let cmds = render::build_editor_scene(&self.core);
        render::paint(&ctx, &cmds, self.core.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}

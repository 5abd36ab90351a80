//! Selection model: single, toggle and range selection over the slide list.
//!
//! Pure state plus a click reducer. Range selection works on array position in the
//! presentation's slide list, not on the `order` field.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use crate::doc::SlideId;

/// How a click modifies the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMode {
    /// Replace the selection.
    Single,
    /// Ctrl/Cmd: flip membership.
    Toggle,
    /// Shift: union the index range from the anchor.
    Range,
}

/// Selected slide ids plus the anchor for range selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: HashSet<SlideId>,
    last_selected: Option<SlideId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: SlideId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> &HashSet<SlideId> {
        &self.ids
    }

    /// Anchor used by range selection.
    #[must_use]
    pub fn last_selected(&self) -> Option<SlideId> {
        self.last_selected
    }

    /// Selected ids in the order they appear in `slides`.
    #[must_use]
    pub fn ids_in(&self, slides: &[SlideId]) -> Vec<SlideId> {
        slides.iter().copied().filter(|id| self.ids.contains(id)).collect()
    }

    /// Selection becomes `{id}`.
    pub fn select_only(&mut self, id: SlideId) {
        self.ids.clear();
        self.ids.insert(id);
        self.last_selected = Some(id);
    }

    /// Apply a click on `id`. `slides` is the presentation's slide list in array order.
    pub fn click(&mut self, id: SlideId, mode: ClickMode, slides: &[SlideId]) {
        match mode {
            ClickMode::Single => self.select_only(id),
            ClickMode::Toggle => {
                if self.ids.remove(&id) {
                    return;
                }
                self.ids.insert(id);
                self.last_selected = Some(id);
            }
            ClickMode::Range => self.range_to(id, slides),
        }
    }

    fn range_to(&mut self, id: SlideId, slides: &[SlideId]) {
        let anchor = match self.last_selected {
            Some(anchor) if !self.ids.is_empty() => anchor,
            _ => return self.select_only(id),
        };
        let (Some(a), Some(b)) = (slides.iter().position(|s| *s == anchor), slides.iter().position(|s| *s == id)) else {
            return self.select_only(id);
        };
        let (lo, hi) = (a.min(b), a.max(b));
        self.ids.extend(slides[lo..=hi].iter().copied());
    }

    /// Select every slide in `slides`; the last one becomes the anchor.
    pub fn select_all(&mut self, slides: &[SlideId]) {
        self.ids.extend(slides.iter().copied());
        self.last_selected = slides.last().copied();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.last_selected = None;
    }

    /// Drop ids that no longer exist.
    pub fn retain_existing(&mut self, slides: &[SlideId]) {
        self.ids.retain(|id| slides.contains(id));
        if self.last_selected.is_some_and(|id| !slides.contains(&id)) {
            self.last_selected = None;
        }
    }
}

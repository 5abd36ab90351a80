//! Per-slide trailing debounce for geometry writes.
//!
//! Each slide is either idle (absent) or pending with a merged patch and a
//! deadline. Scheduling again merges the patch and pushes the deadline out by the
//! window, so only the last value inside a quiet window is written.

use std::collections::HashMap;
use std::time::Duration;

use canvas::doc::{GeometryPatch, SlideId};
use tokio::time::Instant;

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

#[derive(Debug, Clone, Copy)]
struct Pending {
    patch: GeometryPatch,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: HashMap<SlideId, Pending>,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, pending: HashMap::new() }
    }

    #[must_use]
    pub fn is_pending(&self, id: SlideId) -> bool {
        self.pending.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Merge `patch` into the slide's pending write and restart its window.
    pub fn schedule(&mut self, id: SlideId, patch: GeometryPatch, now: Instant) {
        let deadline = now + self.window;
        self.pending
            .entry(id)
            .and_modify(|p| {
                p.patch.merge(&patch);
                p.deadline = deadline;
            })
            .or_insert(Pending { patch, deadline });
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every entry whose window has elapsed, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(SlideId, GeometryPatch)> {
        let mut due: Vec<(SlideId, Pending)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, p)| (*id, *p))
            .collect();
        due.sort_by_key(|(_, p)| p.deadline);
        for (id, _) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(id, p)| (id, p.patch)).collect()
    }

    /// Flush one slide now, regardless of its deadline.
    pub fn take(&mut self, id: SlideId) -> Option<GeometryPatch> {
        self.pending.remove(&id).map(|p| p.patch)
    }

    /// Flush everything (teardown).
    pub fn drain(&mut self) -> Vec<(SlideId, GeometryPatch)> {
        let mut all: Vec<(SlideId, Pending)> = self.pending.drain().collect();
        all.sort_by_key(|(_, p)| p.deadline);
        all.into_iter().map(|(id, p)| (id, p.patch)).collect()
    }
}

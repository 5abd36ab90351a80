//! Author-side sync client.
//!
//! DESIGN
//! ======
//! `AuthorSync` turns editor [`Action`]s into store calls and polls server truth.
//! Optimistic geometry edits are debounced per slide and mark the slide "in
//! flight" so a poll merged with `EngineCore::apply_server_state` keeps the local
//! geometry. A commit (pointer-up, capture lost) bypasses the debounce and clears
//! the mark once the write has finished.
//!
//! ERROR HANDLING
//! ==============
//! - Geometry writes are background writes: bounded retry, then logged. The next
//!   poll overwrites any local value the store never accepted.
//! - Current-slide and broadcast writes are fire-and-forget: one attempt, logged.
//! - Create, delete, properties and reorder are foreground: one attempt, error
//!   returned to the caller.
//! - A failed poll leaves state untouched and lengthens the next poll delay.

use std::collections::HashSet;
use std::time::Duration;

use canvas::doc::{BroadcastPatch, GeometryPatch, NewSlide, Presentation, PresentationId, PropertiesPatch, Slide, SlideId};
use canvas::engine::Action;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use crate::retry::PollBackoff;
use crate::store::{PresentationStore, StoreError};

#[cfg(test)]
#[path = "author_test.rs"]
mod author_test;

/// Results the host applies to its engine.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorEvent {
    /// Feed to `EngineCore::apply_slide_created`.
    SlideCreated(Slide),
    /// Feed to `EngineCore::apply_server_state` together with `in_flight`.
    Polled { presentation: Presentation, in_flight: HashSet<SlideId> },
    /// A foreground write failed; show it to the user.
    WriteFailed(String),
}

pub struct AuthorSync<S> {
    store: S,
    presentation_id: PresentationId,
    config: SyncConfig,
    debouncer: Debouncer,
    in_flight: HashSet<SlideId>,
    backoff: PollBackoff,
}

impl<S: PresentationStore> AuthorSync<S> {
    #[must_use]
    pub fn new(store: S, presentation_id: PresentationId, config: SyncConfig) -> Self {
        Self {
            store,
            presentation_id,
            debouncer: Debouncer::new(config.debounce),
            in_flight: HashSet::new(),
            backoff: config.author_backoff(),
            config,
        }
    }

    #[must_use]
    pub fn presentation_id(&self) -> PresentationId {
        self.presentation_id
    }

    /// Slides whose local geometry must survive the next merge.
    #[must_use]
    pub fn in_flight(&self) -> &HashSet<SlideId> {
        &self.in_flight
    }

    #[must_use]
    pub fn next_flush(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Delay before the next poll, grown by consecutive failures.
    #[must_use]
    pub fn poll_delay(&self) -> Duration {
        self.backoff.delay()
    }

    // --- Actions ---

    /// Route one engine action to the store.
    ///
    /// # Errors
    ///
    /// Returns the store error of a failed foreground write.
    pub async fn on_action(&mut self, action: Action) -> Result<Option<AuthorEvent>, StoreError> {
        match action {
            Action::SlideGeometryChanged { id, patch } => {
                self.debouncer.schedule(id, patch, Instant::now());
                self.in_flight.insert(id);
            }
            Action::SlideGeometryCommitted { id, patch } => {
                let mut merged = self.debouncer.take(id).unwrap_or_default();
                merged.merge(&patch);
                self.write_geometry(id, merged).await;
            }
            Action::CurrentSlideChanged { id } => self.set_current(id).await,
            Action::BroadcastChanged(patch) => self.set_broadcast(patch).await,
            Action::SlidePropertiesChanged { id, patch } => self.update_properties(id, patch).await?,
            Action::SlidesReordered(ids) => self.store.reorder_slides(self.presentation_id, &ids).await?,
            Action::CreateSlideRequested(new_slide) => {
                let slide = self.create_slide(new_slide).await?;
                return Ok(Some(AuthorEvent::SlideCreated(slide)));
            }
            Action::DeleteSlidesRequested(ids) => self.delete_slides(&ids).await?,
            Action::EditSlideRequested { .. }
            | Action::SetTextSelection(_)
            | Action::FullscreenRequested(_)
            | Action::SetCursor(_)
            | Action::RenderNeeded => {}
        }
        Ok(None)
    }

    async fn write_geometry(&mut self, id: SlideId, patch: GeometryPatch) {
        if !patch.is_empty() {
            let policy = self.config.write_retry();
            let (store, pid) = (&self.store, self.presentation_id);
            let result = policy.run("slide geometry", || store.update_slide_geometry(pid, id, patch)).await;
            if let Err(e) = result {
                warn!(error = %e, presentation_id = %pid, slide_id = %id, "geometry write failed; next poll wins");
            }
        }
        if !self.debouncer.is_pending(id) {
            self.in_flight.remove(&id);
        }
    }

    async fn set_current(&self, id: Option<SlideId>) {
        let pid = self.presentation_id;
        if let Err(e) = self.store.set_current_slide(pid, id).await {
            warn!(error = %e, presentation_id = %pid, "set current slide failed");
        }
    }

    async fn set_broadcast(&self, patch: BroadcastPatch) {
        let pid = self.presentation_id;
        if let Err(e) = self.store.set_broadcast_fields(pid, patch).await {
            warn!(error = %e, presentation_id = %pid, "broadcast write failed");
        }
    }

    async fn update_properties(&self, id: SlideId, patch: PropertiesPatch) -> Result<(), StoreError> {
        self.store.update_slide_properties(self.presentation_id, id, patch).await.map(|_| ())
    }

    async fn create_slide(&self, new_slide: NewSlide) -> Result<Slide, StoreError> {
        let slide = self.store.create_slide(self.presentation_id, new_slide).await?;
        info!(presentation_id = %self.presentation_id, slide_id = %slide.id, "slide created");
        Ok(slide)
    }

    /// Delete each slide, dropping any pending geometry for it. Stops at the first
    /// failure.
    async fn delete_slides(&mut self, ids: &[SlideId]) -> Result<(), StoreError> {
        for id in ids {
            self.debouncer.take(*id);
            self.in_flight.remove(id);
            self.store.delete_slide(self.presentation_id, *id).await?;
        }
        Ok(())
    }

    // --- Flush ---

    /// Write every debounced patch whose window has elapsed.
    pub async fn flush_due(&mut self, now: Instant) {
        for (id, patch) in self.debouncer.take_due(now) {
            self.write_geometry(id, patch).await;
        }
    }

    /// Write everything still pending (teardown).
    pub async fn flush_all(&mut self) {
        let pending = self.debouncer.drain();
        if !pending.is_empty() {
            debug!(count = pending.len(), "flushing pending geometry");
        }
        for (id, patch) in pending {
            self.write_geometry(id, patch).await;
        }
    }

    // --- Poll ---

    /// Fetch server truth.
    ///
    /// # Errors
    ///
    /// Returns the store error; the caller keeps its current state.
    pub async fn poll(&mut self) -> Result<Presentation, StoreError> {
        match self.store.get_presentation(self.presentation_id).await {
            Ok(presentation) => {
                self.backoff.record_success();
                Ok(presentation)
            }
            Err(e) => {
                self.backoff.record_failure();
                warn!(
                    error = %e,
                    presentation_id = %self.presentation_id,
                    failures = self.backoff.failures(),
                    "author poll failed"
                );
                Err(e)
            }
        }
    }

    // --- Driver ---

    /// Drive the client until `actions` closes, then flush everything.
    ///
    /// Polls immediately, then on the (backed-off) poll interval. Events go to
    /// `events`; the loop also stops if the receiver is gone.
    pub async fn run(mut self, mut actions: mpsc::Receiver<Action>, events: mpsc::Sender<AuthorEvent>) {
        info!(presentation_id = %self.presentation_id, "author sync started");
        let mut next_poll = Instant::now();
        loop {
            let flush_at = self.debouncer.next_deadline();
            let event = tokio::select! {
                maybe_action = actions.recv() => {
                    let Some(action) = maybe_action else {
                        break;
                    };
                    match self.on_action(action).await {
                        Ok(event) => event,
                        Err(e) => Some(AuthorEvent::WriteFailed(e.to_string())),
                    }
                }
                () = tokio::time::sleep_until(flush_at.unwrap_or(next_poll)), if flush_at.is_some() => {
                    self.flush_due(Instant::now()).await;
                    None
                }
                () = tokio::time::sleep_until(next_poll) => {
                    let polled = self.poll().await;
                    next_poll = Instant::now() + self.poll_delay();
                    polled.map(|presentation| AuthorEvent::Polled {
                        presentation,
                        in_flight: self.in_flight.clone(),
                    }).ok()
                }
            };
            if let Some(event) = event {
                if events.send(event).await.is_err() {
                    break;
                }
            }
        }
        self.flush_all().await;
        info!(presentation_id = %self.presentation_id, "author sync stopped");
    }
}

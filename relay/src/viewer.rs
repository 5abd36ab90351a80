//! Viewer-side sync client.
//!
//! DESIGN
//! ======
//! `ViewerSync` is strictly read-only: it holds a [`PresentationSource`], never a
//! store, so no viewer interaction can reach a write. Each poll replaces the local
//! copy of the presentation, feeds the broadcast fields to a [`Countdown`] and
//! re-centers the local camera when the presented slide or the viewer size changes.
//! A fixed viewer size fits slides into a letterboxed 16:9 stage. Navigation
//! (`next`, `previous`, `home`, `overview`, `recenter`) only moves the camera.
//!
//! ERROR HANDLING
//! ==============
//! A failed poll is logged and leaves the last good state on screen; the next poll
//! is pushed out by [`PollBackoff`].

use std::time::Duration;

use canvas::doc::{BackgroundType, BroadcastFields, Presentation, PresentationId, Slide, SlideId, ViewerAnimation, ViewerSize};
use canvas::render::{self, DrawCmd};
use canvas::viewport::ViewportController;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::retry::PollBackoff;
use crate::store::{PresentationSource, StoreError};

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

// =============================================================================
// COUNTDOWN
// =============================================================================

/// Local countdown derived from `viewerCountdownSeconds`.
///
/// Reseeded when the presenter publishes a new value while not presenting, and
/// forced to zero the moment `isPresenting` is seen true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    last_seen: Option<u32>,
    /// Elapsed time not yet worth a whole second.
    carry: Duration,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Feed one poll's broadcast fields.
    pub fn observe(&mut self, broadcast: &BroadcastFields) {
        let value = broadcast.viewer_countdown_seconds;
        let changed = self.last_seen != Some(value);
        self.last_seen = Some(value);
        if broadcast.is_presenting {
            self.stop();
        } else if changed {
            self.remaining = value;
            self.carry = Duration::ZERO;
        }
    }

    /// Advance by `elapsed`, dropping one second per whole second. Returns `true`
    /// when the displayed value changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.carry += elapsed;
        let whole = self.carry.as_secs();
        if whole == 0 {
            return false;
        }
        self.carry -= Duration::from_secs(whole);
        let before = self.remaining;
        self.remaining = self.remaining.saturating_sub(u32::try_from(whole).unwrap_or(u32::MAX));
        if self.remaining == 0 {
            self.carry = Duration::ZERO;
        }
        self.remaining != before
    }

    fn stop(&mut self) {
        self.remaining = 0;
        self.carry = Duration::ZERO;
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// What a viewer should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerScene {
    /// No successful poll yet.
    Loading,
    /// Nobody is presenting.
    Waiting {
        title: String,
        animation: ViewerAnimation,
        background: BackgroundType,
        /// Seconds left, while a countdown is running.
        countdown: Option<u32>,
    },
    /// The presenter is live.
    Live {
        /// `None` when the presenter has no (or a dangling) current slide.
        current: Option<Slide>,
        show_ring: bool,
        viewer_size: ViewerSize,
        background: BackgroundType,
    },
}

impl ViewerScene {
    #[must_use]
    pub fn from_presentation(doc: &Presentation, countdown: &Countdown) -> Self {
        let b = &doc.broadcast;
        if b.is_presenting {
            Self::Live {
                current: doc.current_slide().cloned(),
                show_ring: b.show_slide_ring,
                viewer_size: b.viewer_size,
                background: b.background_type,
            }
        } else {
            Self::Waiting {
                title: doc.title.clone(),
                animation: b.viewer_animation,
                background: b.background_type,
                countdown: Some(countdown.remaining()).filter(|s| *s > 0),
            }
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ViewerSync<S> {
    source: S,
    presentation_id: PresentationId,
    config: SyncConfig,
    doc: Option<Presentation>,
    viewport: ViewportController,
    countdown: Countdown,
    backoff: PollBackoff,
    /// Presented slide as of the last poll.
    presented: Option<SlideId>,
    /// Slide the viewer navigated to locally, if any.
    focus: Option<SlideId>,
}

impl<S: PresentationSource> ViewerSync<S> {
    #[must_use]
    pub fn new(source: S, presentation_id: PresentationId, config: SyncConfig) -> Self {
        Self {
            source,
            presentation_id,
            doc: None,
            viewport: ViewportController::default(),
            countdown: Countdown::new(),
            backoff: config.viewer_backoff(),
            presented: None,
            focus: None,
            config,
        }
    }

    #[must_use]
    pub fn presentation(&self) -> Option<&Presentation> {
        self.doc.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Slide the camera is following: the local focus, else the presented slide.
    #[must_use]
    pub fn focused_slide(&self) -> Option<SlideId> {
        self.focus.or(self.presented)
    }

    #[must_use]
    pub fn poll_delay(&self) -> Duration {
        self.backoff.delay()
    }

    #[must_use]
    pub fn scene(&self) -> ViewerScene {
        match &self.doc {
            Some(doc) => ViewerScene::from_presentation(doc, &self.countdown),
            None => ViewerScene::Loading,
        }
    }

    /// Display list for the current scene. `phase` drives the waiting animation.
    #[must_use]
    pub fn draw_list(&self, phase: f64) -> Vec<DrawCmd> {
        let Some(doc) = &self.doc else {
            return Vec::new();
        };
        let (w, h) = (self.viewport.width(), self.viewport.height());
        if doc.broadcast.is_presenting {
            render::build_viewer_live(doc, self.viewport.camera, w, h)
        } else {
            let countdown = Some(self.countdown.remaining()).filter(|s| *s > 0);
            render::build_viewer_waiting(&doc.broadcast, &doc.title, countdown, w, h, phase)
        }
    }

    // --- Server state ---

    /// Fetch and apply server state.
    ///
    /// # Errors
    ///
    /// Returns the store error; the last good state stays in place.
    pub async fn poll(&mut self) -> Result<(), StoreError> {
        match self.source.get_presentation(self.presentation_id).await {
            Ok(presentation) => {
                self.backoff.record_success();
                self.apply(presentation);
                Ok(())
            }
            Err(e) => {
                self.backoff.record_failure();
                warn!(
                    error = %e,
                    presentation_id = %self.presentation_id,
                    failures = self.backoff.failures(),
                    "viewer poll failed"
                );
                Err(e)
            }
        }
    }

    /// Replace local state with a poll result.
    pub fn apply(&mut self, mut presentation: Presentation) {
        presentation.sanitize();
        self.countdown.observe(&presentation.broadcast);
        let presented = presentation.current_slide_id;
        let first = self.doc.is_none();
        let changed = presented != self.presented;
        let size = presentation.broadcast.viewer_size;
        let resized = self.doc.as_ref().is_some_and(|d| d.broadcast.viewer_size != size);
        self.presented = presented;
        if let Some(focus) = self.focus {
            if presentation.slide(focus).is_none() {
                self.focus = None;
            }
        }
        self.doc = Some(presentation);
        if changed {
            debug!(presentation_id = %self.presentation_id, ?presented, "presented slide changed");
            self.focus = None;
            self.recenter();
        } else if first || resized {
            self.recenter();
        }
    }

    /// Advance the countdown. Returns `true` when the displayed value changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.countdown.tick(elapsed)
    }

    /// New viewer size in CSS pixels; re-centers on the followed slide.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
        self.recenter();
    }

    // --- Local navigation ---

    /// Center on the followed slide, or show everything when there is none. Both
    /// happen inside the stage for the presenter's `viewerSize`.
    pub fn recenter(&mut self) {
        let Some(doc) = &self.doc else {
            return;
        };
        let size = doc.broadcast.viewer_size;
        match self.focused_slide().and_then(|id| doc.slide(id)).map(Slide::rect) {
            Some(rect) => self.viewport.center_on_slide_in(rect, size),
            None => {
                self.overview();
            }
        }
    }

    /// Look at the next slide along the path.
    pub fn next(&mut self) {
        self.step(true);
    }

    /// Look at the previous slide along the path.
    pub fn previous(&mut self) {
        self.step(false);
    }

    /// Back to the slide the presenter is showing.
    pub fn home(&mut self) {
        self.focus = None;
        self.recenter();
    }

    /// Zoom out to every slide. Returns `false` when there is nothing to show.
    pub fn overview(&mut self) -> bool {
        let Some(doc) = &self.doc else {
            return false;
        };
        let rects: Vec<_> = doc.slides.iter().map(Slide::rect).collect();
        self.viewport.fit_all_in(&rects, doc.broadcast.viewer_size)
    }

    fn step(&mut self, forward: bool) {
        let Some(doc) = &self.doc else {
            return;
        };
        let path: Vec<SlideId> = doc.slides_in_order().iter().map(|s| s.id).collect();
        let target = match self.focused_slide().and_then(|id| path.iter().position(|p| *p == id)) {
            None => path.first().copied(),
            Some(i) if forward => path.get(i + 1).copied(),
            Some(i) => i.checked_sub(1).and_then(|j| path.get(j).copied()),
        };
        if let Some(id) = target {
            self.focus = Some(id);
            self.recenter();
        }
    }

    // --- Driver ---

    /// Poll and tick until every scene receiver is gone, publishing each scene
    /// change on `scenes`.
    pub async fn run(mut self, scenes: watch::Sender<ViewerScene>) {
        info!(presentation_id = %self.presentation_id, interval_ms = self.config.viewer_poll.as_millis(), "viewer sync started");
        let mut next_poll = Instant::now();
        let mut ticker = tokio::time::interval(COUNTDOWN_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();
        loop {
            tokio::select! {
                () = scenes.closed() => break,
                () = tokio::time::sleep_until(next_poll) => {
                    if self.poll().await.is_err() {
                        debug!(delay_ms = self.poll_delay().as_millis(), "viewer poll backing off");
                    }
                    next_poll = Instant::now() + self.poll_delay();
                }
                now = ticker.tick() => {
                    self.tick(now.duration_since(last_tick));
                    last_tick = now;
                }
            }
            let scene = self.scene();
            scenes.send_if_modified(|current| {
                if *current == scene {
                    return false;
                }
                *current = scene;
                true
            });
        }
        info!(presentation_id = %self.presentation_id, "viewer sync stopped");
    }
}

//! Store wrappers for sync-client tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use canvas::doc::{
    BroadcastFields, BroadcastPatch, GeometryPatch, NewSlide, Presentation, PresentationId, PropertiesPatch, Slide,
    SlideId,
};
use canvas::geometry::Rect;
use uuid::Uuid;

use crate::memory::MemoryStore;
use crate::store::{PresentationSource, PresentationStore, StoreError};

/// A call the store saw, by operation name.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

/// Wraps a `MemoryStore`, records every call and can inject transient failures.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub calls: CallLog,
    /// Number of upcoming geometry writes that fail with a transient error.
    pub geometry_failures: Arc<AtomicU32>,
    /// Number of upcoming reads that fail with a transient error.
    pub read_failures: Arc<AtomicU32>,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn inject(counter: &AtomicU32) -> Result<(), StoreError> {
        let left = counter.load(Ordering::SeqCst);
        if left > 0 {
            counter.store(left - 1, Ordering::SeqCst);
            return Err(StoreError::Http("injected".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PresentationSource for RecordingStore {
    async fn get_presentation(&self, id: PresentationId) -> Result<Presentation, StoreError> {
        self.record("get_presentation");
        Self::inject(&self.read_failures)?;
        self.inner.get_presentation(id).await
    }
}

#[async_trait::async_trait]
impl PresentationStore for RecordingStore {
    async fn update_slide_geometry(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: GeometryPatch,
    ) -> Result<Slide, StoreError> {
        self.record("update_slide_geometry");
        Self::inject(&self.geometry_failures)?;
        self.inner.update_slide_geometry(presentation_id, slide_id, patch).await
    }

    async fn update_slide_properties(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: PropertiesPatch,
    ) -> Result<Slide, StoreError> {
        self.record("update_slide_properties");
        self.inner.update_slide_properties(presentation_id, slide_id, patch).await
    }

    async fn create_slide(&self, presentation_id: PresentationId, slide: NewSlide) -> Result<Slide, StoreError> {
        self.record("create_slide");
        self.inner.create_slide(presentation_id, slide).await
    }

    async fn delete_slide(&self, presentation_id: PresentationId, slide_id: SlideId) -> Result<(), StoreError> {
        self.record("delete_slide");
        self.inner.delete_slide(presentation_id, slide_id).await
    }

    async fn reorder_slides(&self, presentation_id: PresentationId, slide_ids: &[SlideId]) -> Result<(), StoreError> {
        self.record("reorder_slides");
        self.inner.reorder_slides(presentation_id, slide_ids).await
    }

    async fn set_current_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: Option<SlideId>,
    ) -> Result<(), StoreError> {
        self.record("set_current_slide");
        self.inner.set_current_slide(presentation_id, slide_id).await
    }

    async fn set_broadcast_fields(
        &self,
        presentation_id: PresentationId,
        patch: BroadcastPatch,
    ) -> Result<BroadcastFields, StoreError> {
        self.record("set_broadcast_fields");
        self.inner.set_broadcast_fields(presentation_id, patch).await
    }
}

/// Seed a presentation with slides at the given rectangles; returns its id and the
/// slide ids in the same order.
pub async fn seed(store: &MemoryStore, rects: &[Rect]) -> (PresentationId, Vec<SlideId>) {
    let id = Uuid::new_v4();
    store.insert(Presentation::new(id, "Sunday Service")).await;
    let mut ids = Vec::new();
    for rect in rects {
        ids.push(store.create_slide(id, NewSlide::at(*rect)).await.unwrap().id);
    }
    (id, ids)
}

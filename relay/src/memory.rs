//! In-memory store.
//!
//! Same semantics as the service: geometry is clamped on write, deleting the
//! current slide clears the pointer, reorder rewrites `order` by position and new
//! slides without an explicit order go to the end of the path. Reads return slides
//! in path order. Used as the service
//! fallback when no database is configured, and as the store in sync-client tests.

use std::collections::HashMap;
use std::sync::Arc;

use canvas::doc::{
    BroadcastFields, BroadcastPatch, GeometryPatch, NewPresentation, NewSlide, Presentation, PresentationId,
    PresentationSummary, PropertiesPatch, Slide, SlideId,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{PresentationCatalog, PresentationSource, PresentationStore, StoreError};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// Presentations keyed by id behind a shared lock. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    presentations: Arc<RwLock<HashMap<PresentationId, Presentation>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a presentation. It is sanitized on the way in.
    pub async fn insert(&self, mut presentation: Presentation) {
        presentation.sanitize();
        self.presentations.write().await.insert(presentation.id, presentation);
    }

    /// Run `f` against one presentation under the write lock.
    async fn with_presentation<T>(
        &self,
        id: PresentationId,
        f: impl FnOnce(&mut Presentation) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut presentations = self.presentations.write().await;
        let presentation = presentations.get_mut(&id).ok_or_else(|| StoreError::presentation_not_found(id))?;
        f(presentation)
    }

    async fn with_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        f: impl FnOnce(&mut Slide),
    ) -> Result<Slide, StoreError> {
        self.with_presentation(presentation_id, |p| {
            let slide = p.slide_mut(slide_id).ok_or_else(|| StoreError::slide_not_found(slide_id))?;
            f(slide);
            Ok(slide.clone())
        })
        .await
    }
}

#[async_trait::async_trait]
impl PresentationSource for MemoryStore {
    /// Slides come back sorted by `order`, ties in insertion order, matching the
    /// database's `ORDER BY slide_order, created_at`.
    async fn get_presentation(&self, id: PresentationId) -> Result<Presentation, StoreError> {
        let presentations = self.presentations.read().await;
        let mut presentation =
            presentations.get(&id).cloned().ok_or_else(|| StoreError::presentation_not_found(id))?;
        presentation.slides.sort_by_key(|s| s.order);
        Ok(presentation)
    }
}

#[async_trait::async_trait]
impl PresentationStore for MemoryStore {
    async fn update_slide_geometry(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: GeometryPatch,
    ) -> Result<Slide, StoreError> {
        self.with_slide(presentation_id, slide_id, |s| s.apply_geometry(&patch)).await
    }

    async fn update_slide_properties(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: PropertiesPatch,
    ) -> Result<Slide, StoreError> {
        self.with_slide(presentation_id, slide_id, |s| s.apply_properties(&patch)).await
    }

    async fn create_slide(&self, presentation_id: PresentationId, slide: NewSlide) -> Result<Slide, StoreError> {
        self.with_presentation(presentation_id, |p| {
            let created = slide.into_slide(Uuid::new_v4(), p.next_order());
            p.slides.push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn delete_slide(&self, presentation_id: PresentationId, slide_id: SlideId) -> Result<(), StoreError> {
        self.with_presentation(presentation_id, |p| {
            p.remove_slide(slide_id).map(|_| ()).ok_or_else(|| StoreError::slide_not_found(slide_id))
        })
        .await
    }

    async fn reorder_slides(&self, presentation_id: PresentationId, slide_ids: &[SlideId]) -> Result<(), StoreError> {
        self.with_presentation(presentation_id, |p| {
            p.reorder(slide_ids);
            Ok(())
        })
        .await
    }

    async fn set_current_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: Option<SlideId>,
    ) -> Result<(), StoreError> {
        self.with_presentation(presentation_id, |p| {
            if let Some(id) = slide_id {
                if p.slide(id).is_none() {
                    return Err(StoreError::slide_not_found(id));
                }
            }
            p.current_slide_id = slide_id;
            Ok(())
        })
        .await
    }

    async fn set_broadcast_fields(
        &self,
        presentation_id: PresentationId,
        patch: BroadcastPatch,
    ) -> Result<BroadcastFields, StoreError> {
        self.with_presentation(presentation_id, |p| {
            p.broadcast.apply(&patch);
            Ok(p.broadcast.clone())
        })
        .await
    }
}

#[async_trait::async_trait]
impl PresentationCatalog for MemoryStore {
    async fn create_presentation(&self, presentation: NewPresentation) -> Result<Presentation, StoreError> {
        let mut created = Presentation::new(Uuid::new_v4(), presentation.title);
        created.description = presentation.description;
        self.presentations.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    /// Summaries sorted by title, then id.
    async fn list_presentations(&self) -> Result<Vec<PresentationSummary>, StoreError> {
        let presentations = self.presentations.read().await;
        let mut out: Vec<PresentationSummary> = presentations.values().map(PresentationSummary::from).collect();
        out.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(out)
    }
}

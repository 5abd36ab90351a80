//! Store contract shared by the sync clients, the service and the CLI.
//!
//! DESIGN
//! ======
//! Reads and writes are split into separate traits. The viewer is generic over
//! [`PresentationSource`] only, so a viewer cannot express a write. The author
//! needs the full [`PresentationStore`]. Listing and creating presentations
//! ([`PresentationCatalog`]) is only used by the service and the CLI.

use std::sync::Arc;

use canvas::doc::{
    BroadcastFields, BroadcastPatch, GeometryPatch, NewPresentation, NewSlide, Presentation, PresentationId,
    PresentationSummary, PropertiesPatch, Slide, SlideId,
};

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The presentation or slide does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request never produced a response (connect, timeout, reset).
    #[error("request failed: {0}")]
    Http(String),

    /// The store answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The backing storage failed.
    #[error("storage error: {0}")]
    Backend(String),
}

impl StoreError {
    #[must_use]
    pub fn presentation_not_found(id: PresentationId) -> Self {
        Self::NotFound(format!("presentation {id}"))
    }

    #[must_use]
    pub fn slide_not_found(id: SlideId) -> Self {
        Self::NotFound(format!("slide {id}"))
    }

    /// Whether a retry might succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { status: 408 | 429 | 500..=599, .. })
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Read side: everything a viewer may do.
#[async_trait::async_trait]
pub trait PresentationSource: Send + Sync {
    async fn get_presentation(&self, id: PresentationId) -> Result<Presentation, StoreError>;
}

/// Write side used by the author. Geometry is clamped by the store on write.
#[async_trait::async_trait]
pub trait PresentationStore: PresentationSource {
    async fn update_slide_geometry(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: GeometryPatch,
    ) -> Result<Slide, StoreError>;

    async fn update_slide_properties(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: PropertiesPatch,
    ) -> Result<Slide, StoreError>;

    async fn create_slide(&self, presentation_id: PresentationId, slide: NewSlide) -> Result<Slide, StoreError>;

    /// Delete a slide. Clears the presentation's current slide if it pointed here.
    async fn delete_slide(&self, presentation_id: PresentationId, slide_id: SlideId) -> Result<(), StoreError>;

    /// Rewrite `order` so listed slides follow the given sequence.
    async fn reorder_slides(&self, presentation_id: PresentationId, slide_ids: &[SlideId]) -> Result<(), StoreError>;

    async fn set_current_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: Option<SlideId>,
    ) -> Result<(), StoreError>;

    async fn set_broadcast_fields(
        &self,
        presentation_id: PresentationId,
        patch: BroadcastPatch,
    ) -> Result<BroadcastFields, StoreError>;
}

/// Presentation-level operations outside the editor.
#[async_trait::async_trait]
pub trait PresentationCatalog: Send + Sync {
    async fn create_presentation(&self, presentation: NewPresentation) -> Result<Presentation, StoreError>;

    async fn list_presentations(&self) -> Result<Vec<PresentationSummary>, StoreError>;
}

// =============================================================================
// SHARED HANDLES
// =============================================================================

#[async_trait::async_trait]
impl<T: PresentationSource + ?Sized> PresentationSource for Arc<T> {
    async fn get_presentation(&self, id: PresentationId) -> Result<Presentation, StoreError> {
        (**self).get_presentation(id).await
    }
}

#[async_trait::async_trait]
impl<T: PresentationStore + ?Sized> PresentationStore for Arc<T> {
    async fn update_slide_geometry(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: GeometryPatch,
    ) -> Result<Slide, StoreError> {
        (**self).update_slide_geometry(presentation_id, slide_id, patch).await
    }

    async fn update_slide_properties(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: PropertiesPatch,
    ) -> Result<Slide, StoreError> {
        (**self).update_slide_properties(presentation_id, slide_id, patch).await
    }

    async fn create_slide(&self, presentation_id: PresentationId, slide: NewSlide) -> Result<Slide, StoreError> {
        (**self).create_slide(presentation_id, slide).await
    }

    async fn delete_slide(&self, presentation_id: PresentationId, slide_id: SlideId) -> Result<(), StoreError> {
        (**self).delete_slide(presentation_id, slide_id).await
    }

    async fn reorder_slides(&self, presentation_id: PresentationId, slide_ids: &[SlideId]) -> Result<(), StoreError> {
        (**self).reorder_slides(presentation_id, slide_ids).await
    }

    async fn set_current_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: Option<SlideId>,
    ) -> Result<(), StoreError> {
        (**self).set_current_slide(presentation_id, slide_id).await
    }

    async fn set_broadcast_fields(
        &self,
        presentation_id: PresentationId,
        patch: BroadcastPatch,
    ) -> Result<BroadcastFields, StoreError> {
        (**self).set_broadcast_fields(presentation_id, patch).await
    }
}

#[async_trait::async_trait]
impl<T: PresentationCatalog + ?Sized> PresentationCatalog for Arc<T> {
    async fn create_presentation(&self, presentation: NewPresentation) -> Result<Presentation, StoreError> {
        (**self).create_presentation(presentation).await
    }

    async fn list_presentations(&self) -> Result<Vec<PresentationSummary>, StoreError> {
        (**self).list_presentations().await
    }
}

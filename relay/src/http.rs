//! REST client for the slidecast service.
//!
//! Thin reqwest wrapper over the `/api/presentations` routes. Status handling is
//! pure (`decode`) so it can be tested without a server.

use std::time::Duration;

use canvas::doc::{
    BroadcastFields, BroadcastPatch, GeometryPatch, NewPresentation, NewSlide, Presentation, PresentationId,
    PresentationSummary, PropertiesPatch, Slide, SlideId,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::store::{PresentationCatalog, PresentationSource, PresentationStore, StoreError};

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `PUT /api/presentations/{id}/current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSlideBody {
    pub slide_id: Option<SlideId>,
}

/// Body of `PUT /api/presentations/{id}/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBody {
    pub slide_ids: Vec<SlideId>,
}

/// Error body returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Client for the service at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/presentations{path}", self.base_url)
    }

    fn slide_url(&self, presentation_id: PresentationId, slide_id: SlideId) -> String {
        self.url(&format!("/{presentation_id}/slides/{slide_id}"))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(StatusCode, String), StoreError> {
        let response = request.send().await.map_err(|e| StoreError::Http(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| StoreError::Http(e.to_string()))?;
        Ok((status, text))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, StoreError> {
        let (status, text) = self.send(request).await?;
        check_status(status, &text)?;
        decode(&text)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(), StoreError> {
        let (status, text) = self.send(request).await?;
        check_status(status, &text)
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

/// Map a non-success status to a store error. 404 carries the service's message.
pub(crate) fn check_status(status: StatusCode, body: &str) -> Result<(), StoreError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        let message = serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.to_owned(), |b| b.error);
        return Err(StoreError::NotFound(message));
    }
    Err(StoreError::Status { status: status.as_u16(), body: body.to_owned() })
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

// =============================================================================
// STORE IMPLEMENTATIONS
// =============================================================================

#[async_trait::async_trait]
impl PresentationSource for HttpStore {
    async fn get_presentation(&self, id: PresentationId) -> Result<Presentation, StoreError> {
        self.fetch(self.http.get(self.url(&format!("/{id}")))).await
    }
}

#[async_trait::async_trait]
impl PresentationStore for HttpStore {
    async fn update_slide_geometry(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: GeometryPatch,
    ) -> Result<Slide, StoreError> {
        let url = format!("{}/geometry", self.slide_url(presentation_id, slide_id));
        self.fetch(self.http.patch(url).json(&patch)).await
    }

    async fn update_slide_properties(
        &self,
        presentation_id: PresentationId,
        slide_id: SlideId,
        patch: PropertiesPatch,
    ) -> Result<Slide, StoreError> {
        self.fetch(self.http.patch(self.slide_url(presentation_id, slide_id)).json(&patch)).await
    }

    async fn create_slide(&self, presentation_id: PresentationId, slide: NewSlide) -> Result<Slide, StoreError> {
        let url = self.url(&format!("/{presentation_id}/slides"));
        self.fetch(self.http.post(url).json(&slide)).await
    }

    async fn delete_slide(&self, presentation_id: PresentationId, slide_id: SlideId) -> Result<(), StoreError> {
        self.execute(self.http.delete(self.slide_url(presentation_id, slide_id))).await
    }

    async fn reorder_slides(&self, presentation_id: PresentationId, slide_ids: &[SlideId]) -> Result<(), StoreError> {
        let body = ReorderBody { slide_ids: slide_ids.to_vec() };
        self.execute(self.http.put(self.url(&format!("/{presentation_id}/order"))).json(&body)).await
    }

    async fn set_current_slide(
        &self,
        presentation_id: PresentationId,
        slide_id: Option<SlideId>,
    ) -> Result<(), StoreError> {
        let body = CurrentSlideBody { slide_id };
        self.execute(self.http.put(self.url(&format!("/{presentation_id}/current"))).json(&body)).await
    }

    async fn set_broadcast_fields(
        &self,
        presentation_id: PresentationId,
        patch: BroadcastPatch,
    ) -> Result<BroadcastFields, StoreError> {
        self.fetch(self.http.patch(self.url(&format!("/{presentation_id}/broadcast"))).json(&patch)).await
    }
}

#[async_trait::async_trait]
impl PresentationCatalog for HttpStore {
    async fn create_presentation(&self, presentation: NewPresentation) -> Result<Presentation, StoreError> {
        self.fetch(self.http.post(self.url("")).json(&presentation)).await
    }

    async fn list_presentations(&self) -> Result<Vec<PresentationSummary>, StoreError> {
        self.fetch(self.http.get(self.url(""))).await
    }
}

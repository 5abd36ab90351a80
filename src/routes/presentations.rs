//! Presentation and slide REST routes.
//!
//! Every handler is a thin shim over the backend in [`AppState`]. Bodies use the
//! camelCase wire types from `canvas::doc`; errors are `{ "error": "..." }`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use canvas::doc::{
    BroadcastFields, BroadcastPatch, GeometryPatch, NewPresentation, NewSlide, Presentation, PresentationId,
    PresentationSummary, PropertiesPatch, Slide, SlideId,
};
use relay::http::{CurrentSlideBody, ErrorBody, ReorderBody};
use relay::store::{PresentationCatalog, PresentationSource, PresentationStore, StoreError};
use tracing::{info, warn};

use crate::state::AppState;

#[cfg(test)]
#[path = "presentations_test.rs"]
mod presentations_test;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Names the missing presentation or slide.
    #[error("{0}")]
    NotFound(String),
    #[error("invalid request body: {0}")]
    BadRequest(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(what),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub(crate) fn service_error_to_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = service_error_to_status(&self);
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

type ApiResult<T> = Result<T, ServiceError>;

// =============================================================================
// PRESENTATIONS
// =============================================================================

/// `GET /api/presentations`: list presentations.
pub async fn list_presentations(State(state): State<AppState>) -> ApiResult<Json<Vec<PresentationSummary>>> {
    Ok(Json(state.store.list_presentations().await?))
}

/// `POST /api/presentations`: create an empty presentation.
pub async fn create_presentation(
    State(state): State<AppState>,
    body: Result<Json<NewPresentation>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Presentation>)> {
    let Json(body) = body?;
    let created = state.store.create_presentation(body).await?;
    info!(presentation_id = %created.id, "presentation created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/presentations/{id}`: presentation with its slides.
pub async fn get_presentation(
    State(state): State<AppState>,
    Path(id): Path<PresentationId>,
) -> ApiResult<Json<Presentation>> {
    Ok(Json(state.store.get_presentation(id).await?))
}

/// `PUT /api/presentations/{id}/current`: set or clear the presented slide.
pub async fn set_current_slide(
    State(state): State<AppState>,
    Path(id): Path<PresentationId>,
    body: Result<Json<CurrentSlideBody>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = body?;
    state.store.set_current_slide(id, body.slide_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /api/presentations/{id}/broadcast`: update broadcast fields.
pub async fn set_broadcast_fields(
    State(state): State<AppState>,
    Path(id): Path<PresentationId>,
    body: Result<Json<BroadcastPatch>, JsonRejection>,
) -> ApiResult<Json<BroadcastFields>> {
    let Json(patch) = body?;
    let fields = state.store.set_broadcast_fields(id, patch).await?;
    if patch.is_presenting.is_some() {
        info!(presentation_id = %id, is_presenting = fields.is_presenting, "presenting toggled");
    }
    Ok(Json(fields))
}

/// `PUT /api/presentations/{id}/order`: rewrite the path order.
pub async fn reorder_slides(
    State(state): State<AppState>,
    Path(id): Path<PresentationId>,
    body: Result<Json<ReorderBody>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = body?;
    state.store.reorder_slides(id, &body.slide_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// SLIDES
// =============================================================================

/// `POST /api/presentations/{id}/slides`: create a slide.
pub async fn create_slide(
    State(state): State<AppState>,
    Path(id): Path<PresentationId>,
    body: Result<Json<NewSlide>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Slide>)> {
    let Json(body) = body?;
    let slide = state.store.create_slide(id, body).await?;
    Ok((StatusCode::CREATED, Json(slide)))
}

/// `PATCH /api/presentations/{id}/slides/{slide_id}`: edit-form properties.
pub async fn update_slide_properties(
    State(state): State<AppState>,
    Path((id, slide_id)): Path<(PresentationId, SlideId)>,
    body: Result<Json<PropertiesPatch>, JsonRejection>,
) -> ApiResult<Json<Slide>> {
    let Json(patch) = body?;
    Ok(Json(state.store.update_slide_properties(id, slide_id, patch).await?))
}

/// `PATCH /api/presentations/{id}/slides/{slide_id}/geometry`: move or resize.
pub async fn update_slide_geometry(
    State(state): State<AppState>,
    Path((id, slide_id)): Path<(PresentationId, SlideId)>,
    body: Result<Json<GeometryPatch>, JsonRejection>,
) -> ApiResult<Json<Slide>> {
    let Json(patch) = body?;
    Ok(Json(state.store.update_slide_geometry(id, slide_id, patch).await?))
}

/// `DELETE /api/presentations/{id}/slides/{slide_id}`: delete a slide.
pub async fn delete_slide(
    State(state): State<AppState>,
    Path((id, slide_id)): Path<(PresentationId, SlideId)>,
) -> ApiResult<StatusCode> {
    state.store.delete_slide(id, slide_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

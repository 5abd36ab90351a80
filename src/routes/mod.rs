//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the presentation REST surface that both sync clients poll and write
//! through, plus a health probe. CORS is open so browser hosts on other origins
//! can reach the API; every request is traced.

pub mod presentations;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/presentations",
            get(presentations::list_presentations).post(presentations::create_presentation),
        )
        .route("/api/presentations/{id}", get(presentations::get_presentation))
        .route("/api/presentations/{id}/current", put(presentations::set_current_slide))
        .route("/api/presentations/{id}/broadcast", patch(presentations::set_broadcast_fields))
        .route("/api/presentations/{id}/order", put(presentations::reorder_slides))
        .route("/api/presentations/{id}/slides", post(presentations::create_slide))
        .route(
            "/api/presentations/{id}/slides/{slide_id}",
            patch(presentations::update_slide_properties).delete(presentations::delete_slide),
        )
        .route(
            "/api/presentations/{id}/slides/{slide_id}/geometry",
            patch(presentations::update_slide_geometry),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "backend": state.backend }))
}

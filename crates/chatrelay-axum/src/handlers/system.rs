//! Landing, health and favicon handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::{HealthResponse, StatusResponse};
use crate::state::AppState;

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: state.config.title.clone(),
        status: "running".to_string(),
    })
}

/// GET /health
///
/// Never exposes more than the first 8 characters of the key.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        model: state.config.model.clone(),
        key: state.config.api_key.redacted(),
    })
}

/// GET /favicon.ico
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

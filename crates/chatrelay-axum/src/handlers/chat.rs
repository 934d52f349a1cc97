//! Chat relay handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use chatrelay_core::{ChatReply, IncomingRequest, compose_with_system};
use tracing::{debug, info};

use crate::error::HttpError;
use crate::state::AppState;

/// Relay a chat message to the completion provider.
///
/// POST /api/chat
///
/// The body is parsed leniently: malformed JSON or a missing `message`
/// yields `400 message is required`, and unusable history entries are
/// dropped. Validation happens before any network activity. A body that
/// cannot be buffered (over the size limit) keeps axum's status but is
/// rendered as `{"error": ...}`.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatReply>, HttpError> {
    let body = body.map_err(|rejection| {
        debug!("Rejected chat body: {rejection}");
        HttpError::from(rejection)
    })?;
    let request = IncomingRequest::from_json_slice(&body);
    let history_len = request.history.len();

    let prompt = compose_with_system(
        &request.message,
        request.history,
        &state.config.system_prompt,
    )
    .inspect_err(|e| debug!("Rejected chat request: {e}"))?;

    info!(
        model = %state.completions.model(),
        history = history_len,
        turns = prompt.len(),
        "Relaying chat message"
    );

    let reply = state.completions.complete(&prompt).await?;
    Ok(Json(reply))
}

/// Any method other than POST on a chat route.
pub async fn method_not_allowed() -> HttpError {
    HttpError::Rejected {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "method not allowed".to_string(),
    }
}

//! Axum-specific error types and mappings.
//!
//! This module maps core errors to HTTP status codes and the relay's
//! `{"error": "..."}` response body.

use std::any::Any;

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chatrelay_core::ports::INTERNAL_MESSAGE;
use chatrelay_core::{RelayError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
///
/// Every variant carries the client-facing message only; detail has already
/// been logged by the time one of these is built.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request was refused before reaching a handler body (size limit, method).
    #[error("Rejected {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    /// The completion provider answered with an error status.
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Service unavailable (provider unreachable).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Provider did not answer in time.
    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl HttpError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg)
            | Self::ServiceUnavailable(msg)
            | Self::GatewayTimeout(msg)
            | Self::Internal(msg)
            | Self::Rejected { message: msg, .. }
            | Self::Upstream { message: msg, .. } => msg,
        };

        (status, axum::Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ValidationError> for HttpError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<BytesRejection> for HttpError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<RelayError> for HttpError {
    fn from(err: RelayError) -> Self {
        let message = err.client_message().to_string();
        match err {
            RelayError::Provider { status, .. } => Self::Upstream { status, message },
            RelayError::Timeout { .. } => Self::GatewayTimeout(message),
            RelayError::Transport { .. } => Self::ServiceUnavailable(message),
            RelayError::Internal { .. } => Self::Internal(message),
        }
    }
}

/// Response for a handler that panicked. Used with `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(panic = %detail, "Request handler panicked");
    HttpError::Internal(INTERNAL_MESSAGE.to_string()).into_response()
}

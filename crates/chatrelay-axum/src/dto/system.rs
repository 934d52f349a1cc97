//! System endpoint DTOs.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub model: String,
    /// First 8 characters of the provider key followed by `...`.
    pub key: String,
}

/// Body of `GET /` when no static front-end is configured.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

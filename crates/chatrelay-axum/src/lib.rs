//! Axum web server for chatrelay.
//!
//! Exposes the relay over HTTP:
//!
//! - `GET /` - static landing page, or a status payload
//! - `GET /health` - model id and redacted key
//! - `POST /api/chat` - compose, forward, normalize
//!
//! The binary (`chatrelay`) loads configuration and calls [`start_server`].

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AppContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;

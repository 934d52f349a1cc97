//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin: they parse, delegate to the core composer and the
//! completion port, and map errors through [`crate::error::HttpError`].

pub mod chat;
pub mod system;

//! Core domain types and port definitions for chatrelay.
//!
//! This crate holds everything the relay knows without touching the network:
//! the chat turn model, the message composer, configuration and the error
//! taxonomy. Adapters (`chatrelay-provider`, `chatrelay-axum`) depend on it,
//! never the other way around.

pub mod composer;
pub mod config;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use composer::{DEFAULT_SYSTEM_PROMPT, compose, compose_with_system};
pub use config::{ApiKey, ConfigError, DEFAULT_ENDPOINT, DEFAULT_MODEL, RelayConfig};
pub use domain::{ChatReply, ChatTurn, HistoryEntry, IncomingRequest, OutgoingPrompt, Role};
pub use ports::{CompletionPort, RelayError, RelayResult, ValidationError};

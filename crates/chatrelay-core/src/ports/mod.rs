//! Port definitions and the error taxonomy they share.
//!
//! Ports are the seams between the core and its adapters. The only outbound
//! port is [`CompletionPort`]; its errors are [`RelayError`], which carries
//! both a stable client-facing view and the server-side detail for logs.

mod completion;

pub use completion::{CompletionPort, RelayResult};

use thiserror::Error;

/// Client-facing text for a timed out completion request.
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";

/// Client-facing text for any other transport failure.
pub const TRANSPORT_MESSAGE: &str = "Failed to reach the completion service.";

/// Client-facing text for unexpected faults.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Bad client input. Raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The message was missing or blank after trimming.
    #[error("message is required")]
    MessageRequired,
}

impl ValidationError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }
}

/// Failure of a completion call.
///
/// `Display` includes the underlying detail and is meant for logs only.
/// Use [`RelayError::client_message`] for anything returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The provider answered with a non-success status.
    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider did not answer within the configured timeout.
    #[error("Completion request timed out: {detail}")]
    Timeout { detail: String },

    /// The provider could not be reached (DNS, connect, TLS, ...).
    #[error("Completion service unreachable: {detail}")]
    Transport { detail: String },

    /// Anything not anticipated above.
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl RelayError {
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::Timeout {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// HTTP status code returned to the client.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Provider { status, .. } => *status,
            Self::Timeout { .. } => 504,
            Self::Transport { .. } => 503,
            Self::Internal { .. } => 500,
        }
    }

    /// Message returned to the client. Never includes transport or internal detail.
    #[must_use]
    pub fn client_message(&self) -> &str {
        match self {
            Self::Provider { message, .. } => message,
            Self::Timeout { .. } => TIMEOUT_MESSAGE,
            Self::Transport { .. } => TRANSPORT_MESSAGE,
            Self::Internal { .. } => INTERNAL_MESSAGE,
        }
    }
}

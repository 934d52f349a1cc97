//! Transport-level errors.
//!
//! These errors are internal to the HTTP backend and are mapped to
//! [`RelayError`] at the gateway boundary.

use chatrelay_core::RelayError;
use thiserror::Error;

/// Failure to obtain any response from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection, DNS or TLS failure.
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    /// The status arrived but the body could not be read.
    #[error("failed to read provider response: {0}")]
    Body(String),

    /// The outbound request could not be built (bad header value, bad URL).
    #[error("invalid outbound request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}

impl From<TransportError> for RelayError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(detail) => Self::timeout(detail),
            TransportError::Unreachable(detail) => Self::transport(detail),
            TransportError::Body(detail) | TransportError::InvalidRequest(detail) => {
                Self::internal(detail)
            }
        }
    }
}

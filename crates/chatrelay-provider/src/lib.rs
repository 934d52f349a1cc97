//! Completion gateway for chatrelay.
//!
//! Sends a composed prompt to an OpenRouter-compatible `/chat/completions`
//! endpoint and normalizes whatever comes back into a
//! [`chatrelay_core::RelayResult`].
//!
//! # Structure
//!
//! - `gateway` - [`CompletionGateway`], the [`chatrelay_core::CompletionPort`] implementation
//! - `http` - the HTTP backend seam and its reqwest implementation
//! - `normalize` - reply extraction, error message extraction and the remap table
//! - `wire` - provider request/response bodies

mod error;
mod gateway;
mod http;
pub mod normalize;
mod wire;

pub use error::TransportError;
pub use gateway::CompletionGateway;
pub use http::{HttpBackend, ReqwestBackend, UpstreamRequest, UpstreamResponse};
pub use normalize::{
    FALLBACK_REPLY, INVALID_CREDENTIALS_MESSAGE, PROVIDER_ERROR_REMAPS, QUOTA_EXHAUSTED_MESSAGE,
    RemapRule,
};

//! HTTP backend abstraction for the completion provider.
//!
//! The gateway talks to the network only through [`HttpBackend`], which
//! keeps normalization testable against canned responses. The production
//! implementation uses reqwest with a client-wide timeout and makes exactly
//! one attempt per request.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

/// A fully prepared outbound request.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

/// Status and raw body of whatever the provider answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Trait for backends that can POST a JSON body and return the raw answer.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send the request once. Any status code is a successful transport.
    async fn post(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}

/// Production backend using a pooled reqwest client.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend whose requests (connect + body) are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .user_agent(concat!("chatrelay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        Ok(UpstreamResponse {
            status,
            body: body.to_vec(),
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

//! The completion gateway.

use async_trait::async_trait;
use chatrelay_core::{
    ChatReply, CompletionPort, OutgoingPrompt, RelayConfig, RelayError, RelayResult,
};
use tracing::{debug, error, warn};

use crate::http::{HttpBackend, ReqwestBackend, UpstreamRequest};
use crate::normalize::{provider_error, reply_or_fallback};
use crate::wire::CompletionRequest;

/// Sends prompts to the configured completion endpoint.
///
/// Built once at startup from the immutable [`RelayConfig`]; shared across
/// all requests without locking.
pub struct CompletionGateway<B = ReqwestBackend> {
    backend: B,
    endpoint: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    headers: Vec<(&'static str, String)>,
}

impl CompletionGateway<ReqwestBackend> {
    /// Create a gateway backed by reqwest, using the configured timeout.
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let backend = ReqwestBackend::new(config.timeout)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: HttpBackend> CompletionGateway<B> {
    /// Create a gateway over any [`HttpBackend`].
    pub fn with_backend(config: &RelayConfig, backend: B) -> Self {
        let mut headers = vec![
            (
                "Authorization",
                format!("Bearer {}", config.api_key.expose()),
            ),
            ("Content-Type", "application/json".to_string()),
            ("X-Title", config.title.clone()),
        ];
        if let Some(origin) = config.origin.as_deref().filter(|o| *o != "*") {
            headers.push(("HTTP-Referer", origin.to_string()));
        }

        Self {
            backend,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            headers,
        }
    }

    fn build_request(&self, prompt: &OutgoingPrompt) -> Result<UpstreamRequest, RelayError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let body = serde_json::to_vec(&body).map_err(|e| {
            error!(error = %e, "Failed to serialize completion request");
            RelayError::internal(format!("request serialization failed: {e}"))
        })?;

        Ok(UpstreamRequest {
            url: self.endpoint.clone(),
            headers: self.headers.clone(),
            body,
        })
    }
}

#[async_trait]
impl<B: HttpBackend> CompletionPort for CompletionGateway<B> {
    async fn complete(&self, prompt: &OutgoingPrompt) -> RelayResult {
        let request = self.build_request(prompt)?;

        debug!(
            model = %self.model,
            turns = prompt.len(),
            "Sending completion request"
        );

        let response = self.backend.post(request).await.map_err(|e| {
            error!(error = %e, endpoint = %self.endpoint, "Completion transport failure");
            RelayError::from(e)
        })?;

        if response.is_success() {
            debug!(status = response.status, "Completion succeeded");
            return Ok(ChatReply::new(reply_or_fallback(&response.body)));
        }

        let err = provider_error(response.status, &response.body);
        warn!(
            status = response.status,
            upstream = %String::from_utf8_lossy(&response.body),
            "Completion provider returned an error"
        );
        Err(err)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

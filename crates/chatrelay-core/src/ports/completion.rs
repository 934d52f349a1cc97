//! Outbound completion port.

use async_trait::async_trait;

use super::RelayError;
use crate::domain::{ChatReply, OutgoingPrompt};

/// Outcome of one relay exchange.
pub type RelayResult = Result<ChatReply, RelayError>;

/// Something that can turn a composed prompt into a reply.
///
/// Implementations make a single attempt and must map every failure to a
/// [`RelayError`]; they never panic on provider input.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Send the prompt and wait for the reply.
    async fn complete(&self, prompt: &OutgoingPrompt) -> RelayResult;

    /// Model identifier requests are sent with.
    fn model(&self) -> &str;
}

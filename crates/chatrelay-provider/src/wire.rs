//! Provider request/response bodies (OpenAI chat completions shape).

use chatrelay_core::OutgoingPrompt;
use serde::{Deserialize, Serialize};

/// Body of the outbound `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a OutgoingPrompt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Success body. Every field is optional so partial bodies still parse.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if present and non-empty.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|c| !c.trim().is_empty())
    }
}

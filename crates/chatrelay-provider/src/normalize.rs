//! Response and error normalization.
//!
//! Provider responses come in many shapes. Everything here is a pure
//! function over the status code and raw body so the rules can be tested
//! without a network.

use chatrelay_core::RelayError;
use serde_json::Value;
use tracing::warn;

use crate::wire::CompletionResponse;

/// Reply used when a success body carries no usable content.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't get a response.";

/// Replaces upstream text for 401 responses.
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "The completion service rejected the relay's API key. Check the configured provider key.";

/// Replaces upstream text for 402 responses.
pub const QUOTA_EXHAUSTED_MESSAGE: &str = "The selected model has insufficient quota. Try a different model or add quota to the provider account.";

/// One entry of the provider error remap table.
#[derive(Debug, Clone, Copy)]
pub struct RemapRule {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// Whether the rule applies to an upstream status and extracted message.
    pub applies: fn(u16, &str) -> bool,
    /// Client-facing message used instead of the upstream one.
    pub replacement: &'static str,
}

/// Ordered remap table. The first matching rule wins.
pub const PROVIDER_ERROR_REMAPS: &[RemapRule] = &[
    RemapRule {
        name: "invalid-credentials",
        applies: is_unauthorized,
        replacement: INVALID_CREDENTIALS_MESSAGE,
    },
    RemapRule {
        name: "quota-exhausted",
        applies: is_payment_required,
        replacement: QUOTA_EXHAUSTED_MESSAGE,
    },
];

fn is_unauthorized(status: u16, _message: &str) -> bool {
    status == 401
}

fn is_payment_required(status: u16, _message: &str) -> bool {
    status == 402
}

/// Extract the reply text from a success body, or fall back.
#[must_use]
pub fn reply_or_fallback(body: &[u8]) -> String {
    match serde_json::from_slice::<CompletionResponse>(body) {
        Ok(parsed) => parsed.first_content().unwrap_or_else(|| {
            warn!("Provider success body had no reply content, using fallback");
            FALLBACK_REPLY.to_string()
        }),
        Err(e) => {
            warn!(error = %e, "Provider success body was not parseable, using fallback");
            FALLBACK_REPLY.to_string()
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Tried in order: `error` as a string, `error.message`, the `error` object
/// as JSON text, a top-level `message`, a bare JSON string, then the raw
/// body text.
#[must_use]
pub fn extract_error_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(message) = message_from_json(&value) {
            return message;
        }
    }

    if text.is_empty() {
        format!("completion request failed with status {status}")
    } else {
        text.to_string()
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    let message = match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => match map.get("error") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(error @ Value::Object(inner)) => Some(
                inner
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| error.to_string(), str::to_owned),
            ),
            _ => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
        },
        _ => None,
    };

    message.filter(|m| !m.trim().is_empty())
}

/// Apply [`PROVIDER_ERROR_REMAPS`] to an extracted message.
#[must_use]
pub fn remap_message(status: u16, message: String) -> String {
    PROVIDER_ERROR_REMAPS
        .iter()
        .find(|rule| (rule.applies)(status, &message))
        .map_or(message, |rule| rule.replacement.to_string())
}

/// Turn a non-success provider response into a [`RelayError`].
#[must_use]
pub fn provider_error(status: u16, body: &[u8]) -> RelayError {
    let message = extract_error_message(status, body);
    RelayError::provider(status, remap_message(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_extracted() {
        let body = br#"{"choices":[{"message":{"content":"hello!"}}]}"#;
        assert_eq!(reply_or_fallback(body), "hello!");
    }

    #[test]
    fn test_reply_only_first_choice_used() {
        let body =
            br#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(reply_or_fallback(body), "first");
    }

    #[test]
    fn test_malformed_success_bodies_fall_back() {
        let bodies: [&[u8]; 7] = [
            br#"{"choices":[{"message":{"content":""}}]}"#,
            br#"{"choices":[{"message":{}}]}"#,
            br#"{"choices":[{}]}"#,
            br#"{"choices":[]}"#,
            br#"{}"#,
            b"<html>oops</html>",
            b"",
        ];

        for body in bodies {
            assert_eq!(
                reply_or_fallback(body),
                FALLBACK_REPLY,
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_extract_openai_style_error() {
        let body = br#"{"error":{"message":"Rate limit exceeded","code":429}}"#;
        assert_eq!(extract_error_message(429, body), "Rate limit exceeded");
    }

    #[test]
    fn test_extract_string_error() {
        let body = br#"{"error":"model not found"}"#;
        assert_eq!(extract_error_message(404, body), "model not found");
    }

    #[test]
    fn test_extract_error_object_without_message() {
        let body = br#"{"error":{"code":500}}"#;
        assert_eq!(extract_error_message(500, body), r#"{"code":500}"#);
    }

    #[test]
    fn test_extract_top_level_message() {
        let body = br#"{"message":"upstream overloaded"}"#;
        assert_eq!(extract_error_message(503, body), "upstream overloaded");
    }

    #[test]
    fn test_extract_raw_text_when_not_json() {
        assert_eq!(
            extract_error_message(502, b"  Bad Gateway\n"),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_extract_empty_body() {
        assert_eq!(
            extract_error_message(500, b""),
            "completion request failed with status 500"
        );
    }

    #[test]
    fn test_extract_json_without_known_fields_uses_text() {
        let body = br#"{"detail":"nope"}"#;
        assert_eq!(extract_error_message(400, body), r#"{"detail":"nope"}"#);
    }

    #[test]
    fn test_remap_table_order_and_coverage() {
        let names: Vec<&str> = PROVIDER_ERROR_REMAPS.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["invalid-credentials", "quota-exhausted"]);
    }

    #[test]
    fn test_unauthorized_replaced_regardless_of_body() {
        let err = provider_error(401, br#"{"error":{"message":"No auth credentials found"}}"#);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.client_message(), INVALID_CREDENTIALS_MESSAGE);

        let err = provider_error(401, b"");
        assert_eq!(err.client_message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_payment_required_replaced() {
        let err = provider_error(402, br#"{"error":{"message":"Insufficient credits"}}"#);
        assert_eq!(err.status_code(), 402);
        assert_eq!(err.client_message(), QUOTA_EXHAUSTED_MESSAGE);
    }

    #[test]
    fn test_unmapped_status_passes_message_through() {
        let err = provider_error(429, br#"{"error":{"message":"Rate limit exceeded"}}"#);
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.client_message(), "Rate limit exceeded");
    }
}

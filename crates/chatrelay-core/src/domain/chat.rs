//! Chat turn types and the incoming request shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Parse a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message in a conversation, tagged with its speaker role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn is_system(&self) -> bool {
        matches!(self.role, Role::System)
    }
}

/// A history item as the client sent it.
///
/// Both fields are optional so that anything the client puts in the
/// `history` array can be represented. Entries that do not form a valid
/// [`ChatTurn`] are dropped during composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub role: Option<String>,
    pub content: Option<String>,
}

impl HistoryEntry {
    /// Create an entry from a role string and content.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: Some(content.into()),
        }
    }

    /// Read an entry out of an arbitrary JSON value.
    ///
    /// Non-object values and non-string fields read as absent.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            role: value.get("role").and_then(Value::as_str).map(str::to_owned),
            content: value
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    /// Convert into a turn, if the role is recognized and content is present.
    #[must_use]
    pub fn into_turn(self) -> Option<ChatTurn> {
        let role = Role::parse(self.role.as_deref()?)?;
        Some(ChatTurn::new(role, self.content?))
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    /// The new user message, untrimmed.
    pub message: String,
    /// Prior turns in chronological order.
    pub history: Vec<HistoryEntry>,
}

impl IncomingRequest {
    /// Parse a raw request body.
    ///
    /// Bodies that are not valid JSON are treated as empty, which the
    /// composer then rejects as a missing message.
    #[must_use]
    pub fn from_json_slice(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// Read a request out of a JSON value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let history = value
            .get("history")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(HistoryEntry::from_value).collect())
            .unwrap_or_default();

        Self { message, history }
    }
}

/// Successful relay response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

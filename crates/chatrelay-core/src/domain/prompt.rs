use serde::Serialize;

use super::chat::ChatTurn;

/// The ordered turn list sent to the completion provider.
///
/// Only the composer builds these, so every prompt starts with exactly one
/// system turn and ends with the user's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutgoingPrompt {
    turns: Vec<ChatTurn>,
}

impl OutgoingPrompt {
    pub(crate) const fn from_composed(turns: Vec<ChatTurn>) -> Self {
        Self { turns }
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

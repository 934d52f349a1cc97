//! Message composition.
//!
//! Turns a user message and the client's history into the prompt sent
//! upstream. Composition is pure: it validates, filters and orders, and
//! never touches the network.

use tracing::debug;

use crate::domain::{ChatTurn, HistoryEntry, OutgoingPrompt, Role};
use crate::ports::ValidationError;

/// System turn injected when the client did not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a concise, friendly assistant.";

/// Compose a prompt using [`DEFAULT_SYSTEM_PROMPT`].
pub fn compose<I>(message: &str, history: I) -> Result<OutgoingPrompt, ValidationError>
where
    I: IntoIterator<Item = HistoryEntry>,
{
    compose_with_system(message, history, DEFAULT_SYSTEM_PROMPT)
}

/// Compose a prompt, injecting `system_prompt` if history has no system turn.
///
/// Rules:
/// - the trimmed `message` must be non-empty
/// - history entries with an unknown role or no content are dropped
/// - the first caller system turn wins and moves to the front; later ones are dropped
/// - the user message is always last
pub fn compose_with_system<I>(
    message: &str,
    history: I,
    system_prompt: &str,
) -> Result<OutgoingPrompt, ValidationError>
where
    I: IntoIterator<Item = HistoryEntry>,
{
    let message = message.trim();
    if message.is_empty() {
        return Err(ValidationError::MessageRequired);
    }

    let mut system: Option<ChatTurn> = None;
    let mut conversation = Vec::new();
    let mut dropped = 0usize;

    for entry in history {
        let Some(turn) = entry.into_turn() else {
            dropped += 1;
            continue;
        };

        if turn.is_system() {
            if system.is_none() {
                system = Some(turn);
            } else {
                dropped += 1;
            }
        } else {
            conversation.push(turn);
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped history entries during composition");
    }

    let system = system.unwrap_or_else(|| ChatTurn::new(Role::System, system_prompt));

    let mut turns = Vec::with_capacity(conversation.len() + 2);
    turns.push(system);
    turns.extend(conversation);
    turns.push(ChatTurn::new(Role::User, message));

    Ok(OutgoingPrompt::from_composed(turns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(prompt: &OutgoingPrompt) -> Vec<Role> {
        prompt.turns().iter().map(ChatTurn::role).collect()
    }

    fn system_count(prompt: &OutgoingPrompt) -> usize {
        prompt.turns().iter().filter(|t| t.is_system()).count()
    }

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(compose("", Vec::<HistoryEntry>::new()), Err(ValidationError::MessageRequired));
        assert_eq!(
            compose("   ", Vec::<HistoryEntry>::new()),
            Err(ValidationError::MessageRequired)
        );
        assert_eq!(
            compose("\n\t", vec![HistoryEntry::new("user", "earlier")]),
            Err(ValidationError::MessageRequired)
        );
    }

    #[test]
    fn test_default_system_injected_for_empty_history() {
        let prompt = compose("  hi  ", Vec::<HistoryEntry>::new()).unwrap();

        assert_eq!(roles(&prompt), vec![Role::System, Role::User]);
        assert_eq!(prompt.turns()[0].content(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(prompt.turns()[1].content(), "hi");
    }

    #[test]
    fn test_history_order_preserved_and_user_last() {
        let history = vec![
            HistoryEntry::new("user", "one"),
            HistoryEntry::new("assistant", "two"),
            HistoryEntry::new("user", "three"),
        ];
        let prompt = compose("four", history).unwrap();

        let contents: Vec<&str> = prompt.turns().iter().map(ChatTurn::content).collect();
        assert_eq!(
            contents,
            vec![DEFAULT_SYSTEM_PROMPT, "one", "two", "three", "four"]
        );
        assert_eq!(prompt.turns().last().unwrap().role(), Role::User);
    }

    #[test]
    fn test_foreign_roles_and_malformed_entries_dropped() {
        let history = vec![
            HistoryEntry::new("tool", "ignored"),
            HistoryEntry::new("user", "kept"),
            HistoryEntry::default(),
            HistoryEntry {
                role: Some("assistant".to_string()),
                content: None,
            },
            HistoryEntry::new("SYSTEM", "wrong case"),
        ];
        let prompt = compose("next", history).unwrap();

        assert_eq!(roles(&prompt), vec![Role::System, Role::User, Role::User]);
        assert_eq!(prompt.turns()[1].content(), "kept");
        assert_eq!(prompt.turns()[0].content(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_caller_system_turn_preserved_without_default() {
        let history = vec![
            HistoryEntry::new("system", "You are a pirate."),
            HistoryEntry::new("user", "ahoy"),
        ];
        let prompt = compose("arr", history).unwrap();

        assert_eq!(system_count(&prompt), 1);
        assert_eq!(prompt.turns()[0].content(), "You are a pirate.");
        assert_eq!(prompt.len(), 3);
    }

    #[test]
    fn test_caller_system_turn_moves_to_front() {
        let history = vec![
            HistoryEntry::new("user", "first"),
            HistoryEntry::new("system", "late system"),
            HistoryEntry::new("assistant", "second"),
        ];
        let prompt = compose("third", history).unwrap();

        assert_eq!(
            roles(&prompt),
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(prompt.turns()[0].content(), "late system");
    }

    #[test]
    fn test_extra_system_turns_dropped() {
        let history = vec![
            HistoryEntry::new("system", "a"),
            HistoryEntry::new("system", "b"),
        ];
        let prompt = compose("q", history).unwrap();

        assert_eq!(system_count(&prompt), 1);
        assert_eq!(prompt.turns()[0].content(), "a");
    }

    #[test]
    fn test_custom_system_prompt() {
        let prompt = compose_with_system("hi", Vec::<HistoryEntry>::new(), "Be brief.").unwrap();
        assert_eq!(prompt.turns()[0].content(), "Be brief.");
    }

    #[test]
    fn test_history_content_not_trimmed() {
        let prompt = compose("q", vec![HistoryEntry::new("assistant", "  spaced  ")]).unwrap();
        assert_eq!(prompt.turns()[1].content(), "  spaced  ");
    }
}

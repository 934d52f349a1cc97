//! Core domain types.
//!
//! These types represent a single relay exchange. None of them outlive the
//! request that created them.
//!
//! # Structure
//!
//! - `chat` - Roles, turns and the lenient incoming request form
//! - `prompt` - The composed prompt sent upstream

pub mod chat;
mod prompt;

pub use chat::{ChatReply, ChatTurn, HistoryEntry, IncomingRequest, Role};
pub use prompt::OutgoingPrompt;

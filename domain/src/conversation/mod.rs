//! Per-session conversation history.
//!
//! - [`history::ConversationHistory`] - ordered, append-only turns owned by one session
//! - [`history::Turn`] - a single user or bot message

pub mod history;

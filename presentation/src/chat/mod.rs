//! Interactive chat module
//!
//! Provides a line-editor based chat over one question-answering session.

mod repl;

pub use repl::{ChatCommand, ChatRepl};

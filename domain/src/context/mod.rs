//! Retrieved background context.
//!
//! - [`snippet::ContextSnippet`] - what the knowledge source returned, and
//!   whether it is worth putting into a prompt

pub mod snippet;

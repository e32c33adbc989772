//! Prompt construction for the answer generator.

pub mod template;

pub use template::{Prompt, PromptTemplate, PromptVariant};

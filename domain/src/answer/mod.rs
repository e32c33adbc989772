//! Answers and the generative model's request/response shapes.
//!
//! - [`entities::Answer`] - the generator's direct output (or a placeholder)
//! - [`entities::TranslatedAnswer`] - the final, user-facing value
//! - [`generation`] - provider-neutral request and tolerant response schema

pub mod entities;
pub mod generation;

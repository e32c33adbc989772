//! Domain layer for lingua-qa
//!
//! This crate contains the value objects and pure policies of the
//! multilingual question-answering pipeline. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Usable context
//!
//! A retrieved [`ContextSnippet`] only reaches the prompt when it was found,
//! is at least [`MIN_CONTEXT_CHARS`] characters after trimming, and is not the
//! [`NO_CONTEXT_SENTINEL`]. Everything else is a general-knowledge prompt.
//!
//! ## Pipeline stages
//!
//! Every request walks [`PipelineStage`]s from `Detecting` to `Translating`
//! and ends in exactly one of `Done` or `Failed`.

pub mod answer;
pub mod config;
pub mod context;
pub mod conversation;
pub mod core;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use answer::{
    entities::{
        Answer, AnswerOrigin, EMPTY_ANSWER_PLACEHOLDER, FallbackReason,
        TRANSPORT_FAILURE_PLACEHOLDER, TranslatedAnswer,
    },
    generation::{GenerationRequest, GenerationResponse, MessageRole},
};
pub use config::{ConfigIssue, OutputFormat, Severity};
pub use context::snippet::{ContextSnippet, MIN_CONTEXT_CHARS, NO_CONTEXT_SENTINEL};
pub use conversation::history::{ConversationHistory, Role, Turn};
pub use core::{
    error::DomainError,
    language::{LanguageCode, SUPPORTED_LANGUAGES, SupportedLanguage},
    question::Question,
};
pub use pipeline::stage::PipelineStage;
pub use prompt::{Prompt, PromptTemplate, PromptVariant};

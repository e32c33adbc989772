//! Application layer for lingua-qa
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineParams;
pub use ports::{
    answer_model::{AnswerModel, GenerationError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    knowledge_source::{KnowledgeResult, KnowledgeSource, NoKnowledgeSource, RetrievalError},
    language_detector::{DetectionError, LanguageDetector},
    progress::{NoProgress, PipelineProgress},
    translation_service::{TranslationError, TranslationService},
};
pub use use_cases::answer_question::{
    AbortReason, AnswerQuestionInput, AnswerQuestionUseCase, PipelineError, PipelineReply,
    QueryNormalization,
};
pub use use_cases::qa_session::QaSession;

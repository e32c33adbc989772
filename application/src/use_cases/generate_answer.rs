//! Generate Answer use case.
//!
//! Builds the threshold-gated prompt, calls the [`AnswerModel`], and extracts
//! the first candidate's text. Transport failures and empty responses
//! degrade to placeholder answers instead of errors: an unanswerable
//! question is a valid outcome the user must see.

use crate::ports::answer_model::AnswerModel;
use lingua_domain::{
    Answer, ContextSnippet, FallbackReason, GenerationRequest, Prompt, PromptTemplate, Question,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one generation attempt
#[derive(Debug, Clone)]
pub struct Generation {
    pub answer: Answer,
    /// The prompt that was sent
    pub prompt: Prompt,
}

/// Prompt builder plus model invocation
#[derive(Clone)]
pub struct AnswerGenerator {
    model: Arc<dyn AnswerModel>,
}

impl AnswerGenerator {
    pub fn new(model: Arc<dyn AnswerModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, question: &Question, context: &ContextSnippet) -> Generation {
        let prompt = PromptTemplate::build(question.text(), context);
        debug!(
            "Prompt for {}: variant={}, {} chars",
            self.model.name(),
            prompt.variant,
            prompt.text.chars().count()
        );

        let request = GenerationRequest::user(prompt.text.clone());
        let answer = match self.model.generate(&request).await {
            Ok(response) => match response.first_text() {
                Some(text) => Answer::generated(text, question.source_language().clone()),
                None => {
                    warn!("{} returned no usable candidate", self.model.name());
                    Answer::fallback(FallbackReason::EmptyResponse)
                }
            },
            Err(e) => {
                warn!("Answer generation via {} failed: {}", self.model.name(), e);
                Answer::fallback(e.fallback_reason())
            }
        };

        Generation { answer, prompt }
    }
}

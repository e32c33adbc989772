//! Question-answering session.
//!
//! A [`QaSession`] owns one conversation: its history and its current output
//! language. The shared [`AnswerQuestionUseCase`] does the work; the session
//! only decides which history and language each request uses.

use crate::ports::progress::{NoProgress, PipelineProgress};
use crate::use_cases::answer_question::{
    AnswerQuestionInput, AnswerQuestionUseCase, PipelineError, PipelineReply,
};
use lingua_domain::{ConversationHistory, LanguageCode, Turn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// One user's conversation with the pipeline.
///
/// Sessions are independent: two sessions never share history, and a
/// session's requests run one at a time (`ask` takes `&mut self`).
pub struct QaSession {
    use_case: Arc<AnswerQuestionUseCase>,
    history: ConversationHistory,
    output_language: LanguageCode,
}

impl QaSession {
    /// Start an empty session using the use case's default output language.
    pub fn new(use_case: Arc<AnswerQuestionUseCase>) -> Self {
        let output_language = use_case.params().default_output_language.clone();
        Self {
            use_case,
            history: ConversationHistory::new(),
            output_language,
        }
    }

    pub fn with_output_language(mut self, language: LanguageCode) -> Self {
        self.output_language = language;
        self
    }

    pub fn output_language(&self) -> &LanguageCode {
        &self.output_language
    }

    /// Change the language of subsequent answers. History is kept.
    pub fn set_output_language(&mut self, language: LanguageCode) {
        info!("Output language: {} -> {}", self.output_language, language);
        self.output_language = language;
    }

    pub fn history(&self) -> &[Turn] {
        self.history.turns()
    }

    /// Clear the conversation; the output language is kept.
    pub fn reset_history(&mut self) {
        self.use_case.reset_history(&mut self.history);
    }

    /// Ask a question in the session's current output language.
    pub async fn ask(&mut self, text: &str) -> Result<PipelineReply, PipelineError> {
        self.ask_with(text, &NoProgress, None).await
    }

    /// Ask with progress reporting and optional cancellation.
    pub async fn ask_with(
        &mut self,
        text: &str,
        progress: &dyn PipelineProgress,
        cancellation: Option<CancellationToken>,
    ) -> Result<PipelineReply, PipelineError> {
        let mut input = AnswerQuestionInput::new(text, self.output_language.clone());
        if let Some(token) = cancellation {
            input = input.with_cancellation(token);
        }
        self.use_case
            .execute(&mut self.history, input, progress)
            .await
    }
}

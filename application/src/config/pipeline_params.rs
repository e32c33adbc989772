//! Pipeline parameters - per-request control.
//!
//! [`PipelineParams`] groups the static parameters that control how
//! [`AnswerQuestionUseCase`](crate::use_cases::answer_question::AnswerQuestionUseCase)
//! runs a request. These are application-layer concerns, not domain policy.

use lingua_domain::LanguageCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Abort a request that has not finished within this duration.
    /// `None` waits as long as the services take.
    pub request_timeout: Option<Duration>,
    /// Output language for sessions that did not choose one.
    pub default_output_language: LanguageCode,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(60)),
            default_output_language: LanguageCode::english(),
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_default_output_language(mut self, language: LanguageCode) -> Self {
        self.default_output_language = language;
        self
    }
}

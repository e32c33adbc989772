//! Answer Question use case.
//!
//! Runs one question through the pipeline:
//!
//! 1. **Detecting** - classify the question's language (fatal on failure)
//! 2. **Normalizing** - translate to English for retrieval (degrades to the
//!    original text on failure)
//! 3. **RetrievingContext** - best-effort background snippet (never fails)
//! 4. **Generating** - prompt + model call (degrades to a placeholder)
//! 5. **Translating** - render the answer in the output language (fatal)
//!
//! History is only touched after the last external call has returned, so a
//! request that times out, is cancelled, or whose future is dropped leaves
//! the session's [`ConversationHistory`] exactly as it was.

use crate::config::PipelineParams;
use crate::ports::answer_model::AnswerModel;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::knowledge_source::KnowledgeSource;
use crate::ports::language_detector::{DetectionError, LanguageDetector};
use crate::ports::progress::{NoProgress, PipelineProgress};
use crate::ports::translation_service::{TranslationError, TranslationService};
use crate::use_cases::generate_answer::AnswerGenerator;
use crate::use_cases::retrieve_context::ContextRetriever;
use crate::use_cases::translate_text::TextTranslator;
use chrono::{DateTime, Utc};
use lingua_domain::core::string::preview;
use lingua_domain::{
    Answer, ContextSnippet, ConversationHistory, LanguageCode, PipelineStage, PromptVariant,
    Question, TranslatedAnswer, Turn,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a request was abandoned before finishing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    TimedOut(Duration),
    Cancelled,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::TimedOut(limit) => write!(f, "timed out after {}s", limit.as_secs_f64()),
            AbortReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Terminal pipeline failures.
///
/// The `Display` text is the human-readable message shown to the user and
/// names the stage that failed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Language detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error("Could not translate the answer into '{language}': {source}")]
    OutputTranslation {
        language: LanguageCode,
        #[source]
        source: TranslationError,
    },

    #[error("Request aborted during {stage}: {reason}")]
    Aborted {
        stage: PipelineStage,
        reason: AbortReason,
    },
}

impl PipelineError {
    /// The stage the request was in when it failed
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Detection(_) => PipelineStage::Detecting,
            PipelineError::OutputTranslation { .. } => PipelineStage::Translating,
            PipelineError::Aborted { stage, .. } => *stage,
        }
    }

    /// Whether the question is recorded as a user turn despite the failure.
    ///
    /// Only an output-translation failure keeps the question: detection
    /// failures happen before any history mutation and aborts must leave no
    /// trace.
    pub fn records_question(&self) -> bool {
        matches!(self, PipelineError::OutputTranslation { .. })
    }
}

/// How the English retrieval query was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNormalization {
    /// The question was already English
    Identity,
    /// The question was translated to English
    Translated,
    /// Translation failed; the original text was used as the query
    Degraded,
}

/// Input for the [`AnswerQuestionUseCase`].
#[derive(Debug, Clone)]
pub struct AnswerQuestionInput {
    /// The question exactly as the user typed or spoke it.
    pub text: String,
    /// Language the answer must be rendered in.
    pub output_language: LanguageCode,
    /// Optional external cancellation.
    pub cancellation: Option<CancellationToken>,
}

impl AnswerQuestionInput {
    pub fn new(text: impl Into<String>, output_language: LanguageCode) -> Self {
        Self {
            text: text.into(),
            output_language,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Successful pipeline result
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReply {
    pub question: Question,
    pub english_query: String,
    pub normalization: QueryNormalization,
    pub context: ContextSnippet,
    pub prompt_variant: PromptVariant,
    pub answer: Answer,
    pub translated: TranslatedAnswer,
    /// Snapshot of the session history after this exchange was appended
    pub history: Vec<Turn>,
    pub answered_at: DateTime<Utc>,
}

impl PipelineReply {
    /// The final, user-facing text
    pub fn display_text(&self) -> &str {
        &self.translated.text
    }

    pub fn context_used(&self) -> bool {
        self.prompt_variant == PromptVariant::WithContextHint
    }
}

/// Everything produced by a request that reached `Done`, before history is
/// committed
struct Completed {
    question: Question,
    english_query: String,
    normalization: QueryNormalization,
    context: ContextSnippet,
    prompt_variant: PromptVariant,
    answer: Answer,
    translated: TranslatedAnswer,
}

/// Records the current stage so an aborted request can report where it was
struct StageTracker {
    current: Mutex<PipelineStage>,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            current: Mutex::new(PipelineStage::Idle),
        }
    }

    fn enter(&self, stage: PipelineStage, progress: &dyn PipelineProgress) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = stage;
        debug!("Pipeline stage: {}", stage.as_str());
        progress.on_stage_start(stage);
    }

    fn current(&self) -> PipelineStage {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Use case for answering one question within a session.
///
/// Stateless apart from its collaborators; sessions pass their own
/// [`ConversationHistory`], so one instance can serve many sessions
/// concurrently behind an `Arc`.
#[derive(Clone)]
pub struct AnswerQuestionUseCase {
    detector: Arc<dyn LanguageDetector>,
    translator: TextTranslator,
    retriever: ContextRetriever,
    generator: AnswerGenerator,
    params: PipelineParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnswerQuestionUseCase {
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        translation: Arc<dyn TranslationService>,
        knowledge: Arc<dyn KnowledgeSource>,
        model: Arc<dyn AnswerModel>,
    ) -> Self {
        Self {
            detector,
            translator: TextTranslator::new(translation),
            retriever: ContextRetriever::new(knowledge),
            generator: AnswerGenerator::new(model),
            params: PipelineParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Answer `text` in `output_language`, without progress reporting.
    pub async fn process_question(
        &self,
        history: &mut ConversationHistory,
        text: &str,
        output_language: &LanguageCode,
    ) -> Result<PipelineReply, PipelineError> {
        let input = AnswerQuestionInput::new(text, output_language.clone());
        self.execute(history, input, &NoProgress).await
    }

    /// Clear a session's history.
    pub fn reset_history(&self, history: &mut ConversationHistory) {
        let cleared = history.len();
        history.reset();
        info!("Conversation history reset ({} turns cleared)", cleared);
        self.conversation_logger.log(ConversationEvent::new(
            "history_reset",
            serde_json::json!({ "turns_cleared": cleared }),
        ));
    }

    /// Execute one request with progress callbacks.
    pub async fn execute(
        &self,
        history: &mut ConversationHistory,
        input: AnswerQuestionInput,
        progress: &dyn PipelineProgress,
    ) -> Result<PipelineReply, PipelineError> {
        info!("Answering question: {}", preview(&input.text, 100));

        let tracker = StageTracker::new();
        let outcome = self.run_guarded(&input, &tracker, progress).await;

        // No awaits past this point: history changes are all-or-nothing.
        match outcome {
            Ok(done) => {
                history.push_exchange(input.text.as_str(), done.translated.text.as_str());
                progress.on_finished(PipelineStage::Done);
                self.log_answered(&done);
                info!(
                    "Answered in {} ({} -> {})",
                    done.translated.language,
                    done.question.source_language(),
                    done.question.output_language()
                );

                Ok(PipelineReply {
                    question: done.question,
                    english_query: done.english_query,
                    normalization: done.normalization,
                    context: done.context,
                    prompt_variant: done.prompt_variant,
                    answer: done.answer,
                    translated: done.translated,
                    history: history.turns().to_vec(),
                    answered_at: Utc::now(),
                })
            }
            Err(error) => {
                if error.records_question() {
                    history.push_user(input.text.as_str());
                }
                progress.on_finished(PipelineStage::Failed);
                warn!("Pipeline failed at {}: {}", error.stage().as_str(), error);
                self.conversation_logger.log(ConversationEvent::new(
                    "question_failed",
                    serde_json::json!({
                        "question": input.text,
                        "stage": error.stage().as_str(),
                        "error": error.to_string(),
                    }),
                ));
                Err(error)
            }
        }
    }

    /// Apply the configured timeout and the caller's cancellation token.
    async fn run_guarded(
        &self,
        input: &AnswerQuestionInput,
        tracker: &StageTracker,
        progress: &dyn PipelineProgress,
    ) -> Result<Completed, PipelineError> {
        let work = async {
            let run = self.run(&input.text, &input.output_language, tracker, progress);
            match self.params.request_timeout {
                Some(limit) => match tokio::time::timeout(limit, run).await {
                    Ok(result) => result,
                    Err(_) => Err(PipelineError::Aborted {
                        stage: tracker.current(),
                        reason: AbortReason::TimedOut(limit),
                    }),
                },
                None => run.await,
            }
        };

        match &input.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(PipelineError::Aborted {
                        stage: tracker.current(),
                        reason: AbortReason::Cancelled,
                    }),
                    result = work => result,
                }
            }
            None => work.await,
        }
    }

    async fn run(
        &self,
        text: &str,
        output_language: &LanguageCode,
        tracker: &StageTracker,
        progress: &dyn PipelineProgress,
    ) -> Result<Completed, PipelineError> {
        // Detecting
        tracker.enter(PipelineStage::Detecting, progress);
        if text.trim().is_empty() {
            return Err(DetectionError::EmptyText.into());
        }
        let source_language = self.detector.detect(text).await?;
        progress.on_language_detected(&source_language);
        debug!("Detected language: {}", source_language);

        let question = Question::new(text, source_language.clone(), output_language.clone())
            .map_err(|_| DetectionError::EmptyText)?;

        // Normalizing
        tracker.enter(PipelineStage::Normalizing, progress);
        let (english_query, normalization) = if question.needs_normalization() {
            match self
                .translator
                .translate(text, &source_language, &LanguageCode::english())
                .await
            {
                Ok(query) => (query, QueryNormalization::Translated),
                Err(e) => {
                    warn!("Query translation failed, retrieving with original text: {}", e);
                    progress.on_degraded(PipelineStage::Normalizing, &e.to_string());
                    (text.to_string(), QueryNormalization::Degraded)
                }
            }
        } else {
            (text.to_string(), QueryNormalization::Identity)
        };

        // RetrievingContext
        tracker.enter(PipelineStage::RetrievingContext, progress);
        let context = self.retriever.retrieve(&english_query).await;
        if !context.is_usable() {
            progress.on_degraded(PipelineStage::RetrievingContext, "no usable context");
        }

        // Generating
        tracker.enter(PipelineStage::Generating, progress);
        let generation = self.generator.generate(&question, &context).await;
        if generation.answer.is_fallback() {
            progress.on_degraded(PipelineStage::Generating, &generation.answer.raw_text);
        }

        // Translating
        tracker.enter(PipelineStage::Translating, progress);
        let answer = generation.answer;
        let rendered = self
            .translator
            .translate(&answer.raw_text, &answer.source_language, output_language)
            .await
            .map_err(|source| PipelineError::OutputTranslation {
                language: output_language.clone(),
                source,
            })?;

        Ok(Completed {
            question,
            english_query,
            normalization,
            context,
            prompt_variant: generation.prompt.variant,
            answer,
            translated: TranslatedAnswer {
                text: rendered,
                language: output_language.clone(),
            },
        })
    }

    fn log_answered(&self, done: &Completed) {
        self.conversation_logger.log(ConversationEvent::new(
            "question_answered",
            serde_json::json!({
                "question": done.question.text(),
                "source_language": done.question.source_language().as_str(),
                "output_language": done.question.output_language().as_str(),
                "english_query": done.english_query,
                "normalization": done.normalization,
                "prompt_variant": done.prompt_variant.as_str(),
                "answer_origin": done.answer.origin,
                "raw_answer": done.answer.raw_text,
                "answer": done.translated.text,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::answer_model::GenerationError;
    use crate::ports::knowledge_source::{KnowledgeResult, RetrievalError};
    use async_trait::async_trait;
    use lingua_domain::{
        AnswerOrigin, EMPTY_ANSWER_PLACEHOLDER, FallbackReason, GenerationRequest,
        GenerationResponse, Role, TRANSPORT_FAILURE_PLACEHOLDER,
    };
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockDetector {
        result: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl MockDetector {
        fn detecting(code: &'static str) -> Self {
            Self {
                result: Ok(code),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(reason: &'static str) -> Self {
            Self {
                result: Err(reason),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LanguageDetector for MockDetector {
        async fn detect(&self, _text: &str) -> Result<LanguageCode, DetectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.result {
                Ok(code) => Ok(LanguageCode::new(code).unwrap()),
                Err(reason) => Err(DetectionError::Undetectable(reason.to_string())),
            }
        }

        fn name(&self) -> &str {
            "mock-detector"
        }
    }

    /// Translation mock keyed by `(text, from, to)`; unknown keys fail.
    #[derive(Default)]
    struct MockTranslation {
        table: HashMap<(String, String, String), String>,
        failing_targets: Vec<&'static str>,
        calls: Mutex<Vec<(String, String, String)>>,
    }

    impl MockTranslation {
        fn with(mut self, text: &str, from: &str, to: &str, out: &str) -> Self {
            self.table
                .insert((text.into(), from.into(), to.into()), out.into());
            self
        }

        fn failing_into(mut self, to: &'static str) -> Self {
            self.failing_targets.push(to);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TranslationService for MockTranslation {
        async fn translate(
            &self,
            text: &str,
            from: &LanguageCode,
            to: &LanguageCode,
        ) -> Result<String, TranslationError> {
            let key = (text.to_string(), from.to_string(), to.to_string());
            self.calls.lock().unwrap().push(key.clone());
            if self.failing_targets.contains(&to.as_str()) {
                return Err(TranslationError::Transport("service down".into()));
            }
            self.table
                .get(&key)
                .cloned()
                .ok_or_else(|| TranslationError::MalformedResponse(format!("no entry for {key:?}")))
        }

        fn name(&self) -> &str {
            "mock-translation"
        }
    }

    struct MockKnowledge {
        result: Result<KnowledgeResult, String>,
        queries: Mutex<Vec<String>>,
    }

    impl MockKnowledge {
        fn found(text: &str) -> Self {
            Self {
                result: Ok(KnowledgeResult::found(text)),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn not_found() -> Self {
            Self {
                result: Ok(KnowledgeResult::not_found()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err("timeout".into()),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl KnowledgeSource for MockKnowledge {
        async fn lookup(&self, english_query: &str) -> Result<KnowledgeResult, RetrievalError> {
            self.queries.lock().unwrap().push(english_query.to_string());
            self.result.clone().map_err(RetrievalError::Transport)
        }

        fn name(&self) -> &str {
            "mock-knowledge"
        }
    }

    struct MockModel {
        responses: Mutex<VecDeque<GenerationResponse>>,
        prompts: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl MockModel {
        fn answering(text: &str) -> Self {
            Self::with_responses(vec![GenerationResponse::with_text(text)])
        }

        fn with_responses(responses: Vec<GenerationResponse>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                prompts: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl AnswerModel for MockModel {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResponse, GenerationError> {
            self.prompts.lock().unwrap().push(request.content.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GenerationError::Connection("no more responses".into()))
        }

        fn name(&self) -> &str {
            "mock-model"
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        stages: Mutex<Vec<PipelineStage>>,
        finished: Mutex<Option<PipelineStage>>,
    }

    impl PipelineProgress for RecordingProgress {
        fn on_stage_start(&self, stage: PipelineStage) {
            self.stages.lock().unwrap().push(stage);
        }

        fn on_finished(&self, outcome: PipelineStage) {
            *self.finished.lock().unwrap() = Some(outcome);
        }
    }

    struct Fixture {
        detector: Arc<MockDetector>,
        translation: Arc<MockTranslation>,
        knowledge: Arc<MockKnowledge>,
        model: Arc<MockModel>,
    }

    impl Fixture {
        fn use_case(&self) -> AnswerQuestionUseCase {
            AnswerQuestionUseCase::new(
                self.detector.clone(),
                self.translation.clone(),
                self.knowledge.clone(),
                self.model.clone(),
            )
        }
    }

    fn code(s: &str) -> LanguageCode {
        LanguageCode::new(s).unwrap()
    }

    const SPANISH_Q: &str = "¿Cuál es la capital de Francia?";
    const ENGLISH_Q: &str = "What is the capital of France?";
    const SPANISH_A: &str = "París es la capital de Francia.";
    const ENGLISH_A: &str = "Paris is the capital of France.";
    const PARIS_CONTEXT: &str = "Paris is the capital of France. With an estimated population of over two million residents, it is the largest city in the country.";

    fn spanish_fixture(knowledge: MockKnowledge, model: MockModel) -> Fixture {
        Fixture {
            detector: Arc::new(MockDetector::detecting("es")),
            translation: Arc::new(
                MockTranslation::default()
                    .with(SPANISH_Q, "es", "en", ENGLISH_Q)
                    .with(SPANISH_A, "es", "en", ENGLISH_A),
            ),
            knowledge: Arc::new(knowledge),
            model: Arc::new(model),
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_spanish_question_answered_in_english() {
        let fixture = spanish_fixture(
            MockKnowledge::found(PARIS_CONTEXT),
            MockModel::answering(SPANISH_A),
        );
        let use_case = fixture.use_case();
        let mut history = ConversationHistory::new();

        let reply = use_case
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();

        assert_eq!(reply.display_text(), ENGLISH_A);
        assert_eq!(reply.translated.language.as_str(), "en");
        assert_eq!(reply.question.source_language().as_str(), "es");
        assert_eq!(reply.english_query, ENGLISH_Q);
        assert_eq!(reply.normalization, QueryNormalization::Translated);
        assert!(reply.context_used());

        // Retrieval used the English query, the model saw the original question
        assert_eq!(*fixture.knowledge.queries.lock().unwrap(), vec![ENGLISH_Q]);
        let prompt = fixture.model.last_prompt();
        assert!(prompt.contains(&format!("Question: '{}'", SPANISH_Q)));
        assert!(prompt.contains(PARIS_CONTEXT));

        assert_eq!(
            history.turns(),
            &[Turn::user(SPANISH_Q), Turn::bot(ENGLISH_A)]
        );
        assert_eq!(reply.history, history.turns());
    }

    #[tokio::test]
    async fn test_english_question_makes_no_translation_calls() {
        let fixture = Fixture {
            detector: Arc::new(MockDetector::detecting("en")),
            translation: Arc::new(MockTranslation::default()),
            knowledge: Arc::new(MockKnowledge::found(PARIS_CONTEXT)),
            model: Arc::new(MockModel::answering(ENGLISH_A)),
        };
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, ENGLISH_Q, &code("en"))
            .await
            .unwrap();

        assert_eq!(reply.display_text(), ENGLISH_A);
        assert_eq!(reply.normalization, QueryNormalization::Identity);
        assert_eq!(fixture.translation.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unusable_context_sends_no_context_section() {
        let fixture = spanish_fixture(MockKnowledge::not_found(), MockModel::answering(SPANISH_A));
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();

        assert_eq!(reply.prompt_variant, PromptVariant::GeneralKnowledgeOnly);
        assert!(!fixture.model.last_prompt().contains("Context:"));
        assert_eq!(reply.display_text(), ENGLISH_A);
    }

    #[tokio::test]
    async fn test_short_context_excluded_at_49_chars() {
        let fixture = spanish_fixture(
            MockKnowledge::found(&format!("  {}  ", "y".repeat(49))),
            MockModel::answering(SPANISH_A),
        );
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();

        assert!(!reply.context_used());
        assert!(!fixture.model.last_prompt().contains("yyyy"));
    }

    #[tokio::test]
    async fn test_retrieval_failure_does_not_abort() {
        let fixture = spanish_fixture(MockKnowledge::failing(), MockModel::answering(SPANISH_A));
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();

        assert!(!reply.context.present);
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_query_translation_failure_degrades_to_original_text() {
        let fixture = Fixture {
            detector: Arc::new(MockDetector::detecting("es")),
            // Only the answer translation is known
            translation: Arc::new(MockTranslation::default().with(SPANISH_A, "es", "en", ENGLISH_A)),
            knowledge: Arc::new(MockKnowledge::not_found()),
            model: Arc::new(MockModel::answering(SPANISH_A)),
        };
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();

        assert_eq!(reply.normalization, QueryNormalization::Degraded);
        assert_eq!(reply.english_query, SPANISH_Q);
        assert_eq!(*fixture.knowledge.queries.lock().unwrap(), vec![SPANISH_Q]);
        assert_eq!(reply.display_text(), ENGLISH_A);
    }

    #[tokio::test]
    async fn test_empty_candidates_reach_done_with_placeholder() {
        let fixture = Fixture {
            detector: Arc::new(MockDetector::detecting("es")),
            translation: Arc::new(
                MockTranslation::default()
                    .with(SPANISH_Q, "es", "en", ENGLISH_Q)
                    .with(EMPTY_ANSWER_PLACEHOLDER, "en", "es", "Lo siento, no pude generar una respuesta."),
            ),
            knowledge: Arc::new(MockKnowledge::not_found()),
            model: Arc::new(MockModel::with_responses(vec![GenerationResponse {
                candidates: Some(vec![]),
            }])),
        };
        let progress = RecordingProgress::default();
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .execute(
                &mut history,
                AnswerQuestionInput::new(SPANISH_Q, code("es")),
                &progress,
            )
            .await
            .unwrap();

        assert!(reply.answer.is_fallback());
        assert_eq!(reply.display_text(), "Lo siento, no pude generar una respuesta.");
        assert_eq!(*progress.finished.lock().unwrap(), Some(PipelineStage::Done));
        assert_eq!(*progress.stages.lock().unwrap(), PipelineStage::WORKING.to_vec());
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_placeholder_rendered_in_english_without_translation() {
        let fixture = spanish_fixture(
            MockKnowledge::not_found(),
            MockModel::with_responses(vec![GenerationResponse::default()]),
        );
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();

        assert_eq!(reply.display_text(), EMPTY_ANSWER_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_output_translation_failure_keeps_only_user_turn() {
        let fixture = Fixture {
            detector: Arc::new(MockDetector::detecting("es")),
            translation: Arc::new(
                MockTranslation::default()
                    .with(SPANISH_Q, "es", "en", ENGLISH_Q)
                    .failing_into("hi"),
            ),
            knowledge: Arc::new(MockKnowledge::found(PARIS_CONTEXT)),
            model: Arc::new(MockModel::answering(SPANISH_A)),
        };
        let progress = RecordingProgress::default();
        let mut history = ConversationHistory::new();

        let err = fixture
            .use_case()
            .execute(
                &mut history,
                AnswerQuestionInput::new(SPANISH_Q, code("hi")),
                &progress,
            )
            .await
            .unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Translating);
        assert!(err.to_string().contains("'hi'"));
        assert_eq!(history.turns(), &[Turn::user(SPANISH_Q)]);
        assert_eq!(*progress.finished.lock().unwrap(), Some(PipelineStage::Failed));
    }

    #[tokio::test]
    async fn test_detection_failure_leaves_history_untouched() {
        let fixture = Fixture {
            detector: Arc::new(MockDetector::failing("only digits")),
            translation: Arc::new(MockTranslation::default()),
            knowledge: Arc::new(MockKnowledge::found(PARIS_CONTEXT)),
            model: Arc::new(MockModel::answering(ENGLISH_A)),
        };
        let mut history = ConversationHistory::new();
        history.push_exchange("earlier", "answer");

        let err = fixture
            .use_case()
            .process_question(&mut history, "12345", &code("en"))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Detecting);
        assert!(err.to_string().starts_with("Language detection failed"));
        assert_eq!(history.len(), 2);
        assert!(fixture.knowledge.queries.lock().unwrap().is_empty());
        assert!(fixture.model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_question_fails_without_calling_detector() {
        let fixture = spanish_fixture(MockKnowledge::not_found(), MockModel::answering(SPANISH_A));
        let mut history = ConversationHistory::new();

        let err = fixture
            .use_case()
            .process_question(&mut history, "   ", &code("en"))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Detection(DetectionError::EmptyText)));
        assert_eq!(fixture.detector.calls.load(Ordering::SeqCst), 0);
        assert!(history.is_empty());
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_aborts_without_history_change() {
        let fixture = spanish_fixture(
            MockKnowledge::not_found(),
            MockModel::answering(SPANISH_A).slow(Duration::from_secs(120)),
        );
        let use_case = fixture
            .use_case()
            .with_params(PipelineParams::default().with_request_timeout(Some(Duration::from_secs(5))));
        let mut history = ConversationHistory::new();

        let err = use_case
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap_err();

        match err {
            PipelineError::Aborted { stage, reason } => {
                assert_eq!(stage, PipelineStage::Generating);
                assert_eq!(reason, AbortReason::TimedOut(Duration::from_secs(5)));
            }
            other => panic!("expected abort, got {other:?}"),
        }
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_request_leaves_no_turns() {
        let fixture = spanish_fixture(MockKnowledge::not_found(), MockModel::answering(SPANISH_A));
        let token = CancellationToken::new();
        token.cancel();
        let mut history = ConversationHistory::new();

        let err = fixture
            .use_case()
            .execute(
                &mut history,
                AnswerQuestionInput::new(SPANISH_Q, code("en")).with_cancellation(token),
                &NoProgress,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Aborted {
                reason: AbortReason::Cancelled,
                ..
            }
        ));
        assert!(!err.records_question());
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_history_accumulates_and_resets() {
        let fixture = spanish_fixture(
            MockKnowledge::not_found(),
            MockModel::with_responses(vec![
                GenerationResponse::with_text(SPANISH_A),
                GenerationResponse::with_text(SPANISH_A),
            ]),
        );
        let use_case = fixture.use_case();
        let mut history = ConversationHistory::new();

        use_case
            .process_question(&mut history, SPANISH_Q, &code("en"))
            .await
            .unwrap();
        let reply = use_case
            .process_question(&mut history, SPANISH_Q, &code("es"))
            .await
            .unwrap();

        // Output language equals the answer's language: identity, no call
        assert_eq!(reply.display_text(), SPANISH_A);
        let roles: Vec<Role> = history.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Bot, Role::User, Role::Bot]);

        use_case.reset_history(&mut history);
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_regional_english_needs_no_translation() {
        let fixture = Fixture {
            detector: Arc::new(MockDetector::detecting("en-GB")),
            translation: Arc::new(MockTranslation::default().failing_into("en")),
            knowledge: Arc::new(MockKnowledge::found(PARIS_CONTEXT)),
            model: Arc::new(MockModel::answering(ENGLISH_A)),
        };
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .process_question(&mut history, ENGLISH_Q, &code("en"))
            .await
            .unwrap();

        assert_eq!(reply.display_text(), ENGLISH_A);
        assert_eq!(reply.normalization, QueryNormalization::Identity);
        assert_eq!(fixture.translation.call_count(), 0);
        assert_eq!(
            history.turns(),
            &[Turn::user(ENGLISH_Q), Turn::bot(ENGLISH_A)]
        );
    }

    #[tokio::test]
    async fn test_model_transport_error_reaches_done_with_translated_placeholder() {
        const SPANISH_PLACEHOLDER: &str =
            "Se produjo un error de la API al responder la pregunta.";
        let fixture = Fixture {
            detector: Arc::new(MockDetector::detecting("es")),
            translation: Arc::new(
                MockTranslation::default()
                    .with(SPANISH_Q, "es", "en", ENGLISH_Q)
                    .with(TRANSPORT_FAILURE_PLACEHOLDER, "en", "es", SPANISH_PLACEHOLDER),
            ),
            knowledge: Arc::new(MockKnowledge::found(PARIS_CONTEXT)),
            // No scripted responses: the model fails with a connection error
            model: Arc::new(MockModel::with_responses(vec![])),
        };
        let progress = RecordingProgress::default();
        let mut history = ConversationHistory::new();

        let reply = fixture
            .use_case()
            .execute(
                &mut history,
                AnswerQuestionInput::new(SPANISH_Q, code("es")),
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(
            reply.answer.origin,
            AnswerOrigin::Fallback(FallbackReason::Transport)
        );
        assert_eq!(reply.answer.source_language.as_str(), "en");
        assert_eq!(reply.display_text(), SPANISH_PLACEHOLDER);
        assert_eq!(*progress.finished.lock().unwrap(), Some(PipelineStage::Done));
        assert_eq!(
            history.turns(),
            &[Turn::user(SPANISH_Q), Turn::bot(SPANISH_PLACEHOLDER)]
        );
    }
}

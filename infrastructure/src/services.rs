//! Adapter construction from [`FileConfig`].
//!
//! Turns the configured providers into the port objects the application
//! layer consumes. The binary only decides what to do with the result.

use crate::config::{DetectionProvider, FileConfig, RetrievalProvider};
use crate::detection::ScriptLanguageDetector;
use crate::gemini::{GeminiAnswerModel, GeminiConfig};
use crate::google::GoogleTranslateClient;
use crate::wikipedia::{WikipediaConfig, WikipediaKnowledgeSource};
use lingua_application::ports::answer_model::{AnswerModel, GenerationError};
use lingua_application::ports::knowledge_source::{
    KnowledgeSource, NoKnowledgeSource, RetrievalError,
};
use lingua_application::ports::language_detector::LanguageDetector;
use lingua_application::ports::translation_service::{TranslationError, TranslationService};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Failures while building HTTP adapters
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("failed to initialize translation client: {0}")]
    Translation(#[from] TranslationError),

    #[error("failed to initialize knowledge source: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("failed to initialize answer model: {0}")]
    Generation(#[from] GenerationError),
}

/// The four service ports, ready to hand to the pipeline
pub struct PipelineServices {
    pub detector: Arc<dyn LanguageDetector>,
    pub translation: Arc<dyn TranslationService>,
    pub knowledge: Arc<dyn KnowledgeSource>,
    pub model: Arc<dyn AnswerModel>,
    /// Whether the generation API key was found
    pub has_api_key: bool,
}

impl PipelineServices {
    pub fn from_config(config: &FileConfig) -> Result<Self, AdapterError> {
        let google = Arc::new(GoogleTranslateClient::new(
            config.translation.base_url.clone(),
            Duration::from_secs(config.translation.timeout_secs),
        )?);

        let detector: Arc<dyn LanguageDetector> = match config.detection.parse_provider().0 {
            DetectionProvider::Script => Arc::new(ScriptLanguageDetector),
            DetectionProvider::Google => google.clone(),
        };

        let knowledge: Arc<dyn KnowledgeSource> = match config.retrieval.parse_provider().0 {
            RetrievalProvider::Wikipedia => {
                Arc::new(WikipediaKnowledgeSource::new(WikipediaConfig {
                    api_url: config.retrieval.base_url.clone(),
                    sentences: config.retrieval.sentences,
                    timeout: Duration::from_secs(config.retrieval.timeout_secs),
                })?)
            }
            RetrievalProvider::None => Arc::new(NoKnowledgeSource),
        };

        let generation = &config.generation;
        let model = GeminiAnswerModel::new(GeminiConfig {
            base_url: generation.base_url.clone(),
            model: generation.model.clone(),
            api_key: generation.resolve_api_key(),
            api_key_env: generation.api_key_env.clone(),
            timeout: Duration::from_secs(generation.timeout_secs),
        })?;
        let has_api_key = model.has_api_key();
        if !has_api_key {
            warn!(
                "No API key for {} (set {}); answers will be placeholders",
                generation.model, generation.api_key_env
            );
        }

        info!(
            "Services: detector={}, translation={}, knowledge={}, model={}",
            detector.name(),
            TranslationService::name(google.as_ref()),
            knowledge.name(),
            model.name()
        );

        Ok(Self {
            detector,
            translation: google,
            knowledge,
            model: Arc::new(model),
            has_api_key,
        })
    }
}

//! Knowledge retrieval port

use async_trait::async_trait;
use thiserror::Error;

/// Raw lookup result from a knowledge source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeResult {
    pub text: String,
    pub found: bool,
}

impl KnowledgeResult {
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            found: true,
        }
    }

    pub fn not_found() -> Self {
        Self {
            text: String::new(),
            found: false,
        }
    }
}

/// Transport-level retrieval failures.
///
/// "Nothing matched" is not an error; return [`KnowledgeResult::not_found`].
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("knowledge source request failed: {0}")]
    Transport(String),

    #[error("knowledge source returned HTTP {status}")]
    Status { status: u16 },

    #[error("unexpected knowledge source response: {0}")]
    MalformedResponse(String),
}

/// External encyclopedic knowledge source, queried in English
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn lookup(&self, english_query: &str) -> Result<KnowledgeResult, RetrievalError>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Knowledge source that never finds anything; used when retrieval is disabled
pub struct NoKnowledgeSource;

#[async_trait]
impl KnowledgeSource for NoKnowledgeSource {
    async fn lookup(&self, _english_query: &str) -> Result<KnowledgeResult, RetrievalError> {
        Ok(KnowledgeResult::not_found())
    }

    fn name(&self) -> &str {
        "none"
    }
}

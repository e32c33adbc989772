//! Retrieve Context use case.
//!
//! Turns a [`KnowledgeSource`] lookup into a [`ContextSnippet`]. This step is
//! total: "not found" and transport failures both yield the unusable
//! sentinel, the latter with a warning.

use crate::ports::knowledge_source::KnowledgeSource;
use lingua_domain::ContextSnippet;
use lingua_domain::core::string::preview;
use std::sync::Arc;
use tracing::{debug, warn};

/// Best-effort context retriever
#[derive(Clone)]
pub struct ContextRetriever {
    source: Arc<dyn KnowledgeSource>,
}

impl ContextRetriever {
    pub fn new(source: Arc<dyn KnowledgeSource>) -> Self {
        Self { source }
    }

    /// Look up background for an English query. Never fails.
    pub async fn retrieve(&self, english_query: &str) -> ContextSnippet {
        match self.source.lookup(english_query).await {
            Ok(result) if result.found => {
                let snippet = ContextSnippet::found(result.text);
                debug!(
                    "Context from {} ({} usable): {}",
                    self.source.name(),
                    if snippet.is_usable() { "is" } else { "not" },
                    preview(&snippet.text, 80)
                );
                snippet
            }
            Ok(_) => {
                debug!("No context found in {} for query", self.source.name());
                ContextSnippet::unusable()
            }
            Err(e) => {
                warn!("Context retrieval from {} failed: {}", self.source.name(), e);
                ContextSnippet::unusable()
            }
        }
    }
}

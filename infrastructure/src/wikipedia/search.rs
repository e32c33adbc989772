//! Wikipedia lookup via the MediaWiki Action API.
//!
//! One request does search and extraction together:
//! `generator=search` finds the best-matching article and `prop=extracts`
//! returns its plain-text introduction (`exintro`, `explaintext`), cut to
//! `exsentences` sentences.
//!
//! With `formatversion=2` the response is:
//!
//! ```json
//! { "query": { "pages": [ { "title": "Paris", "index": 1, "extract": "Paris is ..." } ] } }
//! ```
//!
//! and has no `query` key at all when nothing matched.

use async_trait::async_trait;
use lingua_application::ports::knowledge_source::{
    KnowledgeResult, KnowledgeSource, RetrievalError,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Wikipedia asks API clients for a descriptive agent with contact details.
const USER_AGENT: &str = concat!(
    "lingua-qa/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/lingua-qa/lingua-qa)"
);

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    /// Search rank; 1 is the best match
    #[serde(default)]
    index: Option<u32>,
    #[serde(default)]
    extract: Option<String>,
}

/// Settings for [`WikipediaKnowledgeSource`]
#[derive(Debug, Clone)]
pub struct WikipediaConfig {
    /// `api.php` URL of the wiki to search
    pub api_url: String,
    /// Leading sentences to keep; 0 keeps the whole introduction
    pub sentences: u32,
    pub timeout: Duration,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            sentences: 3,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Knowledge source backed by Wikipedia article introductions
pub struct WikipediaKnowledgeSource {
    client: Client,
    config: WikipediaConfig,
}

impl WikipediaKnowledgeSource {
    pub fn new(config: WikipediaConfig) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn query_params<'a>(&self, query: &'a str, sentences: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("generator", "search"),
            ("gsrsearch", query),
            ("gsrlimit", "1"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("redirects", "1"),
        ];
        if self.config.sentences > 0 {
            params.push(("exsentences", sentences));
        }
        params
    }
}

/// Pick the best-ranked page's extract
fn parse_lookup(body: &str) -> Result<KnowledgeResult, RetrievalError> {
    let response: QueryResponse =
        serde_json::from_str(body).map_err(|e| RetrievalError::MalformedResponse(e.to_string()))?;

    let best = response
        .query
        .map(|q| q.pages)
        .unwrap_or_default()
        .into_iter()
        .min_by_key(|page| page.index.unwrap_or(u32::MAX));

    match best {
        Some(page) => match page.extract {
            Some(extract) if !extract.trim().is_empty() => {
                debug!("Wikipedia match: {}", page.title);
                Ok(KnowledgeResult::found(extract.trim()))
            }
            _ => Ok(KnowledgeResult::not_found()),
        },
        None => Ok(KnowledgeResult::not_found()),
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaKnowledgeSource {
    async fn lookup(&self, english_query: &str) -> Result<KnowledgeResult, RetrievalError> {
        if english_query.trim().is_empty() {
            return Ok(KnowledgeResult::not_found());
        }

        let sentences = self.config.sentences.to_string();
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&self.query_params(english_query, &sentences))
            .send()
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;
        parse_lookup(&body)
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

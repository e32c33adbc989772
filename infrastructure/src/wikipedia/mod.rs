//! Wikipedia adapter for the [`KnowledgeSource`](lingua_application::KnowledgeSource) port.

pub mod search;

pub use search::{WikipediaConfig, WikipediaKnowledgeSource};

//! Threshold-gated answer prompt

use crate::context::snippet::ContextSnippet;
use serde::{Deserialize, Serialize};

/// Which shape of prompt was built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// A usable context snippet is appended as supplementary material
    WithContextHint,
    /// No context section; the instruction alone governs the answer
    GeneralKnowledgeOnly,
}

impl PromptVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVariant::WithContextHint => "with_context_hint",
            PromptVariant::GeneralKnowledgeOnly => "general_knowledge_only",
        }
    }

    /// Variant selection: context usability is the only input
    pub fn for_context(context: &ContextSnippet) -> Self {
        if context.is_usable() {
            PromptVariant::WithContextHint
        } else {
            PromptVariant::GeneralKnowledgeOnly
        }
    }
}

impl std::fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prompt built for one request. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub variant: PromptVariant,
}

/// Templates for the answer prompt
pub struct PromptTemplate;

impl PromptTemplate {
    /// Label that introduces the context section
    pub const CONTEXT_LABEL: &'static str = "Context: ";

    /// Base instruction followed by the question, embedded verbatim
    pub fn instruction(question: &str) -> String {
        format!(
            "Provide a very concise and accurate answer to the following question, ideally in 1-2 sentences. \
**Always give a direct, factual answer.** \
Use the provided context to add relevant details or when your general knowledge is insufficient. \
Do not state that you lack current information, internet access, or that the answer is not in the context. \
Answer in the original language of the question ('{question}') if possible, otherwise in English.\n\n\
Question: '{question}'\n\n"
        )
    }

    /// Build the prompt for `question` (original language, as received),
    /// appending `context` only when it is usable
    pub fn build(question: &str, context: &ContextSnippet) -> Prompt {
        let variant = PromptVariant::for_context(context);
        let mut text = Self::instruction(question);
        if variant == PromptVariant::WithContextHint {
            text.push_str(&format!("{}'{}'", Self::CONTEXT_LABEL, context.text));
        }
        Prompt { text, variant }
    }
}

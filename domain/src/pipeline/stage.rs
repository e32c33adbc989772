//! Stages of one question-answering request

use serde::{Deserialize, Serialize};

/// Stage of a pipeline request
///
/// `Idle → Detecting → Normalizing → RetrievingContext → Generating →
/// Translating → Done | Failed`. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Detecting,
    Normalizing,
    RetrievingContext,
    Generating,
    Translating,
    Done,
    Failed,
}

impl PipelineStage {
    /// The working stages, in execution order
    pub const WORKING: [PipelineStage; 5] = [
        PipelineStage::Detecting,
        PipelineStage::Normalizing,
        PipelineStage::RetrievingContext,
        PipelineStage::Generating,
        PipelineStage::Translating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Detecting => "detecting",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::RetrievingContext => "retrieving_context",
            PipelineStage::Generating => "generating",
            PipelineStage::Translating => "translating",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::Detecting => "Language detection",
            PipelineStage::Normalizing => "Query normalization",
            PipelineStage::RetrievingContext => "Context retrieval",
            PipelineStage::Generating => "Answer generation",
            PipelineStage::Translating => "Answer translation",
            PipelineStage::Done => "Done",
            PipelineStage::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }

    /// The stage that follows on success, `None` for terminal stages
    pub fn next(&self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Idle => Some(PipelineStage::Detecting),
            PipelineStage::Detecting => Some(PipelineStage::Normalizing),
            PipelineStage::Normalizing => Some(PipelineStage::RetrievingContext),
            PipelineStage::RetrievingContext => Some(PipelineStage::Generating),
            PipelineStage::Generating => Some(PipelineStage::Translating),
            PipelineStage::Translating => Some(PipelineStage::Done),
            PipelineStage::Done | PipelineStage::Failed => None,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

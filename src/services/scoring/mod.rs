// Scoring Module
// Text scoring core logic organized into specialized submodules:
// - similarity: pairwise multi-signal similarity between two texts
// - markers: linguistic AI-authorship markers over one text
// - orchestrator: corpus-level evaluation combining both engines

pub mod markers;
pub mod orchestrator;
pub mod similarity;

use thiserror::Error;

/// Configuration problems rejected at engine construction, never at call
/// time. Scoring itself is total and does not produce errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{context} must sum to 1.0, got {sum}")]
    BadWeightSum { context: &'static str, sum: f64 },
    #[error("weight {name} out of range [0, 1]: {value}")]
    WeightOutOfRange { name: &'static str, value: f64 },
    #[error("marker weights must sum to at most 1.0, got {sum}")]
    MarkerWeightSumTooLarge { sum: f64 },
    #[error("marker weight set is empty")]
    EmptyMarkerWeights,
    #[error("n-gram size must be at least 1")]
    InvalidNgramSize,
    #[error("threshold {name} out of range [0, 1]: {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("iteration budget must be at least 1")]
    ZeroIterationBudget,
}

// Re-export commonly used items
pub use markers::{AiMarkerEngine, MarkerWeights};
pub use orchestrator::{OrchestratorConfig, ScoringOrchestrator};
pub use similarity::{sequence_ratio, SimilarityEngine, SimilarityWeights};

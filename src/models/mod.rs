// Veritext Data Models
// Report and value types shared across the scoring services

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============ Reference Documents ============

/// Externally owned document the engine scores against.
/// The core only reads `content`; ownership stays with the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDocument {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl ReferenceDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

// ============ Similarity ============

/// Component-level breakdown of a pairwise similarity computation.
/// Every field is in [0, 1]; `combined_score` is a convex combination
/// of the four components.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    pub sequence_ratio: f64,
    pub ngram_ratio: f64,
    pub word_overlap_ratio: f64,
    pub frequency_cosine: f64,
    pub combined_score: f64,
}

// ============ AI Markers ============

/// Fixed set of independent linguistic signals contributing to the
/// AI-likelihood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiMarker {
    FormalTransitions,
    RepetitiveStructure,
    PassiveVoice,
    HedgingLanguage,
    Complexity,
    VocabularyDiversity,
    ConclusionMarkers,
    SentenceLengthVariance,
    PunctuationDensity,
    RareWordUsage,
}

impl AiMarker {
    /// All markers in canonical order.
    pub const ALL: [AiMarker; 10] = [
        AiMarker::FormalTransitions,
        AiMarker::RepetitiveStructure,
        AiMarker::PassiveVoice,
        AiMarker::HedgingLanguage,
        AiMarker::Complexity,
        AiMarker::VocabularyDiversity,
        AiMarker::ConclusionMarkers,
        AiMarker::SentenceLengthVariance,
        AiMarker::PunctuationDensity,
        AiMarker::RareWordUsage,
    ];
}

/// Marker name -> score in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarkerReport {
    pub scores: BTreeMap<AiMarker, f64>,
}

impl MarkerReport {
    pub fn get(&self, marker: AiMarker) -> f64 {
        self.scores.get(&marker).copied().unwrap_or(0.0)
    }
}

// ============ Evaluation ============

/// Risk band derived from the maximum similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Clean,
    Suspicious,
    Plagiarized,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            Self::Clean
        } else if score < 0.6 {
            Self::Suspicious
        } else {
            Self::Plagiarized
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Clean => "Text appears to be original",
            Self::Suspicious => "Text shows some similarity - review recommended",
            Self::Plagiarized => "Text shows high similarity - plagiarism likely",
        }
    }
}

/// One reference document scoring at or above the plagiarism threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMatch {
    pub document_id: String,
    pub title: String,
    pub similarity: f64,
    pub details: SimilarityReport,
}

/// Combined plagiarism + AI-authorship risk report for one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub request_id: String,
    pub plagiarism_score: f64,
    pub ai_score: f64,
    pub is_plagiarized: bool,
    pub is_ai_generated: bool,
    pub overall_risk: f64,
    pub status: RiskBand,
    pub recommendation: String,
    pub matches: Vec<DocumentMatch>,
    pub markers: MarkerReport,
}

// ============ Rewrite ============

/// Terminal state of a rewrite run. Both are successful completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteState {
    /// Similarity to the original dropped to or below the target.
    Converged,
    /// Iteration budget used up; best-effort text returned.
    Exhausted,
}

/// Per-iteration snapshot of the rewrite loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    pub iteration: usize,
    pub similarity_to_original: f64,
    pub text_length: usize,
}

/// Result of one rewrite invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutcome {
    pub final_text: String,
    pub state: RewriteState,
    pub final_similarity: f64,
    pub methods_applied: Vec<String>,
    pub iteration_log: Vec<IterationRecord>,
}

// Scoring Orchestrator
// Composes the similarity and marker engines against a corpus of reference
// documents and returns a combined risk report. Per-document similarity is
// data-parallel; results are gathered before sorting so match ordering is
// deterministic.

use crate::models::{DocumentMatch, EvaluationReport, ReferenceDocument, RiskBand};
use super::markers::AiMarkerEngine;
use super::similarity::SimilarityEngine;
use super::ConfigError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorConfig {
    /// Combined similarity at or above this flags a document as plagiarized.
    #[serde(default = "default_plagiarism_threshold")]
    pub plagiarism_threshold: f64,
    /// AI score at or above this flags the text as AI-generated.
    #[serde(default = "default_ai_threshold")]
    pub ai_threshold: f64,
    /// Texts shorter than this (after trimming) are excluded from
    /// comparison and contribute 0.0.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            plagiarism_threshold: default_plagiarism_threshold(),
            ai_threshold: default_ai_threshold(),
            min_text_length: default_min_text_length(),
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.plagiarism_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "plagiarismThreshold",
                value: self.plagiarism_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.ai_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "aiThreshold",
                value: self.ai_threshold,
            });
        }
        Ok(())
    }
}

fn default_plagiarism_threshold() -> f64 { 0.25 }
fn default_ai_threshold() -> f64 { 0.45 }
fn default_min_text_length() -> usize { 10 }

pub struct ScoringOrchestrator {
    similarity: SimilarityEngine,
    markers: AiMarkerEngine,
    config: OrchestratorConfig,
}

impl ScoringOrchestrator {
    pub fn new(
        similarity: SimilarityEngine,
        markers: AiMarkerEngine,
        config: OrchestratorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            similarity,
            markers,
            config,
        })
    }

    /// Canonical similarity weighting, core marker preset, default thresholds.
    pub fn with_defaults() -> Self {
        let config = OrchestratorConfig::default();
        let markers = AiMarkerEngine::core().with_min_text_length(config.min_text_length);
        Self::new(SimilarityEngine::canonical(), markers, config).expect("default config")
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Score one text against the reference corpus and its own linguistic
    /// markers. Total: an empty corpus or a too-short text yields zero
    /// scores, never an error.
    pub fn evaluate(&self, text: &str, docs: &[ReferenceDocument]) -> EvaluationReport {
        let request_id = Uuid::new_v4().to_string();
        let min_len = self.config.min_text_length;
        let query_eligible = text.trim().chars().count() >= min_len;

        let mut scored: Vec<(usize, crate::models::SimilarityReport)> = if query_eligible {
            docs.par_iter()
                .enumerate()
                .filter(|(_, doc)| doc.content.trim().chars().count() >= min_len)
                .map(|(idx, doc)| (idx, self.similarity.similarity(text, &doc.content)))
                .collect()
        } else {
            Vec::new()
        };

        let plagiarism_score = scored
            .iter()
            .map(|(_, r)| r.combined_score)
            .fold(0.0_f64, f64::max);

        scored.retain(|(_, r)| r.combined_score >= self.config.plagiarism_threshold);
        scored.sort_by(|a, b| {
            b.1.combined_score
                .partial_cmp(&a.1.combined_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let matches: Vec<DocumentMatch> = scored
            .into_iter()
            .map(|(idx, report)| DocumentMatch {
                document_id: docs[idx].id.clone(),
                title: docs[idx].title.clone(),
                similarity: report.combined_score,
                details: report,
            })
            .collect();

        let ai_score = self.markers.ai_score(text);
        let marker_report = self.markers.analyze_markers(text);
        let status = RiskBand::from_score(plagiarism_score);

        info!(
            request_id = %request_id,
            plagiarism_score,
            ai_score,
            matches = matches.len(),
            "orchestrator.evaluate"
        );

        EvaluationReport {
            request_id,
            plagiarism_score,
            ai_score,
            is_plagiarized: plagiarism_score >= self.config.plagiarism_threshold,
            is_ai_generated: ai_score >= self.config.ai_threshold,
            overall_risk: plagiarism_score.max(ai_score),
            status,
            recommendation: status.recommendation().to_string(),
            matches,
            markers: marker_report,
        }
    }
}

impl Default for ScoringOrchestrator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// AI Marker Engine
// A fixed battery of independent linguistic markers computed over one text
// and combined into an AI-likelihood score. Every marker clamps itself to
// [0, 1] and degrades to 0.0 on empty input.

use crate::models::{AiMarker, MarkerReport};
use crate::services::text_normalizer::TextUnit;
use super::ConfigError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

const WEIGHT_EPSILON: f64 = 1e-6;
const DEFAULT_MIN_TEXT_LENGTH: usize = 10;

// ============================================================================
// Marker vocabularies
// ============================================================================

const FORMAL_TRANSITIONS: &[&str] = &[
    "furthermore", "moreover", "in addition", "consequently", "therefore", "thus", "hence",
    "additionally", "notably", "significantly", "importantly", "ultimately", "essentially",
];

const CONCLUSION_MARKERS: &[&str] = &[
    "in conclusion", "to conclude", "in summary", "to summarize", "ultimately", "in essence",
    "in short",
];

const RARE_WORDS: &[&str] = &[
    "aforementioned", "notwithstanding", "heretofore", "henceforth", "erstwhile", "perchance",
    "betwixt", "thenceforth",
];

fn passive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(is|are|was|were|be|been|being)\s+\w+ed\b").expect("passive regex")
    })
}

fn hedging_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(may|might|could|possibly|arguably|somewhat|relatively|rather|quite|seems|appears|tends)\b",
        )
        .expect("hedging regex")
    })
}

fn clause_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,;:]").expect("clause punctuation regex"))
}

// ============================================================================
// Weight presets
// ============================================================================

/// Weighted subset of markers contributing to the combined AI score.
/// Weights must each lie in [0, 1] and sum to at most 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerWeights {
    weights: BTreeMap<AiMarker, f64>,
}

impl MarkerWeights {
    /// 7-marker preset; weights sum to 1.0.
    pub fn core() -> Self {
        let weights = BTreeMap::from([
            (AiMarker::FormalTransitions, 0.20),
            (AiMarker::RepetitiveStructure, 0.20),
            (AiMarker::PassiveVoice, 0.15),
            (AiMarker::HedgingLanguage, 0.15),
            (AiMarker::Complexity, 0.15),
            (AiMarker::VocabularyDiversity, 0.10),
            (AiMarker::ConclusionMarkers, 0.05),
        ]);
        Self { weights }
    }

    /// 10-marker extended preset; weights sum to 1.0.
    pub fn extended() -> Self {
        let weights = BTreeMap::from([
            (AiMarker::FormalTransitions, 0.15),
            (AiMarker::RepetitiveStructure, 0.15),
            (AiMarker::PassiveVoice, 0.12),
            (AiMarker::HedgingLanguage, 0.12),
            (AiMarker::Complexity, 0.12),
            (AiMarker::VocabularyDiversity, 0.10),
            (AiMarker::ConclusionMarkers, 0.08),
            (AiMarker::SentenceLengthVariance, 0.08),
            (AiMarker::PunctuationDensity, 0.05),
            (AiMarker::RareWordUsage, 0.03),
        ]);
        Self { weights }
    }

    /// Caller-supplied weight set, validated up front.
    pub fn custom(weights: BTreeMap<AiMarker, f64>) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::EmptyMarkerWeights);
        }
        for &w in weights.values() {
            if !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::WeightOutOfRange {
                    name: "marker",
                    value: w,
                });
            }
        }
        let sum: f64 = weights.values().sum();
        if sum > 1.0 + WEIGHT_EPSILON {
            return Err(ConfigError::MarkerWeightSumTooLarge { sum });
        }
        Ok(Self { weights })
    }

    pub fn get(&self, marker: AiMarker) -> f64 {
        self.weights.get(&marker).copied().unwrap_or(0.0)
    }
}

impl Default for MarkerWeights {
    fn default() -> Self {
        Self::core()
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Computes the marker battery and the weighted AI-likelihood score.
/// Stateless after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct AiMarkerEngine {
    weights: MarkerWeights,
    min_text_length: usize,
}

impl Default for AiMarkerEngine {
    fn default() -> Self {
        Self::core()
    }
}

impl AiMarkerEngine {
    pub fn new(weights: MarkerWeights) -> Self {
        Self {
            weights,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    pub fn core() -> Self {
        Self::new(MarkerWeights::core())
    }

    pub fn extended() -> Self {
        Self::new(MarkerWeights::extended())
    }

    pub fn with_min_text_length(mut self, min: usize) -> Self {
        self.min_text_length = min;
        self
    }

    /// Every marker score for one text. Empty input yields an all-zero
    /// report rather than an error.
    pub fn analyze_markers(&self, text: &str) -> MarkerReport {
        let mut report = MarkerReport::default();
        if text.trim().is_empty() {
            for marker in AiMarker::ALL {
                report.scores.insert(marker, 0.0);
            }
            return report;
        }

        let text_lower = text.to_lowercase();
        let unit = TextUnit::new(text);
        let sents = &unit.sentences;
        let sentence_count = sents.len().max(1) as f64;

        // 1. Formal transitions, normalized by sentence count
        let transition_count: usize = FORMAL_TRANSITIONS
            .iter()
            .map(|t| text_lower.matches(t).count())
            .sum();
        report.scores.insert(
            AiMarker::FormalTransitions,
            (transition_count as f64 / sentence_count * 0.5).min(1.0),
        );

        // 2. Repetitive structure: modal first-word frequency across
        //    sentences. Texts with three or fewer sentences score 0.
        let repetitive = if sents.len() > 3 {
            let mut starts: BTreeMap<&str, usize> = BTreeMap::new();
            for s in sents {
                let first = s.split_whitespace().next().unwrap_or("");
                *starts.entry(first).or_insert(0) += 1;
            }
            let modal = starts.values().copied().max().unwrap_or(0);
            (modal as f64 / sents.len() as f64 * 0.8).min(1.0)
        } else {
            0.0
        };
        report.scores.insert(AiMarker::RepetitiveStructure, repetitive);

        // 3. Passive voice constructions per sentence
        let passive_count = passive_re().find_iter(&text_lower).count();
        report.scores.insert(
            AiMarker::PassiveVoice,
            (passive_count as f64 / sentence_count * 0.6).min(1.0),
        );

        // 4. Hedging vocabulary per sentence
        let hedging_count = hedging_re().find_iter(&text_lower).count();
        report.scores.insert(
            AiMarker::HedgingLanguage,
            (hedging_count as f64 / sentence_count * 0.4).min(1.0),
        );

        // 5. Complexity: average word length vs a 6-char baseline and
        //    average sentence length vs a 20-word baseline, half each
        let word_count = unit.words.len().max(1) as f64;
        let avg_word_len =
            unit.words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count;
        let avg_sentence_len = unit.words.len() as f64 / sentence_count;
        report.scores.insert(
            AiMarker::Complexity,
            ((avg_word_len / 6.0) * 0.5 + (avg_sentence_len / 20.0) * 0.5).min(1.0),
        );

        // 6. Vocabulary diversity; higher diversity counts toward AI here
        let token_total: usize = unit.frequencies.values().sum();
        let diversity = unit.frequencies.len() as f64 / token_total.max(1) as f64;
        report
            .scores
            .insert(AiMarker::VocabularyDiversity, (diversity * 1.5).min(1.0));

        // 7. Explicit conclusion markers
        let conclusion_count: usize = CONCLUSION_MARKERS
            .iter()
            .map(|c| text_lower.matches(c).count())
            .sum();
        report.scores.insert(
            AiMarker::ConclusionMarkers,
            (conclusion_count as f64 * 0.3).min(1.0),
        );

        // 8. Sentence-length variance (standard deviation of word counts)
        let variance_score = if sents.len() > 1 {
            let lengths: Vec<f64> = sents
                .iter()
                .map(|s| s.split_whitespace().count() as f64)
                .collect();
            let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
            let variance =
                lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
            (variance.sqrt() / 10.0).min(1.0)
        } else {
            0.0
        };
        report
            .scores
            .insert(AiMarker::SentenceLengthVariance, variance_score);

        // 9. Clause punctuation density per sentence
        let punct_count = clause_punct_re().find_iter(text).count();
        report.scores.insert(
            AiMarker::PunctuationDensity,
            (punct_count as f64 / sentence_count * 0.3).min(1.0),
        );

        // 10. Archaic / rare vocabulary
        let rare_count: usize = RARE_WORDS
            .iter()
            .map(|w| text_lower.matches(w).count())
            .sum();
        report
            .scores
            .insert(AiMarker::RareWordUsage, (rare_count as f64 * 0.2).min(1.0));

        report
    }

    /// Weighted combination of the configured marker subset, clamped to
    /// [0, 1]. Texts below the minimum length score 0.0.
    pub fn ai_score(&self, text: &str) -> f64 {
        if text.trim().chars().count() < self.min_text_length {
            return 0.0;
        }

        let report = self.analyze_markers(text);
        let score: f64 = AiMarker::ALL
            .iter()
            .map(|&m| report.get(m) * self.weights.get(m))
            .sum();
        let score = score.min(1.0);
        debug!(score, "markers.ai_score");
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAL: &str = "Furthermore, it may be argued that the methodology was validated and consequently the results were corroborated. Furthermore, the parameters could be calibrated and thus the framework was constructed. Furthermore, the limitations might be acknowledged and hence the assumptions were examined. Furthermore, the outcomes could be replicated and therefore the claims were substantiated. Ultimately, in conclusion, the findings may be confirmed and the hypothesis was validated.";

    const CASUAL: &str = "I went to the store yesterday and grabbed some milk. My dog chased a squirrel on the way home. We laughed about it all afternoon.";

    #[test]
    fn test_empty_text_scores_zero() {
        let engine = AiMarkerEngine::core();
        assert_eq!(engine.ai_score(""), 0.0);
        assert_eq!(engine.ai_score("   "), 0.0);
        let report = engine.analyze_markers("");
        for marker in AiMarker::ALL {
            assert_eq!(report.get(marker), 0.0);
        }
    }

    #[test]
    fn test_formal_passive_text_scores_high() {
        assert!(AiMarkerEngine::core().ai_score(FORMAL) > 0.6);
        assert!(AiMarkerEngine::extended().ai_score(FORMAL) > 0.6);
    }

    #[test]
    fn test_casual_narrative_scores_low() {
        assert!(AiMarkerEngine::core().ai_score(CASUAL) < 0.3);
    }

    #[test]
    fn test_all_markers_bounded() {
        let engine = AiMarkerEngine::extended();
        for text in [FORMAL, CASUAL, "one.", "a, b; c: d."] {
            let report = engine.analyze_markers(text);
            for marker in AiMarker::ALL {
                let v = report.get(marker);
                assert!((0.0..=1.0).contains(&v), "{marker:?}={v} for {text:?}");
            }
        }
    }

    #[test]
    fn test_repetitive_structure_needs_four_sentences() {
        let engine = AiMarkerEngine::core();
        let three = "The cat sat. The dog ran. The bird flew.";
        assert_eq!(
            engine.analyze_markers(three).get(AiMarker::RepetitiveStructure),
            0.0
        );
        let four = "The cat sat. The dog ran. The bird flew. The fish swam.";
        let score = engine.analyze_markers(four).get(AiMarker::RepetitiveStructure);
        assert!((score - 0.8).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_rare_word_marker() {
        let engine = AiMarkerEngine::extended();
        let report = engine
            .analyze_markers("The aforementioned results hold notwithstanding the caveats raised heretofore.");
        assert!((report.get(AiMarker::RareWordUsage) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights_validated() {
        let overweight = BTreeMap::from([
            (AiMarker::FormalTransitions, 0.8),
            (AiMarker::PassiveVoice, 0.5),
        ]);
        assert!(matches!(
            MarkerWeights::custom(overweight),
            Err(ConfigError::MarkerWeightSumTooLarge { .. })
        ));
        assert!(matches!(
            MarkerWeights::custom(BTreeMap::new()),
            Err(ConfigError::EmptyMarkerWeights)
        ));

        let partial = BTreeMap::from([
            (AiMarker::FormalTransitions, 0.5),
            (AiMarker::PassiveVoice, 0.3),
        ]);
        assert!(MarkerWeights::custom(partial).is_ok());
    }

    #[test]
    fn test_score_respects_weight_subset() {
        // A weight set covering only one marker ignores all others.
        let weights =
            MarkerWeights::custom(BTreeMap::from([(AiMarker::RareWordUsage, 1.0)])).unwrap();
        let engine = AiMarkerEngine::new(weights);
        let score = engine.ai_score("Furthermore, the results were validated and corroborated.");
        assert_eq!(score, 0.0);
    }
}

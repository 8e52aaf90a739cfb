// Similarity Engine
// Four independent similarity signals between two texts combined into one
// plagiarism-likelihood score. Every component is symmetric, in [0, 1] and
// total: empty or whitespace-only input scores 0.0, never an error.

use crate::models::SimilarityReport;
use crate::services::text_normalizer::{word_frequencies, words};
use super::ConfigError;
use std::collections::{HashMap, HashSet};
use tracing::debug;

const WEIGHT_EPSILON: f64 = 1e-6;

/// Convex weighting over the four similarity components.
/// Weights must sum to 1.0; validated at engine construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub sequence: f64,
    pub ngram: f64,
    pub word_overlap: f64,
    pub frequency_cosine: f64,
    /// Window size for the n-gram component.
    pub ngram_size: usize,
}

impl SimilarityWeights {
    /// Canonical weighting used across the system:
    /// sequence 0.35, 4-gram 0.30, word overlap 0.20, cosine 0.15.
    pub fn canonical() -> Self {
        Self {
            sequence: 0.35,
            ngram: 0.30,
            word_overlap: 0.20,
            frequency_cosine: 0.15,
            ngram_size: 4,
        }
    }

    /// Stricter weighting for database-only similarity assessment:
    /// sequence 0.50, 3-gram 0.30, word overlap 0.20, no cosine term.
    pub fn database() -> Self {
        Self {
            sequence: 0.50,
            ngram: 0.30,
            word_overlap: 0.20,
            frequency_cosine: 0.0,
            ngram_size: 3,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.sequence + self.ngram + self.word_overlap + self.frequency_cosine;
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ConfigError::BadWeightSum {
                context: "similarity weights",
                sum,
            });
        }
        for (name, w) in [
            ("sequence", self.sequence),
            ("ngram", self.ngram),
            ("wordOverlap", self.word_overlap),
            ("frequencyCosine", self.frequency_cosine),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::WeightOutOfRange { name, value: w });
            }
        }
        if self.ngram_size == 0 {
            return Err(ConfigError::InvalidNgramSize);
        }
        Ok(())
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Computes pairwise text similarity reports. Stateless after construction;
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    weights: SimilarityWeights,
    /// Per-text word cap for the quadratic fuzzy word match.
    fuzzy_word_cap: usize,
}

impl SimilarityEngine {
    pub fn new(weights: SimilarityWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self {
            weights,
            fuzzy_word_cap: 50,
        })
    }

    pub fn canonical() -> Self {
        // Preset weights are known-valid.
        Self::new(SimilarityWeights::canonical()).expect("canonical preset")
    }

    pub fn database() -> Self {
        Self::new(SimilarityWeights::database()).expect("database preset")
    }

    pub fn with_fuzzy_word_cap(mut self, cap: usize) -> Self {
        self.fuzzy_word_cap = cap;
        self
    }

    pub fn weights(&self) -> SimilarityWeights {
        self.weights
    }

    /// Full component breakdown plus combined score for one text pair.
    pub fn similarity(&self, a: &str, b: &str) -> SimilarityReport {
        let sequence = sequence_ratio(a, b);
        let ngram = ngram_ratio(a, b, self.weights.ngram_size);
        let word = word_overlap_ratio(a, b);
        let cosine = frequency_cosine(a, b);

        let combined = sequence * self.weights.sequence
            + ngram * self.weights.ngram
            + word * self.weights.word_overlap
            + cosine * self.weights.frequency_cosine;

        debug!(
            sequence,
            ngram, word, cosine, combined, "similarity.components"
        );

        SimilarityReport {
            sequence_ratio: sequence,
            ngram_ratio: ngram,
            word_overlap_ratio: word,
            frequency_cosine: cosine,
            combined_score: combined.clamp(0.0, 1.0),
        }
    }

    /// Fraction of words in the shorter-capped prefixes that have a close
    /// per-word match in the other text. Quadratic, bounded by
    /// `fuzzy_word_cap` words per side. Catches typo-level variations the
    /// set-based components miss.
    pub fn fuzzy_word_match(&self, a: &str, b: &str) -> f64 {
        let words_a = words(a);
        let words_b = words(b);
        if words_a.is_empty() || words_b.is_empty() {
            return 0.0;
        }

        let cap = self.fuzzy_word_cap;
        let mut matches = 0usize;
        for w1 in words_a.iter().take(cap) {
            for w2 in words_b.iter().take(cap) {
                if word_similarity(w1, w2) > 0.85 {
                    matches += 1;
                    break;
                }
            }
        }
        matches as f64 / words_a.len().max(words_b.len()) as f64
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::canonical()
    }
}

// ============================================================================
// Component signals
// ============================================================================

/// Sequence-alignment similarity over the lowercased character sequences:
/// 2*M / T where M is the total matched length from the greedy
/// longest-matching-block recursion and T the combined length.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();
    let matched = total_matched(&a_chars, &b_chars);
    2.0 * matched as f64 / (a_chars.len() + b_chars.len()) as f64
}

fn total_matched(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut total = 0usize;
    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            queue.push((alo, i, blo, j));
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest contiguous matching block within the given ranges; ties break
/// toward the earliest block in `a`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0usize;
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, &c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_size)
}

/// Jaccard index of the contiguous n-word window sets from each text.
/// 0.0 when either text has fewer than `n` words.
pub fn ngram_ratio(a: &str, b: &str, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let grams_a = word_ngrams(a, n);
    let grams_b = word_ngrams(b, n);
    jaccard(&grams_a, &grams_b)
}

fn word_ngrams(text: &str, n: usize) -> HashSet<String> {
    let tokens = words(text);
    if tokens.len() < n {
        return HashSet::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// Jaccard index of the two lowercase word sets, unfiltered.
pub fn word_overlap_ratio(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = words(a).into_iter().collect();
    let set_b: HashSet<String> = words(b).into_iter().collect();
    jaccard(&set_a, &set_b)
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Cosine similarity of the word-count vectors over the shared vocabulary.
/// 0.0 when either vector has zero magnitude.
pub fn frequency_cosine(a: &str, b: &str) -> f64 {
    let freq_a = word_frequencies(a);
    let freq_b = word_frequencies(b);
    if freq_a.is_empty() || freq_b.is_empty() {
        return 0.0;
    }

    let dot: f64 = freq_a
        .iter()
        .filter_map(|(w, &c)| freq_b.get(w).map(|&d| (c * d) as f64))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }

    let mag_a: f64 = freq_a.values().map(|&c| (c * c) as f64).sum::<f64>().sqrt();
    let mag_b: f64 = freq_b.values().map(|&c| (c * c) as f64).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

/// Character-level similarity of two single words. Words shorter than
/// 3 chars only match exactly.
fn word_similarity(a: &str, b: &str) -> f64 {
    if a.chars().count() < 3 || b.chars().count() < 3 {
        return if a == b { 1.0 } else { 0.0 };
    }
    sequence_ratio(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_identical_texts_score_one() {
        let engine = SimilarityEngine::canonical();
        let report = engine.similarity(FOX, FOX);
        assert!((report.sequence_ratio - 1.0).abs() < 1e-9);
        assert!((report.ngram_ratio - 1.0).abs() < 1e-9);
        assert!((report.word_overlap_ratio - 1.0).abs() < 1e-9);
        assert!((report.frequency_cosine - 1.0).abs() < 1e-9);
        assert!((report.combined_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_texts_score_low() {
        let engine = SimilarityEngine::canonical();
        let report = engine.similarity(
            FOX,
            "Machine learning is a subset of artificial intelligence",
        );
        assert_eq!(report.ngram_ratio, 0.0);
        assert_eq!(report.word_overlap_ratio, 0.0);
        assert!(report.combined_score < 0.2);
    }

    #[test]
    fn test_near_duplicate_scores_high() {
        let engine = SimilarityEngine::canonical();
        let report = engine.similarity(
            "The quick brown fox jumps over the lazy dog and runs away",
            FOX,
        );
        assert!(report.combined_score > 0.7, "got {}", report.combined_score);
    }

    #[test]
    fn test_components_symmetric() {
        let engine = SimilarityEngine::canonical();
        let a = "the cat sat on the mat near the door";
        let b = "a dog sat on the mat by the gate";
        let ab = engine.similarity(a, b);
        let ba = engine.similarity(b, a);
        assert!((ab.sequence_ratio - ba.sequence_ratio).abs() < 1e-9);
        assert!((ab.ngram_ratio - ba.ngram_ratio).abs() < 1e-9);
        assert!((ab.word_overlap_ratio - ba.word_overlap_ratio).abs() < 1e-9);
        assert!((ab.frequency_cosine - ba.frequency_cosine).abs() < 1e-9);
        assert!((ab.combined_score - ba.combined_score).abs() < 1e-9);
    }

    #[test]
    fn test_components_bounded() {
        let engine = SimilarityEngine::canonical();
        let pairs = [
            ("", ""),
            ("   ", "x"),
            ("one two", "one two three four"),
            (FOX, "dog lazy the over jumps fox brown quick the"),
        ];
        for (a, b) in pairs {
            let r = engine.similarity(a, b);
            for v in [
                r.sequence_ratio,
                r.ngram_ratio,
                r.word_overlap_ratio,
                r.frequency_cosine,
                r.combined_score,
            ] {
                assert!((0.0..=1.0).contains(&v), "{v} out of range for ({a}, {b})");
            }
        }
    }

    #[test]
    fn test_empty_input_degrades_to_zero() {
        let engine = SimilarityEngine::canonical();
        let report = engine.similarity("", FOX);
        assert_eq!(report.sequence_ratio, 0.0);
        assert_eq!(report.combined_score, 0.0);
    }

    #[test]
    fn test_sequence_ratio_case_insensitive() {
        assert!((sequence_ratio("Hello World", "hello world") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_ratio_prefix() {
        // "abcd" vs "abxd": blocks "ab" and "d" -> 2*3/8
        assert!((sequence_ratio("abcd", "abxd") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ngram_ratio_short_text_is_zero() {
        assert_eq!(ngram_ratio("one two three", "one two three", 4), 0.0);
        assert!((ngram_ratio("one two three", "one two three", 3) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_overlap_partial() {
        // {a,b,c} vs {b,c,d}: 2 shared / 4 union
        assert!((word_overlap_ratio("a b c", "b c d") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_cosine_disjoint_vocab() {
        assert_eq!(frequency_cosine("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_bad_weights_rejected_at_construction() {
        let err = SimilarityEngine::new(SimilarityWeights {
            sequence: 0.5,
            ngram: 0.5,
            word_overlap: 0.5,
            frequency_cosine: 0.0,
            ngram_size: 3,
        });
        assert!(matches!(err, Err(ConfigError::BadWeightSum { .. })));
    }

    #[test]
    fn test_database_preset_ignores_cosine() {
        let engine = SimilarityEngine::database();
        let report = engine.similarity(FOX, FOX);
        assert!((report.combined_score - 1.0).abs() < 1e-9);
        assert_eq!(engine.weights().frequency_cosine, 0.0);
        assert_eq!(engine.weights().ngram_size, 3);
    }

    #[test]
    fn test_fuzzy_word_match_catches_typos() {
        let engine = SimilarityEngine::canonical();
        let score = engine.fuzzy_word_match(
            "the experiment produced remarkable results",
            "the experimant produced remarkible results",
        );
        assert!(score > 0.9, "got {score}");
        assert_eq!(engine.fuzzy_word_match("", "anything"), 0.0);
    }
}

// Rewrite Engine
// Iteratively mutates text away from its original wording until the
// sequence ratio against the original drops to a target, or the
// iteration budget runs out. Each iteration escalates to a more
// aggressive strategy.

mod paraphrase;
mod synonyms;

pub use synonyms::{BuiltinThesaurus, NullSynonymProvider, SynonymProvider};

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{IterationRecord, RewriteOutcome, RewriteState};
use crate::services::scoring::{sequence_ratio, ConfigError};

/// Words never considered for synonym substitution.
const SUBSTITUTION_EXCLUSIONS: &[&str] = &[
    "this", "that", "with", "from", "they", "them", "have", "been",
];

/// Synonym candidates retained per word in the lookup cache.
const SYNONYM_CACHE_WIDTH: usize = 5;

fn default_target_similarity() -> f64 {
    0.3
}

fn default_max_iterations() -> usize {
    5
}

/// Tunable parameters for a rewrite run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOptions {
    /// Stop once similarity to the original drops to or below this value.
    #[serde(default = "default_target_similarity")]
    pub target_similarity: f64,
    /// Mutation passes allowed before giving up.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            target_similarity: default_target_similarity(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl RewriteOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.target_similarity) || self.target_similarity.is_nan() {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "target_similarity",
                value: self.target_similarity,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationBudget);
        }
        Ok(())
    }
}

/// Drives the escalating rewrite loop against an injected synonym source.
pub struct RewriteEngine<P: SynonymProvider> {
    provider: P,
    options: RewriteOptions,
    rng: StdRng,
    synonym_cache: HashMap<String, Vec<String>>,
}

impl Default for RewriteEngine<BuiltinThesaurus> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RewriteEngine<BuiltinThesaurus> {
    /// Engine over the built-in thesaurus with default options.
    pub fn with_defaults() -> Self {
        Self::new(BuiltinThesaurus, RewriteOptions::default())
            .unwrap_or_else(|_| unreachable!("default options are valid"))
    }
}

impl<P: SynonymProvider> RewriteEngine<P> {
    pub fn new(provider: P, options: RewriteOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            provider,
            options,
            rng: StdRng::from_entropy(),
            synonym_cache: HashMap::new(),
        })
    }

    /// Replaces the entropy-seeded generator, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn options(&self) -> RewriteOptions {
        self.options
    }

    /// Rewrites `text` until its sequence ratio against the original
    /// drops to the target or the iteration budget is spent. The
    /// similarity check runs before each mutation, so text already at
    /// or below the target converges without being touched.
    pub fn rewrite(&mut self, text: &str) -> RewriteOutcome {
        let original = text;
        let mut current = text.to_string();
        let mut iteration_log = Vec::new();
        let mut methods_applied = Vec::new();
        let mut iteration = 0usize;

        let (state, final_similarity) = loop {
            let similarity = sequence_ratio(&current, original);
            iteration_log.push(IterationRecord {
                iteration,
                similarity_to_original: similarity,
                text_length: current.chars().count(),
            });
            if similarity <= self.options.target_similarity {
                break (RewriteState::Converged, similarity);
            }
            if iteration >= self.options.max_iterations {
                break (RewriteState::Exhausted, similarity);
            }
            let (next, method) = self.apply_strategy(iteration, &current);
            tracing::debug!(iteration, method, similarity, "rewrite pass");
            current = next;
            methods_applied.push(method.to_string());
            iteration += 1;
        };

        RewriteOutcome {
            final_text: current,
            state,
            final_similarity,
            methods_applied,
            iteration_log,
        }
    }

    /// Strategy ladder: light synonyms, then structure, then heavier
    /// synonyms, then splitting, then phrase-level polish.
    fn apply_strategy(&mut self, iteration: usize, text: &str) -> (String, &'static str) {
        match iteration {
            0 => (
                self.substitute_synonyms(text, 0.25),
                "light_synonym_substitution",
            ),
            1 => (
                paraphrase::structural_paraphrase(text),
                "structural_paraphrase",
            ),
            2 => (
                self.substitute_synonyms(text, 0.40),
                "intensive_synonym_substitution",
            ),
            3 => (paraphrase::split_long_sentences(text), "sentence_splitting"),
            _ => (paraphrase::simplify_academic_phrases(text), "final_polish"),
        }
    }

    /// Replaces a random `intensity` fraction of eligible words with a
    /// cached synonym, preserving capitalization and trailing punctuation.
    fn substitute_synonyms(&mut self, text: &str, intensity: f64) -> String {
        let rewritten: Vec<String> = text
            .split_whitespace()
            .map(|word| self.substitute_word(word, intensity))
            .collect();
        rewritten.join(" ")
    }

    fn substitute_word(&mut self, word: &str, intensity: f64) -> String {
        let clean: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();
        if clean.len() <= 3
            || SUBSTITUTION_EXCLUSIONS.contains(&clean.as_str())
            || self.rng.gen::<f64>() >= intensity
        {
            return word.to_string();
        }

        let candidates = self.synonyms_for(&clean);
        if candidates.is_empty() {
            return word.to_string();
        }
        let pick = candidates[self.rng.gen_range(0..candidates.len())].clone();

        let mut replacement = if word.chars().next().is_some_and(|c| c.is_uppercase()) {
            let mut chars = pick.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => pick,
            }
        } else {
            pick
        };
        let trailing: String = word
            .chars()
            .rev()
            .take_while(|c| !c.is_alphanumeric())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        replacement.push_str(&trailing);
        replacement
    }

    /// Filtered candidate list for one clean word, cached per engine.
    fn synonyms_for(&mut self, clean: &str) -> Vec<String> {
        if let Some(hit) = self.synonym_cache.get(clean) {
            return hit.clone();
        }
        let filtered: Vec<String> = self
            .provider
            .lookup(clean)
            .into_iter()
            .filter(|candidate| {
                let len_ratio = candidate.len() as f64 / clean.len() as f64;
                candidate.len() > 2
                    && !candidate.contains(char::is_whitespace)
                    && candidate.chars().all(|c| c.is_alphabetic())
                    && candidate != clean
                    && (0.5..=2.0).contains(&len_ratio)
            })
            .take(SYNONYM_CACHE_WIDTH)
            .collect();
        self.synonym_cache.insert(clean.to_string(), filtered.clone());
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. \
        Machine learning shows important results because computers learn from data, \
        although every method has problems.";

    fn engine(target: f64, max_iterations: usize) -> RewriteEngine<BuiltinThesaurus> {
        RewriteEngine::new(
            BuiltinThesaurus,
            RewriteOptions {
                target_similarity: target,
                max_iterations,
            },
        )
        .unwrap()
        .with_seed(7)
    }

    #[test]
    fn test_trivial_target_converges_without_mutation() {
        let outcome = engine(1.0, 5).rewrite(SAMPLE);
        assert_eq!(outcome.state, RewriteState::Converged);
        assert_eq!(outcome.final_text, SAMPLE);
        assert!(outcome.methods_applied.is_empty());
        assert_eq!(outcome.iteration_log.len(), 1);
        assert_eq!(outcome.iteration_log[0].iteration, 0);
    }

    #[test]
    fn test_unreachable_target_exhausts_ladder() {
        let outcome = engine(0.0, 5).rewrite(SAMPLE);
        assert_eq!(outcome.state, RewriteState::Exhausted);
        assert_eq!(
            outcome.methods_applied,
            vec![
                "light_synonym_substitution",
                "structural_paraphrase",
                "intensive_synonym_substitution",
                "sentence_splitting",
                "final_polish",
            ]
        );
        // One scoring record per mutation plus the final check.
        assert_eq!(outcome.iteration_log.len(), 6);
        assert!(outcome.final_similarity < 1.0);
    }

    #[test]
    fn test_final_similarity_matches_final_text() {
        let outcome = engine(0.0, 3).rewrite(SAMPLE);
        let recomputed = sequence_ratio(&outcome.final_text, SAMPLE);
        assert!((outcome.final_similarity - recomputed).abs() < 1e-12);
    }

    #[test]
    fn test_rewrite_drifts_away_from_original() {
        let outcome = engine(0.0, 5).rewrite(SAMPLE);
        let first = outcome.iteration_log.first().unwrap().similarity_to_original;
        let last = outcome.iteration_log.last().unwrap().similarity_to_original;
        assert_eq!(first, 1.0);
        assert!(last < first);
    }

    #[test]
    fn test_substitution_preserves_case_and_punctuation() {
        let mut eng = engine(0.0, 5);
        let out = eng.substitute_word("Important,", 1.0);
        assert_ne!(out, "Important,");
        assert!(out.ends_with(','));
        assert!(out.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn test_short_and_excluded_words_untouched() {
        let mut eng = engine(0.0, 5);
        assert_eq!(eng.substitute_word("fox", 1.0), "fox");
        assert_eq!(eng.substitute_word("from", 1.0), "from");
        assert_eq!(eng.substitute_word("been", 1.0), "been");
    }

    #[test]
    fn test_null_provider_substitution_is_noop() {
        let mut eng = RewriteEngine::new(NullSynonymProvider, RewriteOptions::default())
            .unwrap()
            .with_seed(7);
        let expected = SAMPLE.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(eng.substitute_synonyms(SAMPLE, 1.0), expected);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = engine(0.0, 5).rewrite(SAMPLE);
        let b = engine(0.0, 5).rewrite(SAMPLE);
        assert_eq!(a.final_text, b.final_text);
        assert_eq!(a.final_similarity, b.final_similarity);
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(RewriteOptions {
            target_similarity: 1.5,
            max_iterations: 5
        }
        .validate()
        .is_err());
        assert!(RewriteOptions {
            target_similarity: 0.3,
            max_iterations: 0
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_synonym_cache_capped() {
        let mut eng = engine(0.0, 5);
        let syns = eng.synonyms_for("important");
        assert!(!syns.is_empty());
        assert!(syns.len() <= SYNONYM_CACHE_WIDTH);
        // Cached on second lookup.
        assert_eq!(eng.synonyms_for("important"), syns);
    }
}

// Text Normalization Service
// Tokenization, lowercasing, stop-word filtering and sentence segmentation
// used by every scorer. All functions are pure and total: empty input
// yields empty containers, never an error.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Common English stop words removed by the filtered token stream.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9_]+").expect("word regex"))
}

fn punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("punctuation regex"))
}

fn sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence regex"))
}

/// Lowercase word sequence split on whitespace, punctuation left in place.
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Lowercase word sequence with punctuation stripped and stop words removed.
pub fn filtered_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let stripped = punct_re().replace_all(&lower, "");
    stripped
        .split_whitespace()
        .filter(|w| !stop_words().contains(w))
        .map(|w| w.to_string())
        .collect()
}

/// Filtered token stream joined by single spaces. This is the canonical
/// form fed into the content fingerprint.
pub fn normalized_join(text: &str) -> String {
    filtered_tokens(text).join(" ")
}

/// Sentence segmentation by splitting on `.` `!` `?` runs.
/// Empty and whitespace-only segments are discarded.
pub fn sentences(text: &str) -> Vec<String> {
    sentence_re()
        .split(text)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Word -> occurrence count over regex word tokens, lowercased.
pub fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let lower = text.to_lowercase();
    let mut freq = HashMap::new();
    for m in word_re().find_iter(&lower) {
        *freq.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    freq
}

/// Immutable per-call decomposition of one input text.
/// Built on demand, never persisted; lifetime is one scoring call.
#[derive(Debug, Clone)]
pub struct TextUnit {
    pub raw: String,
    pub words: Vec<String>,
    pub sentences: Vec<String>,
    pub frequencies: HashMap<String, usize>,
}

impl TextUnit {
    pub fn new(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            words: words(text),
            sentences: sentences(text),
            frequencies: word_frequencies(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_lowercase() {
        assert_eq!(words("The Quick Fox"), vec!["the", "quick", "fox"]);
        assert!(words("").is_empty());
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_filtered_tokens_strips_punctuation_and_stop_words() {
        let tokens = filtered_tokens("The quick, brown fox is fast!");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "fast"]);
    }

    #[test]
    fn test_normalized_join_invariant_under_case_and_punctuation() {
        assert_eq!(
            normalized_join("The Quick Brown Fox!"),
            normalized_join("quick brown fox")
        );
    }

    #[test]
    fn test_sentences_split_on_terminator_runs() {
        let sents = sentences("First one. Second one!! Third one?  ");
        assert_eq!(sents, vec!["First one", "Second one", "Third one"]);
        assert!(sentences("").is_empty());
        assert!(sentences("...").is_empty());
    }

    #[test]
    fn test_word_frequencies_counts() {
        let freq = word_frequencies("the cat and the dog");
        assert_eq!(freq["the"], 2);
        assert_eq!(freq["cat"], 1);
        assert!(word_frequencies("").is_empty());
    }

    #[test]
    fn test_text_unit_empty_input() {
        let unit = TextUnit::new("   ");
        assert!(unit.is_empty());
        assert!(unit.words.is_empty());
        assert!(unit.sentences.is_empty());
        assert!(unit.frequencies.is_empty());
    }
}

// Fingerprint Service
// Stable content identity for exact-duplicate detection. Two texts that
// differ only in case, punctuation, extra whitespace, or stop words map
// to the same fingerprint; any wording change maps to a different one.

use sha2::{Digest, Sha256};

use crate::services::text_normalizer;

/// Hex-encoded SHA-256 digest over the normalized form of `text`.
pub fn fingerprint(text: &str) -> String {
    let normalized = text_normalizer::normalized_join(text);
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// True when both texts reduce to the same normalized content.
pub fn is_exact_duplicate(a: &str, b: &str) -> bool {
    fingerprint(a) == fingerprint(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = fingerprint("The quick brown fox.");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_case_and_punctuation_invariant() {
        let a = fingerprint("The Quick Brown Fox jumps!");
        let b = fingerprint("the quick   brown fox, jumps");
        assert_eq!(a, b);
    }

    #[test]
    fn test_stop_word_invariant() {
        // "the" and "and" are dropped during normalization.
        let a = fingerprint("the fox jumps and the dog barks");
        let b = fingerprint("fox jumps dog barks");
        assert_eq!(a, b);
    }

    #[test]
    fn test_wording_change_changes_fingerprint() {
        assert_ne!(
            fingerprint("the fox jumps over the dog"),
            fingerprint("the fox leaps over the dog")
        );
        assert!(!is_exact_duplicate("alpha beta gamma", "alpha beta delta"));
    }

    #[test]
    fn test_empty_text_has_stable_fingerprint() {
        assert_eq!(fingerprint(""), fingerprint("   "));
    }
}

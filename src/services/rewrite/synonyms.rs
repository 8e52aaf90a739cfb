// Synonym Lookup
// Pluggable lexical-relation source for the rewrite engine. The engine
// degrades to no-op substitution whenever a lookup returns nothing.

use std::collections::HashMap;
use std::sync::OnceLock;

/// External synonym/thesaurus capability injected into the rewrite engine.
pub trait SynonymProvider: Send + Sync {
    /// Candidate synonyms for one lowercase word. An empty result is a
    /// valid answer, not an error.
    fn lookup(&self, word: &str) -> Vec<String>;
}

/// Built-in static thesaurus covering common English words. Small by
/// design; callers with a real lexical resource supply their own provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinThesaurus;

fn thesaurus() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static MAP: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    MAP.get_or_init(|| {
        let entries: &[(&str, &[&str])] = &[
            ("good", &["excellent", "fine", "solid"]),
            ("great", &["superb", "wonderful"]),
            ("important", &["significant", "crucial", "essential"]),
            ("easy", &["simple", "effortless"]),
            ("hard", &["difficult", "tough"]),
            ("fast", &["quick", "rapid", "swift"]),
            ("slow", &["gradual", "sluggish"]),
            ("big", &["large", "sizable", "huge"]),
            ("small", &["tiny", "compact", "little"]),
            ("happy", &["joyful", "glad", "pleased"]),
            ("sad", &["gloomy", "unhappy"]),
            ("beautiful", &["attractive", "lovely"]),
            ("smart", &["intelligent", "clever", "bright"]),
            ("show", &["reveal", "display", "exhibit"]),
            ("shows", &["reveals", "displays"]),
            ("make", &["create", "produce", "form"]),
            ("makes", &["creates", "produces"]),
            ("help", &["assist", "support"]),
            ("helps", &["assists", "supports"]),
            ("change", &["alter", "modify", "adjust"]),
            ("start", &["begin", "commence"]),
            ("result", &["outcome", "effect"]),
            ("results", &["outcomes", "effects"]),
            ("method", &["approach", "technique"]),
            ("methods", &["approaches", "techniques"]),
            ("study", &["analysis", "survey"]),
            ("learn", &["absorb", "grasp"]),
            ("computer", &["machine", "workstation"]),
            ("computers", &["machines", "workstations"]),
            ("enable", &["allow", "permit"]),
            ("enables", &["allows", "permits"]),
            ("decision", &["judgment", "choice"]),
            ("decisions", &["judgments", "choices"]),
            ("problem", &["issue", "difficulty"]),
            ("problems", &["issues", "difficulties"]),
            ("quick", &["fast", "rapid", "swift"]),
            ("brown", &["tawny", "umber"]),
            ("jumps", &["leaps", "bounds", "vaults"]),
            ("lazy", &["idle", "sluggish"]),
            ("every", &["each"]),
            ("task", &["duty", "job"]),
            ("subset", &["portion", "segment"]),
            ("without", &["lacking", "absent"]),
            ("explicitly", &["directly", "expressly"]),
        ];
        entries.iter().copied().collect()
    })
}

impl SynonymProvider for BuiltinThesaurus {
    fn lookup(&self, word: &str) -> Vec<String> {
        thesaurus()
            .get(word)
            .map(|syns| syns.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }
}

/// Provider that never finds a synonym; every substitution becomes a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSynonymProvider;

impl SynonymProvider for NullSynonymProvider {
    fn lookup(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let provider = BuiltinThesaurus;
        let syns = provider.lookup("important");
        assert!(syns.contains(&"significant".to_string()));
        assert!(provider.lookup("xylophone").is_empty());
    }

    #[test]
    fn test_null_provider_always_empty() {
        assert!(NullSynonymProvider.lookup("good").is_empty());
    }
}

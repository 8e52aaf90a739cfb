// Structural Paraphrase
// Rule-based sentence transformations used by the rewrite strategy
// ladder: voice changes, clause reordering, sentence-starter and
// connector substitution, long-sentence splitting, and a final pass
// that simplifies stock academic phrasing.

use std::sync::OnceLock;

use regex::Regex;

fn passive_was_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\w+) was (\w+ed) by (\w+)\b").unwrap())
}

fn passive_were_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\w+) were (\w+ed) by (\w+)\b").unwrap())
}

fn passive_is_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\w+) is (\w+ed) by (\w+)\b").unwrap())
}

fn passive_are_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\w+) are (\w+ed) by (\w+)\b").unwrap())
}

fn sentence_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([.!?])\s+").unwrap())
}

/// Sentence starters rewritten when they open a sentence.
const STARTER_SWAPS: &[(&str, &str)] = &[
    ("The ", "A "),
    ("This ", "Such "),
    ("These ", "Such "),
    ("It is ", "One finds that "),
    ("There are ", "Multiple "),
    ("In addition", "Furthermore"),
    ("Moreover", "Additionally"),
    ("However", "Nevertheless"),
];

/// Connector words swapped for near-equivalents anywhere in a sentence.
const CONNECTOR_SWAPS: &[(&str, &str)] = &[
    ("because", "since"),
    ("although", "while"),
    ("therefore", "consequently"),
    ("however", "nevertheless"),
    ("furthermore", "additionally"),
    ("moreover", "furthermore"),
];

/// Verbose academic phrases collapsed by the final-polish strategy.
const ACADEMIC_SWAPS: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("in spite of the fact that", "although"),
    ("for the purpose of", "to"),
    ("in the event that", "if"),
];

/// Splits text into sentences, keeping the terminator on each one.
fn sentences_with_terminators(text: &str) -> Vec<String> {
    sentence_boundary_re()
        .replace_all(text, "${1}\u{0}")
        .split('\u{0}')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
        .collect()
}

/// Applies the full per-sentence transformation chain to `text`.
pub(crate) fn structural_paraphrase(text: &str) -> String {
    let transformed: Vec<String> = sentences_with_terminators(text)
        .into_iter()
        .map(|sentence| {
            let s = passive_to_active(&sentence);
            let s = reorder_clauses(&s);
            let s = change_sentence_starter(&s);
            substitute_connectors(&s)
        })
        .collect();
    transformed.join(" ")
}

/// Rewrites simple "X was VERBed by Y" constructions into active voice.
fn passive_to_active(sentence: &str) -> String {
    let s = passive_was_re().replace_all(sentence, "$3 $2 $1");
    let s = passive_were_re().replace_all(&s, "$3 $2 $1");
    let s = passive_is_re().replace_all(&s, "$3 involves $1");
    passive_are_re().replace_all(&s, "$3 involve $1").into_owned()
}

/// Swaps the two halves of a sentence around its first comma when both
/// sides carry enough content to stand alone.
fn reorder_clauses(sentence: &str) -> String {
    let Some((head, tail)) = sentence.split_once(", ") else {
        return sentence.to_string();
    };
    let (tail_body, terminator) = match tail.char_indices().next_back() {
        Some((idx, last)) if matches!(last, '.' | '!' | '?') => (&tail[..idx], &tail[idx..]),
        _ => (tail, ""),
    };
    if head.trim().len() <= 10 || tail_body.trim().len() <= 10 {
        return sentence.to_string();
    }
    let mut head_lower = head.chars();
    let demoted = match head_lower.next() {
        Some(first) => format!("{}{}", first.to_lowercase(), head_lower.as_str()),
        None => String::new(),
    };
    format!("{tail_body}, {demoted}{terminator}")
}

/// Replaces a recognized sentence opener with an alternative phrasing.
fn change_sentence_starter(sentence: &str) -> String {
    for (from, to) in STARTER_SWAPS {
        if let Some(rest) = sentence.strip_prefix(from) {
            return format!("{to}{rest}");
        }
    }
    sentence.to_string()
}

fn connector_res() -> &'static Vec<(Regex, &'static str)> {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| {
        CONNECTOR_SWAPS
            .iter()
            .map(|(from, to)| (Regex::new(&format!(r"\b{from}\b")).unwrap(), *to))
            .collect()
    })
}

fn substitute_connectors(sentence: &str) -> String {
    let mut out = sentence.to_string();
    for (re, to) in connector_res() {
        out = re.replace_all(&out, *to).into_owned();
    }
    out
}

/// Breaks sentences longer than 100 characters at their first " and ".
pub(crate) fn split_long_sentences(text: &str) -> String {
    let rebuilt: Vec<String> = sentences_with_terminators(text)
        .into_iter()
        .map(|sentence| {
            if sentence.chars().count() <= 100 {
                return sentence;
            }
            match sentence.split_once(" and ") {
                Some((head, tail)) => {
                    let mut tail_chars = tail.chars();
                    let promoted = match tail_chars.next() {
                        Some(first) => {
                            format!("{}{}", first.to_uppercase(), tail_chars.as_str())
                        }
                        None => String::new(),
                    };
                    format!("{}. {}", head.trim_end_matches('.'), promoted)
                }
                None => sentence,
            }
        })
        .collect();
    rebuilt.join(" ")
}

fn academic_res() -> &'static Vec<(Regex, &'static str)> {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| {
        ACADEMIC_SWAPS
            .iter()
            .map(|(from, to)| {
                (
                    Regex::new(&format!(r"(?i){}", regex::escape(from))).unwrap(),
                    *to,
                )
            })
            .collect()
    })
}

/// Collapses verbose academic phrasing into plain equivalents.
pub(crate) fn simplify_academic_phrases(text: &str) -> String {
    let mut out = text.to_string();
    for (re, to) in academic_res() {
        out = re.replace_all(&out, *to).into_owned();
    }
    out
}

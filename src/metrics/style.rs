//! Style diagnostics: passive voice, hedging and overused words.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

/// A form of "to be" followed by a word ending in "ed", optionally "by".
static PASSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(am|is|are|was|were|be|been|being)\b\s+\b\w+ed\b\s*(?:by\b)?")
        .expect("passive pattern is valid")
});

/// Phrases that signal uncertainty, in reporting order.
pub const HEDGING_PHRASES: &[&str] = &[
    "maybe",
    "perhaps",
    "somewhat",
    "kinda",
    "sort of",
    "sorta",
    "i think",
    "i believe",
    "i guess",
];

/// Number of likely passive constructions in `text`.
pub fn passive_voice_hits(text: &str) -> usize {
    PASSIVE.find_iter(text).count()
}

/// Hedging phrases appearing anywhere in `text`, case-insensitively.
///
/// Matching is by substring, so each phrase is reported at most once.
pub fn hedging_phrases(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    HEDGING_PHRASES
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

/// Words used at least `min_occurrences` times and longer than `min_length`
/// characters, in order of first appearance.
pub fn repeated_words<S: AsRef<str>>(
    words: &[S],
    min_occurrences: usize,
    min_length: usize,
) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for word in words {
        let word = word.as_ref();
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|w| counts[w] >= min_occurrences && w.chars().count() > min_length)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passive_voice() {
        assert_eq!(passive_voice_hits("The cake was baked by Sam."), 1);
        assert_eq!(passive_voice_hits("Mistakes WERE committed. They are tired."), 2);
        assert_eq!(passive_voice_hits("Sam baked the cake."), 0);
    }

    #[test]
    fn hedging_is_case_insensitive() {
        let found = hedging_phrases("Perhaps. I Think so, maybe.");
        assert_eq!(found, vec!["maybe", "perhaps", "i think"]);
    }

    #[test]
    fn repeated_words_respect_length_and_count() {
        let words: Vec<String> = "the the the the the apple apple apple apple apple pear"
            .split(' ')
            .map(String::from)
            .collect();
        assert_eq!(repeated_words(&words, 5, 3), vec!["apple"]);
    }
}

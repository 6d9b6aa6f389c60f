//! Sentence and word segmentation.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::TokenStream;

/// A run of sentence terminators.
static TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("terminator pattern is valid"));

/// ASCII letters and apostrophes.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z']+").expect("word pattern is valid"));

/// Splits `text` into sentences and words.
pub fn segment(text: &str) -> TokenStream {
    let original_words = original_words(text);
    let words = original_words.iter().map(|w| w.to_lowercase()).collect();
    TokenStream::new(split_sentences(text), words, original_words)
}

/// Splits on runs of `.`, `!` or `?` that are followed by whitespace or the
/// end of the text. Fragments are trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    for run in TERMINATORS.find_iter(text) {
        let ends_sentence = text[run.end()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace);
        if ends_sentence {
            push_fragment(&mut sentences, &text[start..run.start()]);
            start = run.end();
        }
    }
    push_fragment(&mut sentences, &text[start..]);

    sentences
}

/// Lowercase word tokens of `text`.
pub fn words(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Word tokens of `text` with their casing preserved.
fn original_words(text: &str) -> Vec<String> {
    WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Pushes the trimmed fragment unless it is blank.
fn push_fragment(sentences: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split_sentences("One two. Three four! Five six? Seven");
        assert_eq!(sentences, vec!["One two", "Three four", "Five six", "Seven"]);
    }

    #[test]
    fn keeps_inner_periods() {
        let sentences = split_sentences("Version 1.5 shipped. It works.");
        assert_eq!(sentences, vec!["Version 1.5 shipped", "It works"]);
    }

    #[test]
    fn collapses_terminator_runs() {
        let sentences = split_sentences("Wait... What?! Fine.");
        assert_eq!(sentences, vec!["Wait", "What", "Fine"]);
    }

    #[test]
    fn blank_input_is_empty() {
        let stream = segment("   \n\t ");
        assert!(stream.sentences().is_empty());
        assert!(stream.words().is_empty());
        assert_eq!(stream.avg_sentence_len(), 0.0);
    }

    #[test]
    fn words_are_lowercased_with_apostrophes() {
        assert_eq!(words("Don't STOP me-now 42"), vec!["don't", "stop", "me", "now"]);
    }

    #[test]
    fn original_casing_is_kept() {
        let stream = segment("Teh Cat.");
        assert_eq!(stream.words(), ["teh", "cat"]);
        assert_eq!(stream.original_words(), ["Teh", "Cat"]);
    }
}

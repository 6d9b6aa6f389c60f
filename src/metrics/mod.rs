#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Heuristic metric extractors.
//!
//! Every function here is pure and deterministic: it sees only the tokens and
//! the raw text. Scores live in `[0, 100]`.

/// Syllable estimation and the reading-ease proxy.
pub mod readability;
/// Common misspellings.
pub mod spelling;
/// Passive voice, hedging and overused words.
pub mod style;

use serde::{Deserialize, Serialize};

pub use self::spelling::Misspelling;
use crate::{config::ScoringPolicy, document::TokenStream};

/// Word and sentence counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    /// Number of word tokens.
    pub total_words:      usize,
    /// Number of sentences.
    pub total_sentences:  usize,
    /// Words per sentence, zero when there are no sentences.
    pub avg_sentence_len: f64,
}

impl TextStats {
    /// Counts taken from a token stream.
    pub fn from_tokens(tokens: &TokenStream) -> Self {
        Self {
            total_words:      tokens.word_count(),
            total_sentences:  tokens.sentence_count(),
            avg_sentence_len: tokens.avg_sentence_len(),
        }
    }
}

/// The four primary heuristic scores, unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeuristicScores {
    /// Length against the target word count.
    pub length:      f64,
    /// Sentence-length clarity.
    pub clarity:     f64,
    /// Vocabulary richness.
    pub vocabulary:  f64,
    /// Reading-ease proxy.
    pub readability: f64,
}

/// Style findings reported alongside the scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Likely passive constructions.
    pub passive_hits: usize,
    /// Hedging phrases found.
    pub hedges:       Vec<String>,
    /// Overused words, in order of first appearance.
    pub repeated:     Vec<String>,
    /// Known misspellings, in order of first appearance.
    pub misspellings: Vec<Misspelling>,
    /// Type-token ratio rounded to three decimals.
    pub ttr:          f64,
}

/// Everything the heuristic extractors compute for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeuristicMetrics {
    /// Counts.
    pub stats:            TextStats,
    /// Unrounded scores.
    pub scores:           HeuristicScores,
    /// Unrounded type-token ratio.
    pub type_token_ratio: f64,
    /// Style findings.
    pub diagnostics:      Diagnostics,
}

impl HeuristicMetrics {
    /// Runs every heuristic extractor over one document.
    pub fn extract(tokens: &TokenStream, text: &str, policy: &ScoringPolicy) -> Self {
        let stats = TextStats::from_tokens(tokens);
        let ttr = type_token_ratio(tokens.words());
        let syllables = readability::total_syllables(tokens.words());

        let scores = HeuristicScores {
            length:      length_score(stats.total_words, policy),
            clarity:     clarity_score(stats.avg_sentence_len, policy),
            vocabulary:  vocabulary_score(ttr, policy),
            readability: readability::flesch_kincaid_proxy(
                stats.total_words,
                stats.total_sentences,
                syllables,
            ),
        };

        let diagnostics = Diagnostics {
            passive_hits: style::passive_voice_hits(text),
            hedges:       style::hedging_phrases(text),
            repeated:     style::repeated_words(
                tokens.words(),
                policy.repeated_min_occurrences,
                policy.repeated_min_length,
            ),
            misspellings: spelling::find_misspellings(tokens),
            ttr:          round_to(ttr, 3),
        };

        tracing::debug!(
            words = stats.total_words,
            sentences = stats.total_sentences,
            ttr,
            "heuristic metrics extracted"
        );

        Self {
            stats,
            scores,
            type_token_ratio: ttr,
            diagnostics,
        }
    }

    /// Weighted composite of the four scores, rounded to two decimals.
    pub fn overall(&self, policy: &ScoringPolicy) -> f64 {
        overall_score(&self.scores, policy)
    }
}

/// `min(100, words / target * 100)`.
pub fn length_score(word_count: usize, policy: &ScoringPolicy) -> f64 {
    if policy.target_word_count <= 0.0 {
        return 100.0;
    }
    (word_count as f64 / policy.target_word_count * 100.0).min(100.0)
}

/// 100 up to the sentence-length threshold, then a linear penalty floored at
/// zero.
pub fn clarity_score(avg_sentence_len: f64, policy: &ScoringPolicy) -> f64 {
    if avg_sentence_len <= policy.clarity_sentence_threshold {
        100.0
    } else {
        (100.0
            - (avg_sentence_len - policy.clarity_sentence_threshold)
                * policy.clarity_penalty_per_word)
            .max(0.0)
    }
}

/// Unique words over total words, zero for an empty slice.
pub fn type_token_ratio<S: AsRef<str>>(words: &[S]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let unique: std::collections::HashSet<&str> = words.iter().map(AsRef::as_ref).collect();
    unique.len() as f64 / words.len() as f64
}

/// The type-token ratio scaled into `[0, 100]`.
pub fn vocabulary_score(ttr: f64, policy: &ScoringPolicy) -> f64 {
    (ttr * policy.vocabulary_ttr_scale).min(100.0)
}

/// Weighted sum of the four primary scores, rounded to two decimals.
pub fn overall_score(scores: &HeuristicScores, policy: &ScoringPolicy) -> f64 {
    let w = &policy.weights;
    round_to(
        w.length * scores.length
            + w.clarity * scores.clarity
            + w.vocabulary * scores.vocabulary
            + w.readability * scores.readability,
        2,
    )
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::segment;

    #[test]
    fn length_saturates() {
        let policy = ScoringPolicy::default();
        assert_eq!(length_score(0, &policy), 0.0);
        assert_eq!(length_score(75, &policy), 50.0);
        assert_eq!(length_score(150, &policy), 100.0);
        assert_eq!(length_score(900, &policy), 100.0);
    }

    #[test]
    fn clarity_penalizes_long_sentences() {
        let policy = ScoringPolicy::default();
        assert_eq!(clarity_score(0.0, &policy), 100.0);
        assert_eq!(clarity_score(20.0, &policy), 100.0);
        assert_eq!(clarity_score(25.0, &policy), 85.0);
        assert_eq!(clarity_score(60.0, &policy), 0.0);
    }

    #[test]
    fn vocabulary_doubles_ttr() {
        let policy = ScoringPolicy::default();
        assert_eq!(type_token_ratio::<&str>(&[]), 0.0);
        assert_eq!(type_token_ratio(&["a", "b", "a", "b"]), 0.5);
        assert_eq!(vocabulary_score(0.25, &policy), 50.0);
        assert_eq!(vocabulary_score(0.9, &policy), 100.0);
    }

    #[test]
    fn empty_document_scores_sentinels() {
        let policy = ScoringPolicy::default();
        let metrics = HeuristicMetrics::extract(&segment(""), "", &policy);
        assert_eq!(metrics.stats, TextStats::default());
        assert_eq!(metrics.scores.length, 0.0);
        assert_eq!(metrics.scores.clarity, 100.0);
        assert_eq!(metrics.scores.vocabulary, 0.0);
        assert_eq!(metrics.scores.readability, 0.0);
        assert_eq!(metrics.overall(&policy), 30.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(0.6666, 3), 0.667);
    }
}

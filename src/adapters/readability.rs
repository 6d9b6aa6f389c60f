//! Reading-ease and grade-level indices, blended into one 0-100 score.

use serde::{Deserialize, Serialize};

use super::{AdapterError, AnalysisInput, SignalAdapter};
use crate::metrics::{readability::estimate_syllables, round_to};

/// Readability indices for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityIndex {
    /// Flesch reading ease, unclamped, rounded to two decimals.
    pub flesch:            f64,
    /// Consensus US grade level.
    pub grade_level:       f64,
    /// `0.6 * ease + 0.4 * grade` on a 0-100 scale, higher is easier.
    pub readability_score: f64,
}

/// Computes [`ReadabilityIndex`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityIndexer;

impl SignalAdapter for ReadabilityIndexer {
    type Output = ReadabilityIndex;

    fn name(&self) -> &'static str {
        "readability"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<ReadabilityIndex, AdapterError> {
        if input.whitespace_words() < input.policy.readability_min_words {
            return Ok(ReadabilityIndex::default());
        }

        let words = input.tokens.words();
        if words.is_empty() {
            return Ok(ReadabilityIndex::default());
        }

        let counts = TextCounts::new(words, input.tokens.sentence_count());
        let flesch = counts.flesch_reading_ease();
        let grade = counts.consensus_grade();

        let flesch_scaled = flesch.clamp(0.0, 100.0);
        let grade_scaled = 100.0 - ((grade - 5.0) * (100.0 / 15.0)).clamp(0.0, 100.0);
        let readability = 0.6 * flesch_scaled + 0.4 * grade_scaled;

        if !(flesch.is_finite() && grade.is_finite() && readability.is_finite()) {
            return Err(AdapterError::NonFinite("readability index"));
        }

        Ok(ReadabilityIndex {
            flesch:            round_to(flesch, 2),
            grade_level:       round_to(grade, 2),
            readability_score: round_to(readability, 2),
        })
    }

    fn fallback(&self, _: &AnalysisInput<'_>) -> ReadabilityIndex {
        ReadabilityIndex::default()
    }
}

/// Raw counts feeding the readability formulas.
#[derive(Debug, Clone, Copy)]
struct TextCounts {
    /// Word tokens.
    words:     f64,
    /// Sentences, at least one.
    sentences: f64,
    /// Estimated syllables.
    syllables: f64,
    /// Letters in word tokens.
    letters:   f64,
    /// Words of three or more syllables.
    complex:   f64,
}

impl TextCounts {
    /// Tallies counts over non-empty `words`.
    fn new(words: &[String], sentences: usize) -> Self {
        let mut syllables = 0;
        let mut letters = 0;
        let mut complex = 0;
        for word in words {
            let s = estimate_syllables(word);
            syllables += s;
            if s >= 3 {
                complex += 1;
            }
            letters += word.chars().filter(char::is_ascii_alphabetic).count();
        }

        Self {
            words:     words.len() as f64,
            sentences: sentences.max(1) as f64,
            syllables: syllables as f64,
            letters:   letters as f64,
            complex:   complex as f64,
        }
    }

    /// Average sentence length.
    fn asl(&self) -> f64 {
        self.words / self.sentences
    }

    /// Average syllables per word.
    fn asw(&self) -> f64 {
        self.syllables / self.words
    }

    /// Flesch reading ease.
    fn flesch_reading_ease(&self) -> f64 {
        206.835 - 1.015 * self.asl() - 84.6 * self.asw()
    }

    /// Flesch-Kincaid grade level.
    fn flesch_kincaid_grade(&self) -> f64 {
        0.39 * self.asl() + 11.8 * self.asw() - 15.59
    }

    /// Coleman-Liau index.
    fn coleman_liau(&self) -> f64 {
        let l = self.letters / self.words * 100.0;
        let s = self.sentences / self.words * 100.0;
        0.0588 * l - 0.296 * s - 15.8
    }

    /// Automated readability index.
    fn automated_readability(&self) -> f64 {
        4.71 * (self.letters / self.words) + 0.5 * self.asl() - 21.43
    }

    /// Gunning fog index.
    fn gunning_fog(&self) -> f64 {
        0.4 * (self.asl() + 100.0 * self.complex / self.words)
    }

    /// Median of the rounded grade estimates.
    fn consensus_grade(&self) -> f64 {
        let mut grades = [
            self.flesch_kincaid_grade().round(),
            self.coleman_liau().round(),
            self.automated_readability().round(),
            self.gunning_fog().round(),
        ];
        grades.sort_by(f64::total_cmp);
        (grades[1] + grades[2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScoringPolicy, document::Document, text::segment};

    fn index(text: &str) -> ReadabilityIndex {
        let doc = Document::new(text);
        let tokens = segment(text);
        let policy = ScoringPolicy::default();
        ReadabilityIndexer
            .analyze(&AnalysisInput::new(&doc, &tokens, &policy))
            .expect("readability")
    }

    #[test]
    fn short_text_is_zero() {
        assert_eq!(index("Too short to say."), ReadabilityIndex::default());
    }

    #[test]
    fn plain_text_reads_easily() {
        let r = index("The cat sat on the mat. The dog ran to the park. We had fun.");
        assert!(r.flesch > 90.0, "{r:?}");
        assert!(r.readability_score > 80.0, "{r:?}");
        assert!(r.readability_score <= 100.0);
    }

    #[test]
    fn dense_text_reads_harder() {
        let easy = index("The cat sat on the mat. The dog ran to the park. We had fun.");
        let hard = index(
            "Institutional considerations regarding comprehensive organizational \
             restructuring necessitated extraordinarily complicated administrative \
             deliberations.",
        );
        assert!(hard.readability_score < easy.readability_score);
        assert!(hard.grade_level > easy.grade_level);
        assert!(hard.readability_score >= 0.0);
    }
}

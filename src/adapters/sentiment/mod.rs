//! Rule-based sentiment polarity over a valence lexicon.
//!
//! Each lexicon word contributes its valence, adjusted for preceding boosters
//! and negations, ALL-CAPS emphasis, and a contrastive "but". The sum is
//! squashed into a compound score in `[-1, 1]`.

mod lexicon;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AdapterError, AnalysisInput, SignalAdapter};
use crate::metrics::round_to;

/// Added to a valence written in capitals while other words are not.
const CAPS_EMPHASIS: f64 = 0.733;

/// Multiplier for a negated valence.
const NEGATION_SCALAR: f64 = -0.74;

/// Squashing constant of the compound normalization.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Polarity of a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Compound polarity in `[-1, 1]`, rounded to three decimals.
    pub compound:   f64,
    /// `(compound + 1) * 50`, rounded to two decimals.
    pub positivity: f64,
}

impl Sentiment {
    /// Zero compound, positivity 50.
    pub const NEUTRAL: Sentiment = Sentiment {
        compound:   0.0,
        positivity: 50.0,
    };

    /// Builds a sentiment from a raw compound score.
    pub fn from_compound(compound: f64) -> Self {
        let compound = compound.clamp(-1.0, 1.0);
        Self {
            compound:   round_to(compound, 3),
            positivity: round_to((compound + 1.0) * 50.0, 2),
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Lexicon-backed analyzer. Build once and share.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    /// Word valences.
    valences: HashMap<&'static str, f64>,
    /// Booster scalars.
    boosters: HashMap<&'static str, f64>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Loads the built-in lexicon.
    pub fn new() -> Self {
        Self {
            valences: lexicon::VALENCES.iter().copied().collect(),
            boosters: lexicon::BOOSTERS.iter().copied().collect(),
        }
    }

    /// Compound polarity of `text` in `[-1, 1]`.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\''))
            .filter(|w| w.chars().count() > 1)
            .collect();
        if tokens.is_empty() {
            return 0.0;
        }
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differ = caps_differential(&tokens);

        let mut valences = Vec::with_capacity(tokens.len());
        for (i, word) in lowered.iter().enumerate() {
            let kind_of = word == "kind" && lowered.get(i + 1).is_some_and(|next| next == "of");
            let valence = match self.valences.get(word.as_str()) {
                Some(&base) if !self.boosters.contains_key(word.as_str()) && !kind_of => {
                    self.adjusted_valence(base, i, &tokens, &lowered, caps_differ)
                }
                _ => 0.0,
            };
            valences.push(valence);
        }

        apply_contrast(&lowered, &mut valences);

        let mut sum: f64 = valences.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        normalize(sum)
    }

    /// Applies capitals, the three preceding words' boosters, and negation.
    fn adjusted_valence(
        &self,
        base: f64,
        i: usize,
        tokens: &[&str],
        lowered: &[String],
        caps_differ: bool,
    ) -> f64 {
        let mut valence = base;
        if caps_differ && is_shouted(tokens[i]) {
            valence += CAPS_EMPHASIS.copysign(valence);
        }

        for distance in 1..=3 {
            let Some(j) = i.checked_sub(distance) else {
                break;
            };
            let previous = lowered[j].as_str();
            if !self.valences.contains_key(previous)
                && let Some(&scalar) = self.boosters.get(previous)
            {
                let mut scalar = if valence < 0.0 { -scalar } else { scalar };
                if caps_differ && is_shouted(tokens[j]) {
                    scalar += CAPS_EMPHASIS.copysign(valence);
                }
                scalar *= match distance {
                    2 => 0.95,
                    3 => 0.9,
                    _ => 1.0,
                };
                valence += scalar;
            }
            if is_negation(previous) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl SignalAdapter for SentimentAnalyzer {
    type Output = Sentiment;

    fn name(&self) -> &'static str {
        "sentiment"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Sentiment, AdapterError> {
        if input.whitespace_words() < input.policy.sentiment_min_words {
            return Ok(Sentiment::NEUTRAL);
        }
        let compound = self.compound(input.text());
        if !compound.is_finite() {
            return Err(AdapterError::NonFinite("sentiment"));
        }
        Ok(Sentiment::from_compound(compound))
    }

    fn fallback(&self, _: &AnalysisInput<'_>) -> Sentiment {
        Sentiment::NEUTRAL
    }
}

/// True when some, but not all, tokens are written in capitals.
fn caps_differential(tokens: &[&str]) -> bool {
    let shouted = tokens.iter().filter(|t| is_shouted(t)).count();
    shouted > 0 && shouted < tokens.len()
}

/// All cased characters are uppercase and there is at least one.
fn is_shouted(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// Explicit negation words and `n't` contractions.
fn is_negation(word: &str) -> bool {
    word.ends_with("n't") || lexicon::NEGATIONS.contains(&word)
}

/// Halves valences before the first "but" and boosts those after it.
fn apply_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < pivot {
            *valence *= 0.5;
        } else if i > pivot {
            *valence *= 1.5;
        }
    }
}

/// Extra intensity from exclamation and question marks.
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let questions = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

/// `score / sqrt(score^2 + alpha)`, clamped to `[-1, 1]`.
fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScoringPolicy, document::Document, text::segment};

    fn sentiment(text: &str) -> Sentiment {
        let doc = Document::new(text);
        let tokens = segment(text);
        let policy = ScoringPolicy::default();
        SentimentAnalyzer::new()
            .analyze(&AnalysisInput::new(&doc, &tokens, &policy))
            .expect("sentiment")
    }

    #[test]
    fn very_short_text_is_neutral() {
        assert_eq!(sentiment("Great job"), Sentiment::NEUTRAL);
    }

    #[test]
    fn polarity_direction() {
        assert!(sentiment("This was a wonderful and happy day.").positivity > 50.0);
        assert!(sentiment("This was a terrible and sad day.").positivity < 50.0);
        assert_eq!(sentiment("The table has four legs.").positivity, 50.0);
    }

    #[test]
    fn negation_flips() {
        let plain = sentiment("The movie was good overall.");
        let negated = sentiment("The movie was not good overall.");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn boosters_intensify() {
        let plain = sentiment("The results were good today.");
        let boosted = sentiment("The results were very good today.");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn contrast_weights_the_second_clause() {
        let s = sentiment("The food was good but the service was terrible.");
        assert!(s.compound < 0.0, "{s:?}");
    }

    #[test]
    fn positivity_stays_in_range() {
        let s = sentiment("LOVE love love amazing wonderful best great!!!!");
        assert!(s.positivity <= 100.0 && s.positivity >= 0.0);
        assert!(s.compound <= 1.0);
    }
}

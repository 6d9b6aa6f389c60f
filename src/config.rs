#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Version of the scoring policy below. Bump whenever a weight or threshold
/// changes so stored scores can be told apart.
pub const POLICY_VERSION: u32 = 1;

/// Default LanguageTool endpoint used when none is configured.
pub const DEFAULT_LANGUAGETOOL_URL: &str = "https://api.languagetool.org";

/// Default location of the trained model artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/essay_scorer.json";

/// Weights of the heuristic composite score. They sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    /// Weight of the length score.
    pub length:      f64,
    /// Weight of the clarity score.
    pub clarity:     f64,
    /// Weight of the vocabulary score.
    pub vocabulary:  f64,
    /// Weight of the readability proxy.
    pub readability: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            length:      0.30,
            clarity:     0.30,
            vocabulary:  0.20,
            readability: 0.20,
        }
    }
}

/// Weights and normalizations of the learned-model fallback formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelFallbackWeights {
    /// Weight of the readability index.
    pub readability:              f64,
    /// Weight of the grammar score.
    pub grammar:                  f64,
    /// Weight of the sentiment positivity.
    pub sentiment:                f64,
    /// Weight of the vocabulary richness (type-token percentage, capped at
    /// 100).
    pub richness:                 f64,
    /// Weight of the secondary length normalization.
    pub length:                   f64,
    /// Weight of the sentence structure normalization.
    pub structure:                f64,
    /// Word count at which the secondary length normalization saturates.
    pub length_target_words:      f64,
    /// Average sentence length at which the structure normalization
    /// saturates.
    pub structure_target_len:     f64,
    /// Structure value used when the average sentence length is zero.
    pub structure_when_undefined: f64,
}

impl Default for ModelFallbackWeights {
    fn default() -> Self {
        Self {
            readability:              0.30,
            grammar:                  0.30,
            sentiment:                0.10,
            richness:                 0.15,
            length:                   0.10,
            structure:                0.05,
            length_target_words:      400.0,
            structure_target_len:     25.0,
            structure_when_undefined: 60.0,
        }
    }
}

/// Thresholds at which the feedback generator emits a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    /// Essays shorter than this are asked to expand.
    pub min_words:               usize,
    /// Average sentence lengths above this ask for shorter sentences.
    pub max_avg_sentence_len:    f64,
    /// Type-token ratios below this ask for more varied vocabulary.
    pub min_type_token_ratio:    f64,
    /// Readability proxies below this ask for simpler wording.
    pub min_readability:         f64,
    /// How many overused words are listed.
    pub max_repeated_listed:     usize,
    /// How many misspellings are listed.
    pub max_misspellings_listed: usize,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            min_words:               150,
            max_avg_sentence_len:    24.0,
            min_type_token_ratio:    0.4,
            min_readability:         60.0,
            max_repeated_listed:     8,
            max_misspellings_listed: 10,
        }
    }
}

/// Every weight and threshold the scoring pipeline uses.
///
/// The defaults are the scoring contract; a grader never changes them while
/// running. A different policy is a different `version`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Policy version, recorded alongside results.
    pub version:                    u32,
    /// Word count at which the length score saturates at 100.
    pub target_word_count:          f64,
    /// Average sentence length up to which clarity is 100.
    pub clarity_sentence_threshold: f64,
    /// Clarity points lost per word of average sentence length above the
    /// threshold.
    pub clarity_penalty_per_word:   f64,
    /// Multiplier applied to the type-token ratio for the vocabulary score.
    pub vocabulary_ttr_scale:       f64,
    /// Minimum occurrences for a word to count as overused.
    pub repeated_min_occurrences:   usize,
    /// Overused words must be strictly longer than this.
    pub repeated_min_length:        usize,
    /// Whitespace word count below which the readability index is zero.
    pub readability_min_words:      usize,
    /// Whitespace word count below which sentiment is neutral.
    pub sentiment_min_words:        usize,
    /// Topic relevance reported when no topic or keywords are given.
    pub topic_neutral:              f64,
    /// Grammar points lost per issue.
    pub grammar_points_per_issue:   f64,
    /// Cap on the total grammar penalty.
    pub grammar_max_penalty:        f64,
    /// Composite score weights.
    pub weights:                    CompositeWeights,
    /// Learned-model fallback formula.
    pub model_fallback:             ModelFallbackWeights,
    /// Feedback thresholds.
    pub feedback:                   FeedbackThresholds,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            version:                    POLICY_VERSION,
            target_word_count:          150.0,
            clarity_sentence_threshold: 20.0,
            clarity_penalty_per_word:   3.0,
            vocabulary_ttr_scale:       200.0,
            repeated_min_occurrences:   5,
            repeated_min_length:        3,
            readability_min_words:      5,
            sentiment_min_words:        3,
            topic_neutral:              50.0,
            grammar_points_per_issue:   2.0,
            grammar_max_penalty:        30.0,
            weights:                    CompositeWeights::default(),
            model_fallback:             ModelFallbackWeights::default(),
            feedback:                   FeedbackThresholds::default(),
        }
    }
}

/// Adapter wiring read from the environment once at process start.
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    /// LanguageTool base URL, `None` when the remote checker is disabled.
    languagetool_url: Option<String>,
    /// Language code sent to LanguageTool.
    grammar_language: String,
    /// Per-request timeout for the grammar service.
    grammar_timeout:  Duration,
    /// Maximum number of grammar issues kept.
    max_issues:       usize,
    /// Path of the trained model artifact.
    model_path:       PathBuf,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            languagetool_url: None,
            grammar_language: "en-US".to_string(),
            grammar_timeout:  Duration::from_secs(10),
            max_issues:       20,
            model_path:       PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl AdapterSettings {
    /// Reads settings from `ESSAYMARK_*` environment variables, falling back
    /// to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let disabled = std::env::var("ESSAYMARK_GRAMMAR_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        let languagetool_url = if disabled {
            None
        } else {
            Some(
                std::env::var("ESSAYMARK_LANGUAGETOOL_URL")
                    .map(|v| v.trim().to_owned())
                    .ok()
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_LANGUAGETOOL_URL.to_string()),
            )
        };

        let grammar_language = std::env::var("ESSAYMARK_GRAMMAR_LANGUAGE")
            .map(|v| v.trim().to_owned())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.grammar_language);

        let max_issues = std::env::var("ESSAYMARK_MAX_GRAMMAR_ISSUES")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_issues);

        let model_path = std::env::var("ESSAYMARK_MODEL_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        Self {
            languagetool_url,
            grammar_language,
            grammar_timeout: read_timeout_secs("ESSAYMARK_GRAMMAR_TIMEOUT_SECS", 10),
            max_issues,
            model_path,
        }
    }

    /// Returns the LanguageTool base URL, if the remote checker is enabled.
    pub fn languagetool_url(&self) -> Option<&str> {
        self.languagetool_url.as_deref()
    }

    /// Enables the remote checker at `url`.
    pub fn with_languagetool_url(mut self, url: impl Into<String>) -> Self {
        self.languagetool_url = Some(url.into());
        self
    }

    /// Returns the language code sent to the grammar service.
    pub fn grammar_language(&self) -> &str {
        &self.grammar_language
    }

    /// Returns the grammar service timeout.
    pub fn grammar_timeout(&self) -> Duration {
        self.grammar_timeout
    }

    /// Returns the maximum number of grammar issues kept per document.
    pub fn max_issues(&self) -> usize {
        self.max_issues
    }

    /// Returns the model artifact path.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }

    /// Points the model scorer at a different artifact.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }
}

/// Reads a timeout in seconds from `var`, using `default` when unset or zero.
fn read_timeout_secs(var: &str, default: u64) -> Duration {
    let secs = std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

/// `1`, `true`, `yes` and `on` (any case) count as set.
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_weights_sum_to_one() {
        let w = CompositeWeights::default();
        let total = w.length + w.clarity + w.vocabulary + w.readability;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fallback_weights_sum_to_one() {
        let w = ModelFallbackWeights::default();
        let total = w.readability + w.grammar + w.sentiment + w.richness + w.length + w.structure;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("TRUE"));
        assert!(is_truthy(" 1 "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn default_settings_are_offline() {
        let settings = AdapterSettings::default();
        assert!(settings.languagetool_url().is_none());
        assert_eq!(settings.max_issues(), 20);
    }
}

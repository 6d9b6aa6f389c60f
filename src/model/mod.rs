#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Learned-model scoring.
//!
//! A trained regressor maps a fixed, named feature vector to a score. The
//! vector's layout is recorded in the artifact as a [`FeatureSchema`] and
//! checked on load, so a model trained against a different layout is never
//! fed the wrong columns. Without a usable artifact the scorer falls back to
//! a weighted formula over the same features.

/// Training ingestion.
pub mod train;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use gbdt::{decision_tree::Data, gradient_boost::GBDT};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::{GrammarReport, ReadabilityIndex, Sentiment},
    config::ModelFallbackWeights,
    document::TokenStream,
    metrics::{round_to, type_token_ratio},
};

/// Version of the feature layout below.
pub const SCHEMA_VERSION: u32 = 1;

/// Feature names in vector order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "word_count",
    "avg_sentence_len",
    "type_token_ratio",
    "readability",
    "sentiment",
    "grammar",
    "issue_count",
];

/// Length of the feature vector.
pub const NUM_FEATURES: usize = 7;

/// Reasons a model artifact could not be used or produced.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// Reading or writing the artifact failed.
    #[error("could not access {path}: {source}")]
    Io {
        /// Artifact location.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The artifact is not valid JSON of the expected shape.
    #[error("could not parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    /// The artifact was trained against a different feature layout.
    #[error("feature schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch {
        /// Layout this build uses.
        expected: String,
        /// Layout recorded in the artifact.
        found:    String,
    },
    /// No usable training samples were supplied.
    #[error("no training samples")]
    EmptyTrainingSet,
}

/// Ordered, versioned list of feature names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Layout version.
    pub version:  u32,
    /// Feature names in vector order.
    pub features: Vec<String>,
}

impl FeatureSchema {
    /// The layout this build produces.
    pub fn current() -> Self {
        Self {
            version:  SCHEMA_VERSION,
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Errors unless `self` is exactly [`FeatureSchema::current`].
    pub fn check(&self) -> Result<(), ModelError> {
        let current = Self::current();
        if *self == current {
            Ok(())
        } else {
            Err(ModelError::SchemaMismatch {
                expected: current.to_string(),
                found:    self.to_string(),
            })
        }
    }
}

impl std::fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{} [{}]", self.version, self.features.join(", "))
    }
}

/// Named model inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Word tokens.
    pub word_count:       f64,
    /// Words per sentence.
    pub avg_sentence_len: f64,
    /// Type-token ratio as a percentage.
    pub type_token_ratio: f64,
    /// Blended readability index.
    pub readability:      f64,
    /// Sentiment positivity.
    pub sentiment:        f64,
    /// Grammar score.
    pub grammar:          f64,
    /// Grammar issue count.
    pub issue_count:      f64,
}

impl Features {
    /// Gathers features from the segmentation and the adapter outputs.
    pub fn from_signals(
        tokens: &TokenStream,
        readability: &ReadabilityIndex,
        sentiment: &Sentiment,
        grammar: &GrammarReport,
    ) -> Self {
        Self {
            word_count:       tokens.word_count() as f64,
            avg_sentence_len: round_to(tokens.avg_sentence_len(), 2),
            type_token_ratio: round_to(type_token_ratio(tokens.words()) * 100.0, 2),
            readability:      readability.readability_score,
            sentiment:        sentiment.positivity,
            grammar:          grammar.grammar_score,
            issue_count:      grammar.issue_count() as f64,
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_vector(&self) -> [f64; NUM_FEATURES] {
        [
            self.word_count,
            self.avg_sentence_len,
            self.type_token_ratio,
            self.readability,
            self.sentiment,
            self.grammar,
            self.issue_count,
        ]
    }

    /// The vector as the `f32` values `gbdt` works with.
    fn to_f32(self) -> Vec<f32> {
        self.to_vector().iter().map(|&v| v as f32).collect()
    }
}

/// The fallback formula used when no trained model is available.
pub fn fallback_score(features: &Features, weights: &ModelFallbackWeights) -> f64 {
    let richness = features.type_token_ratio.min(100.0);
    let length = (features.word_count / weights.length_target_words * 100.0).min(100.0);
    let structure = if features.avg_sentence_len > 0.0 {
        (features.avg_sentence_len / weights.structure_target_len * 100.0).min(100.0)
    } else {
        weights.structure_when_undefined
    };

    let score = weights.readability * features.readability
        + weights.grammar * features.grammar
        + weights.sentiment * features.sentiment
        + weights.richness * richness
        + weights.length * length
        + weights.structure * structure;
    round_to(score.clamp(0.0, 100.0), 2)
}

/// A trained model together with the feature layout it expects.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Layout the model was trained on.
    pub schema: FeatureSchema,
    /// Gradient-boosted regression trees.
    pub model:  GBDT,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl ModelArtifact {
    /// Wraps a model trained on the current feature layout.
    pub fn new(model: GBDT) -> Self {
        Self {
            schema: FeatureSchema::current(),
            model,
        }
    }

    /// Reads an artifact. A missing file is `Ok(None)`; anything unreadable,
    /// unparsable or trained on another layout is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ModelError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ModelError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let artifact: Self = serde_json::from_str(&raw)?;
        artifact.schema.check()?;
        Ok(Some(artifact))
    }

    /// Writes the artifact as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(self)?;
        fs::write(path, json).map_err(io_err)
    }

    /// Raw model output for one feature set.
    pub fn predict(&self, features: &Features) -> f64 {
        let data = vec![Data::new_test_data(features.to_f32(), None)];
        self.model
            .predict(&data)
            .first()
            .map_or(f64::NAN, |&p| f64::from(p))
    }
}

/// Where a model score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    /// A trained artifact.
    Trained,
    /// The fallback formula.
    Heuristic,
}

/// Learned-model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    /// Score in `[0, 100]`, rounded to two decimals.
    pub score:    f64,
    /// Trained model or fallback formula.
    pub source:   ScoreSource,
    /// The inputs used.
    pub features: Features,
}

/// Scores feature vectors with a trained model when one is loaded.
#[derive(Debug, Clone, Default)]
pub struct ModelScorer {
    /// Loaded artifact, shared read-only.
    artifact: Option<Arc<ModelArtifact>>,
}

impl ModelScorer {
    /// No model; always uses the fallback formula.
    pub fn untrained() -> Self {
        Self::default()
    }

    /// Uses an already loaded artifact.
    pub fn with_artifact(artifact: ModelArtifact) -> Self {
        Self {
            artifact: Some(Arc::new(artifact)),
        }
    }

    /// Loads the artifact at `path`. Failures are logged and leave the scorer
    /// untrained.
    pub fn from_path(path: &Path) -> Self {
        match ModelArtifact::load(path) {
            Ok(Some(artifact)) => {
                tracing::info!(path = %path.display(), "loaded scoring model");
                Self::with_artifact(artifact)
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no scoring model; using formula");
                Self::untrained()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring scoring model: {e}");
                Self::untrained()
            }
        }
    }

    /// True when a trained artifact is loaded.
    pub fn is_trained(&self) -> bool {
        self.artifact.is_some()
    }

    /// Scores `features`, preferring the trained model.
    pub fn score(&self, features: &Features, weights: &ModelFallbackWeights) -> ModelScore {
        if let Some(artifact) = &self.artifact {
            let raw = artifact.predict(features);
            if raw.is_finite() {
                return ModelScore {
                    score:    round_to(raw.clamp(0.0, 100.0), 2),
                    source:   ScoreSource::Trained,
                    features: *features,
                };
            }
            tracing::warn!(prediction = raw, "non-finite model prediction; using formula");
        }

        ModelScore {
            score:    fallback_score(features, weights),
            source:   ScoreSource::Heuristic,
            features: *features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_is_reported() {
        assert!(FeatureSchema::current().check().is_ok());

        let mut reordered = FeatureSchema::current();
        reordered.features.swap(0, 1);
        assert!(matches!(reordered.check(), Err(ModelError::SchemaMismatch { .. })));

        let newer = FeatureSchema {
            version: SCHEMA_VERSION + 1,
            ..FeatureSchema::current()
        };
        assert!(newer.check().is_err());
    }

    #[test]
    fn vector_follows_schema_order() {
        let f = Features {
            word_count:       1.0,
            avg_sentence_len: 2.0,
            type_token_ratio: 3.0,
            readability:      4.0,
            sentiment:        5.0,
            grammar:          6.0,
            issue_count:      7.0,
        };
        assert_eq!(f.to_vector(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn fallback_formula() {
        let weights = ModelFallbackWeights::default();
        let f = Features {
            word_count:       200.0,
            avg_sentence_len: 0.0,
            type_token_ratio: 150.0,
            readability:      50.0,
            sentiment:        50.0,
            grammar:          100.0,
            issue_count:      0.0,
        };
        // 15 + 30 + 5 + 15 + 5 + 3
        assert_eq!(fallback_score(&f, &weights), 73.0);
    }

    #[test]
    fn untrained_scorer_uses_formula() {
        let scorer = ModelScorer::untrained();
        let score = scorer.score(&Features::default(), &ModelFallbackWeights::default());
        assert_eq!(score.source, ScoreSource::Heuristic);
        assert_eq!(score.score, 3.0);
    }

    #[test]
    fn missing_artifact_is_not_an_error() {
        let path = Path::new("definitely/not/here/model.json");
        assert!(matches!(ModelArtifact::load(path), Ok(None)));
        assert!(!ModelScorer::from_path(path).is_trained());
    }
}

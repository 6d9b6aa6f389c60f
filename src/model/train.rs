#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Fitting a scoring model from human-graded essays.

use std::path::Path;

use anyhow::{Context, Result};
use gbdt::{config::Config, decision_tree::Data, gradient_boost::GBDT};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{Features, ModelArtifact, ModelError, NUM_FEATURES};
use crate::{document::Document, grade::Grader, metrics::round_to};

/// One human-graded essay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Essay text.
    pub essay: String,
    /// Human score.
    pub score: f64,
}

/// On-disk layout of a training set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// A JSON array of `{ "essay": ..., "score": ... }` objects.
    Json,
    /// A CSV file with a header row naming `essay` and `score` columns.
    Csv,
}

impl SampleFormat {
    /// `Csv` for a `.csv` extension, `Json` otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Reads graded essays, picking the format from the file extension.
pub fn load_samples(path: &Path) -> Result<Vec<TrainingSample>> {
    load_samples_as(path, SampleFormat::from_path(path))
}

/// Reads graded essays in `format`, dropping blank essays and non-finite
/// scores.
pub fn load_samples_as(path: &Path, format: SampleFormat) -> Result<Vec<TrainingSample>> {
    let samples = match format {
        SampleFormat::Json => read_json(path)?,
        SampleFormat::Csv => read_csv(path)?,
    };

    let total = samples.len();
    let samples: Vec<TrainingSample> = samples
        .into_iter()
        .filter(|s| !s.essay.trim().is_empty() && s.score.is_finite())
        .collect();
    if samples.len() < total {
        tracing::warn!(dropped = total - samples.len(), "skipped unusable training rows");
    }
    Ok(samples)
}

/// Parses a JSON array of samples.
fn read_json(path: &Path) -> Result<Vec<TrainingSample>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read training data at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Could not parse training data at {}", path.display()))
}

/// Parses CSV records by header name; other columns are ignored.
fn read_csv(path: &Path) -> Result<Vec<TrainingSample>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Could not read training data at {}", path.display()))?;
    reader
        .deserialize::<TrainingSample>()
        .enumerate()
        .map(|(i, record)| {
            record.with_context(|| {
                format!("Could not parse record {} of {}", i + 1, path.display())
            })
        })
        .collect()
}

/// Hyperparameters for [`train`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct TrainConfig {
    /// Boosting iterations.
    #[builder(default = 300)]
    pub trees:         usize,
    /// Maximum tree depth.
    #[builder(default = 6)]
    pub max_depth:     u32,
    /// Shrinkage per iteration.
    #[builder(default = 0.1)]
    pub learning_rate: f32,
    /// Every n-th sample is held out for validation; zero holds out nothing.
    #[builder(default = 5)]
    pub holdout_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Summary of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainReport {
    /// Samples the model was fitted on.
    pub trained_on:     usize,
    /// Samples held out.
    pub validated_on:   usize,
    /// Mean absolute error on the held-out samples, if there were any.
    pub validation_mae: Option<f64>,
}

/// Extracts features for every sample with `grader` and fits a regressor.
pub fn train(
    grader: &Grader,
    samples: &[TrainingSample],
    config: &TrainConfig,
) -> Result<(ModelArtifact, TrainReport), ModelError> {
    let mut fit_set = Vec::new();
    let mut holdout = Vec::new();
    for (i, sample) in samples.iter().enumerate() {
        let features = grader.features(&Document::new(sample.essay.as_str()));
        let held_out =
            config.holdout_every > 0 && i % config.holdout_every == config.holdout_every - 1;
        if held_out {
            holdout.push((features, sample.score));
        } else {
            fit_set.push((features, sample.score));
        }
    }

    if fit_set.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }

    tracing::info!(
        train = fit_set.len(),
        validate = holdout.len(),
        trees = config.trees,
        "fitting scoring model"
    );

    let mut cfg = Config::new();
    cfg.set_feature_size(NUM_FEATURES);
    cfg.set_max_depth(config.max_depth);
    cfg.set_iterations(config.trees);
    cfg.set_shrinkage(config.learning_rate);
    cfg.set_loss("SquaredError");
    cfg.set_debug(false);
    cfg.set_min_leaf_size(1);
    cfg.set_training_optimization_level(2);

    let mut model = GBDT::new(&cfg);
    let mut data: Vec<Data> = fit_set
        .iter()
        .map(|(f, score)| Data::new_training_data(f.to_f32(), 1.0, *score as f32, None))
        .collect();
    model.fit(&mut data);

    let artifact = ModelArtifact::new(model);
    let validation_mae = mean_absolute_error(&artifact, &holdout);
    if let Some(mae) = validation_mae {
        tracing::info!(mae, "validation complete");
    }

    let report = TrainReport {
        trained_on: fit_set.len(),
        validated_on: holdout.len(),
        validation_mae,
    };
    Ok((artifact, report))
}

/// MAE of the artifact's clamped predictions, `None` for an empty set.
fn mean_absolute_error(artifact: &ModelArtifact, samples: &[(Features, f64)]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples
        .iter()
        .map(|(f, score)| (artifact.predict(f).clamp(0.0, 100.0) - score).abs())
        .sum();
    Some(round_to(total / samples.len() as f64, 2))
}

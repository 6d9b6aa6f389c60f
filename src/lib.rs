//! # essaymark
//!
//! Scores essays and explains the score.
//!
//! A document is segmented into words and sentences, measured by a set of
//! heuristic extractors (length, clarity, vocabulary, readability, style)
//! and by adapters around external analyzers (readability indices,
//! sentiment, grammar, topic relevance). The heuristics combine into a fixed
//! weighted overall score, a learned model scores the combined features, and
//! a feedback narrative lists what to improve.
//!
//! ```no_run
//! let result = essaymark::grade("This is a simple sentence. It has some words.");
//! println!("{} / 100\n{}", result.overall, result.feedback);
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// External-signal adapters.
pub mod adapters;
/// Scoring policy and adapter settings.
pub mod config;
/// Documents and token streams.
pub mod document;
/// The grading pipeline and its results.
pub mod grade;
/// Heuristic metric extractors.
pub mod metrics;
/// Learned-model scoring and training.
pub mod model;
/// Aggregation across many graded essays.
pub mod report;
/// Sentence and word segmentation.
pub mod text;

use std::sync::LazyLock;

pub use crate::{
    config::{AdapterSettings, ScoringPolicy},
    document::{Document, TokenStream},
    grade::{EssayRecord, Grader, ScoreResult},
    report::Dashboard,
    text::segment,
};

/// Offline grader shared by [`grade`].
static DEFAULT_GRADER: LazyLock<Grader> = LazyLock::new(Grader::default);

/// Grades `text` with the default policy, no remote grammar checker and no
/// trained model.
pub fn grade(text: &str) -> ScoreResult {
    DEFAULT_GRADER.grade(text)
}

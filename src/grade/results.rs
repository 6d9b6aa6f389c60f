#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{
    adapters::{GrammarReport, ReadabilityIndex, Sentiment},
    metrics::{Diagnostics, TextStats},
    model::ModelScore,
};

/// Signals from the external analyzers and the learned model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedAnalysis {
    /// Readability indices.
    pub readability:     ReadabilityIndex,
    /// Sentiment polarity.
    pub sentiment:       Sentiment,
    /// Grammar issues, corrected text and score.
    pub grammar:         GrammarReport,
    /// Similarity to the topic and keywords, 0-100.
    pub topic_relevance: f64,
    /// Learned-model score and the features it saw.
    pub model:           ModelScore,
    /// One note per adapter that fell back, e.g. `grammar: request failed`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded:        Vec<String>,
}

/// The full outcome of grading one document.
///
/// Built fresh for every call and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Length against the target word count.
    pub length_score:      f64,
    /// Sentence-length clarity.
    pub clarity_score:     f64,
    /// Vocabulary richness.
    pub vocab_score:       f64,
    /// Reading-ease proxy.
    pub readability_score: f64,
    /// Weighted composite of the four scores above.
    pub overall:           f64,
    /// Newline-separated suggestions.
    pub feedback:          String,
    /// Word and sentence counts.
    pub stats:             TextStats,
    /// Style findings.
    pub meta:              Diagnostics,
    /// External signals.
    pub extended:          ExtendedAnalysis,
    /// Version of the scoring policy that produced this result.
    pub policy_version:    u32,
}

/// A graded essay as a storage layer would keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayRecord {
    /// Length score.
    pub score_length:      f64,
    /// Clarity score.
    pub score_clarity:     f64,
    /// Vocabulary score.
    pub score_vocabulary:  f64,
    /// Readability score.
    pub score_readability: f64,
    /// Overall score.
    pub score_overall:     f64,
    /// Feedback narrative.
    pub feedback:          String,
    /// The extended analysis as free-form JSON.
    pub analysis:          serde_json::Value,
    /// When the essay was graded.
    pub graded_at:         DateTime<Utc>,
}

/// One row of the score table.
#[derive(Tabled)]
struct ScoreRow {
    /// Metric name.
    #[tabled(rename = "Metric")]
    metric: &'static str,
    /// Formatted score.
    #[tabled(rename = "Score")]
    score:  String,
}

impl ScoreResult {
    /// Flattens the result into an [`EssayRecord`] stamped with the current
    /// time.
    pub fn to_record(&self) -> EssayRecord {
        self.to_record_at(Utc::now())
    }

    /// Like [`ScoreResult::to_record`] with an explicit timestamp.
    pub fn to_record_at(&self, graded_at: DateTime<Utc>) -> EssayRecord {
        EssayRecord {
            score_length: self.length_score,
            score_clarity: self.clarity_score,
            score_vocabulary: self.vocab_score,
            score_readability: self.readability_score,
            score_overall: self.overall,
            feedback: self.feedback.clone(),
            analysis: serde_json::to_value(&self.extended).unwrap_or(serde_json::Value::Null),
            graded_at,
        }
    }

    /// True when any adapter fell back.
    pub fn is_degraded(&self) -> bool {
        !self.extended.degraded.is_empty()
    }

    /// Renders the scores as a table.
    pub fn score_table(&self) -> String {
        let ext = &self.extended;
        let rows = [
            ("Length", self.length_score),
            ("Clarity", self.clarity_score),
            ("Vocabulary", self.vocab_score),
            ("Readability", self.readability_score),
            ("Readability index", ext.readability.readability_score),
            ("Sentiment", ext.sentiment.positivity),
            ("Grammar", ext.grammar.grammar_score),
            ("Topic relevance", ext.topic_relevance),
            ("Model", ext.model.score),
        ]
        .map(|(metric, score)| ScoreRow {
            metric,
            score: format!("{score:.2}"),
        });

        Table::new(rows)
            .with(Panel::header("Essay Scores"))
            .with(Panel::footer(format!("Overall: {:.2}/100", self.overall)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
            .to_string()
    }
}

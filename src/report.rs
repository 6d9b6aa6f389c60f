#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Roll-ups across many graded essays.

use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{grade::ScoreResult, metrics::round_to};

/// Essays shorter than this count as short.
pub const SHORT_ESSAY_WORDS: usize = 150;

/// Readability proxies below this count as low.
pub const LOW_READABILITY: f64 = 60.0;

/// Topic relevance at or above this is high.
pub const HIGH_RELEVANCE: f64 = 70.0;

/// Topic relevance at or above this, and below [`HIGH_RELEVANCE`], is medium.
pub const MEDIUM_RELEVANCE: f64 = 40.0;

/// Mean primary scores, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageScores {
    /// Mean length score.
    pub length:      f64,
    /// Mean clarity score.
    pub clarity:     f64,
    /// Mean vocabulary score.
    pub vocabulary:  f64,
    /// Mean readability score.
    pub readability: f64,
}

/// How many essays share one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct IssueCount {
    /// Problem name.
    #[tabled(rename = "Issue")]
    pub label: String,
    /// Number of essays with it.
    #[tabled(rename = "Essays")]
    pub count: usize,
}

/// Essays per topic-relevance band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicBuckets {
    /// Relevance of at least 70.
    pub high:   usize,
    /// Relevance of at least 40.
    pub medium: usize,
    /// Anything lower.
    pub low:    usize,
}

impl TopicBuckets {
    /// Counts `relevance` in its band.
    fn add(&mut self, relevance: f64) {
        if relevance >= HIGH_RELEVANCE {
            self.high += 1;
        } else if relevance >= MEDIUM_RELEVANCE {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }
}

/// Dashboard data for a list of graded essays in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// One label per essay.
    pub labels:          Vec<String>,
    /// Overall score per essay.
    pub overall_scores:  Vec<f64>,
    /// Mean primary scores.
    pub avg_scores:      AverageScores,
    /// Problems seen in at least one essay, in a fixed order.
    pub issues:          Vec<IssueCount>,
    /// Sentiment positivity per essay.
    pub sentiments:      Vec<f64>,
    /// Grammar issue count per essay.
    pub grammar_counts:  Vec<usize>,
    /// Essays per topic-relevance band.
    pub topic_relevance: TopicBuckets,
    /// Number of essays, at least one.
    pub total:           usize,
}

/// One row of the per-essay table.
#[derive(Tabled)]
struct EssayRow<'a> {
    /// Essay label.
    #[tabled(rename = "Essay")]
    label:    &'a str,
    /// Overall score.
    #[tabled(rename = "Overall")]
    overall:  String,
    /// Sentiment positivity.
    #[tabled(rename = "Sentiment")]
    positive: String,
    /// Grammar issue count.
    #[tabled(rename = "Grammar issues")]
    grammar:  usize,
}

/// A name and a value.
#[derive(Tabled)]
struct SummaryRow {
    /// What is counted or averaged.
    #[tabled(rename = "")]
    name:  &'static str,
    /// The formatted value.
    #[tabled(rename = "Value")]
    value: String,
}

impl SummaryRow {
    /// Formats `value` for display.
    fn new(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

impl Dashboard {
    /// Aggregates `(label, result)` pairs.
    pub fn build<'a, I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, &'a ScoreResult)>,
        S: Into<String>,
    {
        let mut dashboard = Self::default();
        let mut sums = AverageScores::default();
        let mut counts = [0usize; 6];

        for (label, result) in entries {
            dashboard.labels.push(label.into());
            dashboard.overall_scores.push(result.overall);
            dashboard.sentiments.push(result.extended.sentiment.positivity);
            dashboard.grammar_counts.push(result.extended.grammar.issue_count());
            dashboard.topic_relevance.add(result.extended.topic_relevance);

            sums.length += result.length_score;
            sums.clarity += result.clarity_score;
            sums.vocabulary += result.vocab_score;
            sums.readability += result.readability_score;

            let meta = &result.meta;
            let flags = [
                result.stats.total_words < SHORT_ESSAY_WORDS,
                result.readability_score < LOW_READABILITY,
                meta.passive_hits > 0,
                !meta.hedges.is_empty(),
                !meta.repeated.is_empty(),
                !meta.misspellings.is_empty(),
            ];
            for (count, flagged) in counts.iter_mut().zip(flags) {
                *count += usize::from(flagged);
            }
        }

        let n = dashboard.labels.len().max(1);
        let mean = |sum: f64| round_to(sum / n as f64, 1);
        dashboard.avg_scores = AverageScores {
            length:      mean(sums.length),
            clarity:     mean(sums.clarity),
            vocabulary:  mean(sums.vocabulary),
            readability: mean(sums.readability),
        };
        dashboard.issues = issue_labels()
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| IssueCount { label, count })
            .collect();
        dashboard.total = n;

        dashboard
    }

    /// Renders the dashboard as tables.
    pub fn render(&self) -> String {
        let rows = self
            .labels
            .iter()
            .zip(&self.overall_scores)
            .zip(&self.sentiments)
            .zip(&self.grammar_counts)
            .map(|(((label, overall), positive), grammar)| EssayRow {
                label,
                overall: format!("{overall:.2}"),
                positive: format!("{positive:.2}"),
                grammar: *grammar,
            });

        let essays = Table::new(rows)
            .with(Panel::header(format!("Essays ({})", self.labels.len())))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
            .to_string();

        let avg = &self.avg_scores;
        let averages = Table::new([
            SummaryRow::new("Length", format!("{:.1}", avg.length)),
            SummaryRow::new("Clarity", format!("{:.1}", avg.clarity)),
            SummaryRow::new("Vocabulary", format!("{:.1}", avg.vocabulary)),
            SummaryRow::new("Readability", format!("{:.1}", avg.readability)),
        ])
        .with(Panel::header("Average scores"))
        .with(Style::modern())
        .to_string();

        let topics = &self.topic_relevance;
        let relevance = Table::new([
            SummaryRow::new("High", topics.high),
            SummaryRow::new("Medium", topics.medium),
            SummaryRow::new("Low", topics.low),
        ])
        .with(Panel::header("Topic relevance"))
        .with(Style::modern())
        .to_string();

        let mut sections = vec![essays, averages];
        if !self.issues.is_empty() {
            sections.push(
                Table::new(&self.issues)
                    .with(Panel::header("Common issues"))
                    .with(Style::modern())
                    .to_string(),
            );
        }
        sections.push(relevance);
        sections.join("\n")
    }
}

/// Issue names in reporting order.
fn issue_labels() -> [String; 6] {
    [
        format!("Short (<{SHORT_ESSAY_WORDS} words)"),
        format!("Low readability (<{LOW_READABILITY})"),
        "Passive voice".to_string(),
        "Hedging".to_string(),
        "Repeated words".to_string(),
        "Misspellings".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dashboard_divides_by_one() {
        let dashboard = Dashboard::build(Vec::<(String, &ScoreResult)>::new());
        assert_eq!(dashboard.total, 1);
        assert_eq!(dashboard.avg_scores, AverageScores::default());
        assert!(dashboard.issues.is_empty());
        assert_eq!(dashboard.topic_relevance, TopicBuckets::default());
    }

    #[test]
    fn buckets_use_inclusive_lower_bounds() {
        let mut buckets = TopicBuckets::default();
        for relevance in [70.0, 69.99, 40.0, 39.99, 0.0] {
            buckets.add(relevance);
        }
        assert_eq!(buckets, TopicBuckets { high: 1, medium: 2, low: 2 });
    }

    #[test]
    fn labels_read_naturally() {
        let labels = issue_labels();
        assert_eq!(labels[0], "Short (<150 words)");
        assert_eq!(labels[1], "Low readability (<60)");
    }
}

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The grading pipeline.
//!
//! Text is segmented once; the heuristic extractors and the external-signal
//! adapters then run over the same tokens, the learned model scores their
//! combined features, and the feedback generator reads the heuristics.

/// Word diffs between a text and its grammar correction.
pub mod diff;
/// Feedback narrative.
pub mod feedback;
/// Result types.
pub mod results;

use std::sync::Arc;

use typed_builder::TypedBuilder;

pub use self::results::{EssayRecord, ExtendedAnalysis, ScoreResult};
use crate::{
    adapters::{
        AnalysisInput, GrammarAdapter, GrammarReport, LanguageToolClient, ReadabilityIndex,
        ReadabilityIndexer, Sentiment, SentimentAnalyzer, Signal, TopicRelevance, collect_signal,
    },
    config::{AdapterSettings, ScoringPolicy},
    document::{Document, TokenStream},
    metrics::{HeuristicMetrics, round_to},
    model::{Features, ModelScorer},
    text::segment,
};

/// Grades documents.
///
/// Holds the scoring policy and every initialised adapter. Build one at start
/// up and share it; grading only reads from it.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct Grader {
    /// Weights and thresholds.
    #[builder(default)]
    policy:      ScoringPolicy,
    /// Readability indices.
    #[builder(default)]
    readability: ReadabilityIndexer,
    /// Sentiment polarity.
    #[builder(default)]
    sentiment:   SentimentAnalyzer,
    /// Grammar checking.
    #[builder(default)]
    grammar:     GrammarAdapter,
    /// Topic relevance.
    #[builder(default)]
    topic:       TopicRelevance,
    /// Learned-model scorer.
    #[builder(default)]
    model:       ModelScorer,
}

/// Adapter signals for one document, before topic relevance.
struct CoreSignals {
    /// Readability indices.
    readability: Signal<ReadabilityIndex>,
    /// Sentiment polarity.
    sentiment:   Signal<Sentiment>,
    /// Grammar findings.
    grammar:     Signal<GrammarReport>,
}

impl CoreSignals {
    /// Model inputs built from these signals.
    fn features(&self, tokens: &TokenStream) -> Features {
        Features::from_signals(
            tokens,
            &self.readability.value,
            &self.sentiment.value,
            &self.grammar.value,
        )
    }
}

impl Grader {
    /// Wires the remote grammar checker and the model artifact described by
    /// `settings`. Anything that cannot be set up is logged and left out.
    pub fn from_settings(settings: &AdapterSettings) -> Self {
        let grammar = match settings.languagetool_url() {
            Some(url) => {
                match LanguageToolClient::new(
                    url,
                    settings.grammar_language(),
                    settings.grammar_timeout(),
                ) {
                    Ok(client) => {
                        tracing::debug!(endpoint = client.endpoint(), "grammar checker configured");
                        GrammarAdapter::with_checker(Arc::new(client), settings.max_issues())
                    }
                    Err(e) => {
                        tracing::warn!("grammar checker unavailable: {e}");
                        GrammarAdapter::offline()
                    }
                }
            }
            None => GrammarAdapter::offline(),
        };

        Self::builder()
            .grammar(grammar)
            .model(ModelScorer::from_path(settings.model_path()))
            .build()
    }

    /// The scoring policy in force.
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// The learned-model scorer.
    pub fn model(&self) -> &ModelScorer {
        &self.model
    }

    /// The grammar adapter.
    pub fn grammar(&self) -> &GrammarAdapter {
        &self.grammar
    }

    /// Grades bare text with no topic.
    pub fn grade(&self, text: &str) -> ScoreResult {
        self.grade_document(&Document::new(text))
    }

    /// Grades a document. Never fails: an adapter that errors contributes
    /// its fallback value and a note in `extended.degraded`.
    #[tracing::instrument(skip_all, fields(chars = document.text().len()))]
    pub fn grade_document(&self, document: &Document) -> ScoreResult {
        let tokens = segment(document.text());
        let metrics = HeuristicMetrics::extract(&tokens, document.text(), &self.policy);

        let input = AnalysisInput::new(document, &tokens, &self.policy);
        let signals = self.core_signals(&input);
        let topic = collect_signal(&self.topic, &input);

        let features = signals.features(&tokens);
        let model = self.model.score(&features, &self.policy.model_fallback);
        let feedback = feedback::generate(&metrics, &self.policy.feedback);

        let degraded: Vec<String> = [
            &signals.readability.degraded,
            &signals.sentiment.degraded,
            &signals.grammar.degraded,
            &topic.degraded,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        let scores = &metrics.scores;
        let overall = metrics.overall(&self.policy);
        tracing::debug!(overall, model = model.score, degraded = degraded.len(), "graded");

        ScoreResult {
            length_score: round_to(scores.length, 2),
            clarity_score: round_to(scores.clarity, 2),
            vocab_score: round_to(scores.vocabulary, 2),
            readability_score: round_to(scores.readability, 2),
            overall,
            feedback,
            stats: metrics.stats,
            meta: metrics.diagnostics,
            extended: ExtendedAnalysis {
                readability: signals.readability.value,
                sentiment: signals.sentiment.value,
                grammar: signals.grammar.value,
                topic_relevance: topic.value,
                model,
                degraded,
            },
            policy_version: self.policy.version,
        }
    }

    /// Model inputs for a document, extracted exactly as during grading.
    pub fn features(&self, document: &Document) -> Features {
        let tokens = segment(document.text());
        let input = AnalysisInput::new(document, &tokens, &self.policy);
        self.core_signals(&input).features(&tokens)
    }

    /// Runs the readability, sentiment and grammar adapters.
    fn core_signals(&self, input: &AnalysisInput<'_>) -> CoreSignals {
        CoreSignals {
            readability: collect_signal(&self.readability, input),
            sentiment:   collect_signal(&self.sentiment, input),
            grammar:     collect_signal(&self.grammar, input),
        }
    }
}

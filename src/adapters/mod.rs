#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Adapters around external text analyzers.
//!
//! Each adapter reports `Result<Output, AdapterError>` and declares the value
//! to use when it fails. [`collect_signal`] is the only place a failure is
//! turned into that fallback, so one adapter going wrong never stops the
//! others or the grading call.

/// LanguageTool-backed grammar checking with built-in fallbacks.
pub mod grammar;
/// Reading-ease and grade-level indices.
pub mod readability;
/// Lexicon-based sentiment polarity.
pub mod sentiment;
/// TF-IDF topic relevance.
pub mod topic;

use serde::{Deserialize, Serialize};

pub use self::{
    grammar::{GrammarAdapter, GrammarChecker, GrammarIssue, GrammarReport, LanguageToolClient},
    readability::{ReadabilityIndex, ReadabilityIndexer},
    sentiment::{Sentiment, SentimentAnalyzer},
    topic::TopicRelevance,
};
use crate::{
    config::ScoringPolicy,
    document::{Document, TokenStream},
};

/// Reasons an adapter could not produce its signal.
#[derive(thiserror::Error, Debug)]
pub enum AdapterError {
    /// The backing service is not configured.
    #[error("{0} is not configured")]
    Unavailable(&'static str),
    /// The HTTP request failed or returned an error status.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with something we could not interpret.
    #[error("could not decode the response: {0}")]
    Decode(String),
    /// Nothing was left to compare once stop words were removed.
    #[error("empty vocabulary; the texts only contain stop words")]
    EmptyVocabulary,
    /// A computation produced NaN or infinity.
    #[error("{0} produced a non-finite value")]
    NonFinite(&'static str),
}

/// Everything an adapter may look at.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    /// The submitted document.
    pub document: &'a Document,
    /// Its segmentation.
    pub tokens:   &'a TokenStream,
    /// The scoring policy in force.
    pub policy:   &'a ScoringPolicy,
}

impl<'a> AnalysisInput<'a> {
    /// Bundles the inputs.
    pub fn new(document: &'a Document, tokens: &'a TokenStream, policy: &'a ScoringPolicy) -> Self {
        Self {
            document,
            tokens,
            policy,
        }
    }

    /// Raw document text.
    pub fn text(&self) -> &'a str {
        self.document.text()
    }

    /// Number of whitespace-separated chunks in the text.
    pub fn whitespace_words(&self) -> usize {
        self.document.text().split_whitespace().count()
    }
}

/// A wrapped third-party signal with a declared fallback.
pub trait SignalAdapter: Send + Sync {
    /// The value this adapter contributes.
    type Output;

    /// Short name used in logs and degradation notes.
    fn name(&self) -> &'static str;

    /// Computes the signal.
    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Self::Output, AdapterError>;

    /// The value reported when [`SignalAdapter::analyze`] fails.
    fn fallback(&self, input: &AnalysisInput<'_>) -> Self::Output;
}

/// An adapter's value, and why it degraded if it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal<T> {
    /// The reported value.
    pub value:    T,
    /// Set when the fallback was used.
    pub degraded: Option<String>,
}

impl<T> Signal<T> {
    /// True when the fallback value was used.
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Runs `adapter`, substituting its fallback on failure.
pub fn collect_signal<A>(adapter: &A, input: &AnalysisInput<'_>) -> Signal<A::Output>
where
    A: SignalAdapter + ?Sized,
{
    match adapter.analyze(input) {
        Ok(value) => Signal {
            value,
            degraded: None,
        },
        Err(err) => {
            tracing::warn!(adapter = adapter.name(), "using fallback value: {err}");
            Signal {
                value:    adapter.fallback(input),
                degraded: Some(format!("{}: {err}", adapter.name())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::segment;

    /// Always fails, falls back to 7.
    struct Broken;

    impl SignalAdapter for Broken {
        type Output = u32;

        fn name(&self) -> &'static str {
            "broken"
        }

        fn analyze(&self, _: &AnalysisInput<'_>) -> Result<u32, AdapterError> {
            Err(AdapterError::Unavailable("broken service"))
        }

        fn fallback(&self, _: &AnalysisInput<'_>) -> u32 {
            7
        }
    }

    #[test]
    fn failure_yields_fallback_with_note() {
        let doc = Document::new("Some text here.");
        let tokens = segment(doc.text());
        let policy = ScoringPolicy::default();
        let signal = collect_signal(&Broken, &AnalysisInput::new(&doc, &tokens, &policy));
        assert_eq!(signal.value, 7);
        assert_eq!(signal.degraded.as_deref(), Some("broken: broken service is not configured"));
    }
}

//! Topic relevance: TF-IDF cosine similarity between the essay and its topic.

mod stop_words;

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;

use super::{AdapterError, AnalysisInput, SignalAdapter};
use crate::metrics::round_to;

/// Runs of two or more word characters.
static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Stop words as a set.
static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| stop_words::ENGLISH_STOP_WORDS.iter().copied().collect());

/// Scores how closely an essay tracks its topic and keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicRelevance;

impl SignalAdapter for TopicRelevance {
    type Output = f64;

    fn name(&self) -> &'static str {
        "topic relevance"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<f64, AdapterError> {
        let document = input.document;
        if document.lacks_topic() {
            return Ok(input.policy.topic_neutral);
        }

        let target = format!(
            "{} {}",
            document.topic().unwrap_or_default(),
            document.keywords().join(" ")
        );
        let similarity = tfidf_cosine(document.text(), &target)?;
        Ok(round_to(similarity * 100.0, 2))
    }

    fn fallback(&self, _: &AnalysisInput<'_>) -> f64 {
        0.0
    }
}

/// Unigrams and bigrams of `text` with stop words removed.
pub fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TERM
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

/// Cosine similarity of the L2-normalised TF-IDF vectors of `a` and `b`,
/// fitted on the two-document corpus `{a, b}`.
pub fn tfidf_cosine(a: &str, b: &str) -> Result<f64, AdapterError> {
    let (terms_a, terms_b) = (terms(a), terms(b));
    let counts_a = term_counts(&terms_a);
    let counts_b = term_counts(&terms_b);

    let vocabulary: HashSet<&str> = counts_a.keys().chain(counts_b.keys()).copied().collect();
    if vocabulary.is_empty() {
        return Err(AdapterError::EmptyVocabulary);
    }

    let n_docs = 2.0;
    let idf = |term: &str| {
        let df = [&counts_a, &counts_b]
            .iter()
            .filter(|counts| counts.contains_key(term))
            .count() as f64;
        ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
    };

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for term in vocabulary {
        let weight = idf(term);
        let wa = counts_a.get(term).copied().unwrap_or(0.0) * weight;
        let wb = counts_b.get(term).copied().unwrap_or(0.0) * weight;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return Err(AdapterError::NonFinite("topic relevance"));
    }
    Ok(similarity.clamp(0.0, 1.0))
}

/// Raw term frequencies.
fn term_counts(terms: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScoringPolicy, document::Document, text::segment};

    fn relevance(doc: &Document) -> Result<f64, AdapterError> {
        let tokens = segment(doc.text());
        let policy = ScoringPolicy::default();
        TopicRelevance.analyze(&AnalysisInput::new(doc, &tokens, &policy))
    }

    #[test]
    fn no_topic_is_neutral() {
        let doc = Document::new("Anything at all.");
        assert_eq!(relevance(&doc).expect("relevance"), 50.0);
    }

    #[test]
    fn on_topic_beats_off_topic() {
        let on = Document::builder()
            .text("Climate change raises sea levels. Climate policy must cut carbon emissions.")
            .topic("Climate change policy")
            .build();
        let off = Document::builder()
            .text("My cat enjoys sleeping in the sun and chasing string.")
            .topic("Climate change policy")
            .build();
        let on = relevance(&on).expect("relevance");
        let off = relevance(&off).expect("relevance");
        assert!(on > off);
        assert_eq!(off, 0.0);
        assert!(on <= 100.0);
    }

    #[test]
    fn identical_texts_score_full() {
        let sim = tfidf_cosine("solar panels energy", "solar panels energy").expect("cosine");
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stop_words_only_is_an_error() {
        assert!(matches!(tfidf_cosine("the and of", "it is"), Err(AdapterError::EmptyVocabulary)));
    }

    #[test]
    fn bigrams_skip_stop_words() {
        assert_eq!(terms("The cost of energy"), vec!["cost", "energy", "cost energy"]);
    }
}

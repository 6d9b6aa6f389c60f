#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// An essay submitted for grading.
///
/// The text is the only identity a document has inside the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
pub struct Document {
    /// Raw essay text.
    #[builder(setter(into))]
    text:     String,
    /// Title or prompt the essay responds to.
    #[builder(default, setter(strip_option, into))]
    topic:    Option<String>,
    /// Keywords the essay is expected to cover.
    #[builder(default)]
    keywords: Vec<String>,
}

impl Document {
    /// Creates a document with no topic or keywords.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text:     text.into(),
            topic:    None,
            keywords: Vec::new(),
        }
    }

    /// Returns the raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the topic, if any.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Returns the keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when neither a non-blank topic nor any keywords were supplied.
    pub fn lacks_topic(&self) -> bool {
        self.topic().is_none_or(|t| t.trim().is_empty()) && self.keywords.is_empty()
    }
}

/// Words and sentences of a document, as produced by [`crate::text::segment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    /// Sentences in document order, trimmed.
    sentences:      Vec<String>,
    /// Lowercase word tokens in document order.
    words:          Vec<String>,
    /// The same tokens with their original casing.
    original_words: Vec<String>,
}

impl TokenStream {
    /// Assembles a stream. `words` and `original_words` must be parallel.
    pub(crate) fn new(
        sentences: Vec<String>,
        words: Vec<String>,
        original_words: Vec<String>,
    ) -> Self {
        debug_assert_eq!(words.len(), original_words.len());
        Self {
            sentences,
            words,
            original_words,
        }
    }

    /// Returns the sentences.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Returns the lowercase words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the words as written.
    pub fn original_words(&self) -> &[String] {
        &self.original_words
    }

    /// Number of word tokens.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Words per sentence, or zero when there are no sentences.
    pub fn avg_sentence_len(&self) -> f64 {
        if self.sentences.is_empty() {
            0.0
        } else {
            self.words.len() as f64 / self.sentences.len() as f64
        }
    }

    /// True when the document had no word characters.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Splits the stream into `(sentences, words)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.sentences, self.words)
    }
}

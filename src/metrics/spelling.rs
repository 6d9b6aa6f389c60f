//! Lookup of common misspellings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::TokenStream;

/// Misspelling and correction pairs.
pub const COMMON_MISSPELLINGS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("recieve", "receive"),
    ("definately", "definitely"),
    ("occured", "occurred"),
    ("seperate", "separate"),
    ("wich", "which"),
    ("adress", "address"),
    ("becuase", "because"),
    ("enviroment", "environment"),
    ("goverment", "government"),
];

/// A misspelled word found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misspelling {
    /// The misspelled token, lowercase.
    pub wrong:    String,
    /// The suggested correction.
    pub right:    String,
    /// The token as it first appeared in the text.
    pub original: String,
}

/// Returns the correction for a lowercase token, if it is a known misspelling.
pub fn correction_for(word: &str) -> Option<&'static str> {
    COMMON_MISSPELLINGS
        .iter()
        .find(|(wrong, _)| *wrong == word)
        .map(|(_, right)| *right)
}

/// Known misspellings in document order, one entry per distinct token.
pub fn find_misspellings(tokens: &TokenStream) -> Vec<Misspelling> {
    let mut seen = HashSet::new();
    tokens
        .words()
        .iter()
        .zip(tokens.original_words())
        .filter_map(|(word, original)| {
            let right = correction_for(word)?;
            seen.insert(word.as_str()).then(|| Misspelling {
                wrong:    word.clone(),
                right:    right.to_string(),
                original: original.clone(),
            })
        })
        .collect()
}

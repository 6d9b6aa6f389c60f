//! Word-level rendering of grammar corrections.

use colored::Colorize;
use similar::{Algorithm, ChangeTag, utils::diff_unicode_words};

/// A correction diff in two flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionDiff {
    /// Removed words in red, inserted words in green.
    pub colored: String,
    /// Removed words as `[-word-]`, inserted words as `{+word+}`.
    pub plain:   String,
    /// Number of changed, non-whitespace spans.
    pub changes: usize,
}

/// Diffs `original` against `corrected` word by word.
pub fn render_corrections(original: &str, corrected: &str) -> CorrectionDiff {
    let mut colored = String::new();
    let mut plain = String::new();
    let mut changes = 0;

    for (tag, value) in diff_unicode_words(Algorithm::Patience, original, corrected) {
        match tag {
            ChangeTag::Equal => {
                colored.push_str(value);
                plain.push_str(value);
            }
            ChangeTag::Delete => {
                colored.push_str(&format!("{}", value.red().strikethrough()));
                plain.push_str(&format!("[-{value}-]"));
                if !value.trim().is_empty() {
                    changes += 1;
                }
            }
            ChangeTag::Insert => {
                colored.push_str(&format!("{}", value.green()));
                plain.push_str(&format!("{{+{value}+}}"));
                if !value.trim().is_empty() {
                    changes += 1;
                }
            }
        }
    }

    CorrectionDiff {
        colored,
        plain,
        changes,
    }
}

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Grammar and style checking.
//!
//! The primary checker is a LanguageTool server reached over HTTP. When no
//! checker is configured, it fails, or it reports nothing, two built-in checks
//! run instead: adjacent duplicate words and double spaces.

use std::{sync::Arc, time::Duration};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{AdapterError, AnalysisInput, SignalAdapter};

/// Characters of context kept on either side of an issue.
const CONTEXT_CHARS: usize = 20;

/// Replacement suggestions kept per issue.
const MAX_SUGGESTIONS: usize = 3;

/// One match reported by a grammar checker. Offsets count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerMatch {
    /// Human-readable description.
    pub message:      String,
    /// Start of the flagged span.
    pub offset:       usize,
    /// Length of the flagged span.
    pub length:       usize,
    /// Suggested replacements, best first.
    pub replacements: Vec<String>,
}

impl CheckerMatch {
    /// End of the flagged span, `None` if it overflows.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }
}

/// Anything that can check a text for grammar and style issues.
pub trait GrammarChecker: Send + Sync {
    /// Returns every match the checker finds in `text`.
    fn check(&self, text: &str) -> Result<Vec<CheckerMatch>, AdapterError>;
}

/// Blocking client for the LanguageTool `/v2/check` endpoint.
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    /// HTTP client with the request timeout applied.
    client:   Client,
    /// Base URL, without the `/v2/check` suffix.
    endpoint: String,
    /// Language code, e.g. `en-US`.
    language: String,
}

impl LanguageToolClient {
    /// Creates a client for the server at `endpoint`.
    pub fn new(
        endpoint: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdapterError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    /// Returns the configured base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `/v2/check` response body.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    /// Reported matches.
    #[serde(default)]
    matches: Vec<ResponseMatch>,
}

/// A single match in a `/v2/check` response.
#[derive(Debug, Deserialize)]
struct ResponseMatch {
    /// Description of the problem.
    message:      String,
    /// Start of the span.
    offset:       usize,
    /// Length of the span.
    length:       usize,
    /// Suggested replacements.
    #[serde(default)]
    replacements: Vec<ResponseReplacement>,
}

/// A replacement suggestion.
#[derive(Debug, Deserialize)]
struct ResponseReplacement {
    /// Replacement text.
    value: String,
}

impl GrammarChecker for LanguageToolClient {
    fn check(&self, text: &str) -> Result<Vec<CheckerMatch>, AdapterError> {
        let url = format!("{}/v2/check", self.endpoint);
        let response: CheckResponse = self
            .client
            .post(&url)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()?
            .error_for_status()?
            .json()
            .map_err(|e| AdapterError::Decode(e.to_string()))?;

        tracing::debug!(matches = response.matches.len(), "languagetool responded");

        Ok(response
            .matches
            .into_iter()
            .map(|m| CheckerMatch {
                message:      m.message,
                offset:       m.offset,
                length:       m.length,
                replacements: m.replacements.into_iter().map(|r| r.value).collect(),
            })
            .collect())
    }
}

/// An issue as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    /// What is wrong.
    pub message:     String,
    /// Text surrounding the issue.
    pub context:     String,
    /// Up to three replacements, or a fix-it hint for built-in checks.
    pub suggestions: Vec<String>,
}

/// Grammar findings for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarReport {
    /// Issues found, at most the configured maximum.
    pub issues:         Vec<GrammarIssue>,
    /// The text with each checker match's first replacement applied.
    pub corrected_text: String,
    /// `100` minus two points per issue, penalty capped at 30.
    pub grammar_score:  f64,
}

impl GrammarReport {
    /// Number of issues.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Grammar signal: a remote checker when available, built-in checks otherwise.
#[derive(Clone)]
pub struct GrammarAdapter {
    /// Remote checker, if configured.
    checker:    Option<Arc<dyn GrammarChecker>>,
    /// Issues kept from the checker.
    max_issues: usize,
}

impl Default for GrammarAdapter {
    fn default() -> Self {
        Self::offline()
    }
}

impl std::fmt::Debug for GrammarAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarAdapter")
            .field("checker", &self.checker.as_ref().map(|_| "configured"))
            .field("max_issues", &self.max_issues)
            .finish()
    }
}

impl GrammarAdapter {
    /// Only the built-in checks.
    pub fn offline() -> Self {
        Self {
            checker:    None,
            max_issues: 20,
        }
    }

    /// Uses `checker` first, keeping at most `max_issues` of its matches.
    pub fn with_checker(checker: Arc<dyn GrammarChecker>, max_issues: usize) -> Self {
        Self {
            checker: Some(checker),
            max_issues,
        }
    }

    /// True when a remote checker is configured.
    pub fn has_checker(&self) -> bool {
        self.checker.is_some()
    }

    /// Builds the report from issues and the corrected text.
    fn report(
        issues: Vec<GrammarIssue>,
        corrected_text: String,
        input: &AnalysisInput<'_>,
    ) -> GrammarReport {
        let grammar_score = grammar_score(
            issues.len(),
            input.policy.grammar_points_per_issue,
            input.policy.grammar_max_penalty,
        );
        GrammarReport {
            issues,
            corrected_text,
            grammar_score,
        }
    }
}

impl SignalAdapter for GrammarAdapter {
    type Output = GrammarReport;

    fn name(&self) -> &'static str {
        "grammar"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<GrammarReport, AdapterError> {
        let text = input.text();
        let Some(checker) = &self.checker else {
            return Ok(self.fallback(input));
        };

        let char_count = text.chars().count();
        let matches: Vec<CheckerMatch> = checker
            .check(text)?
            .into_iter()
            .filter(|m| {
                let in_range = m.end().is_some_and(|end| end <= char_count);
                if !in_range {
                    tracing::debug!(
                        offset = m.offset,
                        length = m.length,
                        "dropping out-of-range match"
                    );
                }
                in_range
            })
            .collect();
        let mut issues: Vec<GrammarIssue> = matches
            .iter()
            .take(self.max_issues)
            .map(|m| issue_from_match(text, m))
            .collect();
        let corrected = apply_corrections(text, &matches);

        if issues.is_empty() {
            issues = builtin_issues(text);
        }

        Ok(Self::report(issues, corrected, input))
    }

    fn fallback(&self, input: &AnalysisInput<'_>) -> GrammarReport {
        let text = input.text();
        Self::report(builtin_issues(text), text.to_string(), input)
    }
}

/// `max(0, 100 - min(max_penalty, issues * per_issue))`.
pub fn grammar_score(issue_count: usize, per_issue: f64, max_penalty: f64) -> f64 {
    let penalty = (issue_count as f64 * per_issue).min(max_penalty);
    (100.0 - penalty).max(0.0)
}

/// Converts a checker match into a reported issue.
fn issue_from_match(text: &str, m: &CheckerMatch) -> GrammarIssue {
    let chars: Vec<char> = text.chars().collect();
    let start = m.offset.saturating_sub(CONTEXT_CHARS).min(chars.len());
    let end = m
        .offset
        .saturating_add(m.length)
        .saturating_add(CONTEXT_CHARS)
        .min(chars.len());
    GrammarIssue {
        message:     m.message.clone(),
        context:     chars[start..end.max(start)].iter().collect(),
        suggestions: m.replacements.iter().take(MAX_SUGGESTIONS).cloned().collect(),
    }
}

/// Applies each match's first replacement. Overlapping or out-of-range
/// matches are skipped.
pub fn apply_corrections(text: &str, matches: &[CheckerMatch]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut ordered: Vec<&CheckerMatch> = matches
        .iter()
        .filter(|m| !m.replacements.is_empty() && m.end().is_some_and(|end| end <= chars.len()))
        .collect();
    ordered.sort_by_key(|m| m.offset);

    let mut corrected = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in ordered {
        if m.offset < cursor {
            continue;
        }
        corrected.extend(&chars[cursor..m.offset]);
        corrected.push_str(&m.replacements[0]);
        cursor = m.offset.saturating_add(m.length);
    }
    corrected.extend(&chars[cursor..]);
    corrected
}

/// Duplicate adjacent words and double spaces.
pub fn builtin_issues(text: &str) -> Vec<GrammarIssue> {
    let mut issues = Vec::new();

    let words: Vec<&str> = text.split_whitespace().collect();
    let repeats: Vec<&str> = words
        .windows(2)
        .filter(|pair| pair[0].to_lowercase() == pair[1].to_lowercase())
        .map(|pair| pair[0])
        .collect();
    if !repeats.is_empty() {
        issues.push(GrammarIssue {
            message:     "Repeated word(s) detected".to_string(),
            context:     repeats.iter().take(5).copied().collect::<Vec<_>>().join(" ... "),
            suggestions: vec!["Remove duplicates".to_string()],
        });
    }

    if text.contains("  ") {
        issues.push(GrammarIssue {
            message:     "Multiple consecutive spaces".to_string(),
            context:     "Contains double spaces".to_string(),
            suggestions: vec!["Use single spaces".to_string()],
        });
    }

    issues
}

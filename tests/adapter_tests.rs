use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use essaymark::{
    Grader,
    adapters::{
        AdapterError, GrammarAdapter, GrammarChecker,
        grammar::CheckerMatch,
    },
};

/// Returns the same matches for every text and counts calls.
struct FixedChecker {
    matches: Vec<CheckerMatch>,
    calls:   AtomicUsize,
}

impl FixedChecker {
    fn new(matches: Vec<CheckerMatch>) -> Arc<Self> {
        Arc::new(Self {
            matches,
            calls: AtomicUsize::new(0),
        })
    }
}

impl GrammarChecker for FixedChecker {
    fn check(&self, _text: &str) -> Result<Vec<CheckerMatch>, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.matches.clone())
    }
}

/// Always fails.
struct DownChecker;

impl GrammarChecker for DownChecker {
    fn check(&self, _text: &str) -> Result<Vec<CheckerMatch>, AdapterError> {
        Err(AdapterError::Unavailable("mock grammar service"))
    }
}

fn grader_with(checker: Arc<dyn GrammarChecker>, max_issues: usize) -> Grader {
    Grader::builder()
        .grammar(GrammarAdapter::with_checker(checker, max_issues))
        .build()
}

#[test]
fn checker_matches_become_issues_and_corrections() {
    let checker = FixedChecker::new(vec![CheckerMatch {
        message:      "Possible spelling mistake found.".into(),
        offset:       0,
        length:       3,
        replacements: vec!["The".into(), "Ten".into(), "Tea".into(), "Tech".into()],
    }]);
    let grader = grader_with(checker.clone(), 20);

    let result = grader.grade("Teh cat sat on the mat today.");
    let grammar = &result.extended.grammar;

    assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
    assert_eq!(grammar.issue_count(), 1);
    assert_eq!(grammar.issues[0].message, "Possible spelling mistake found.");
    assert!(grammar.issues[0].context.starts_with("Teh cat"));
    assert_eq!(grammar.issues[0].suggestions, vec!["The", "Ten", "Tea"]);
    assert_eq!(grammar.corrected_text, "The cat sat on the mat today.");
    assert_eq!(grammar.grammar_score, 98.0);
    assert!(!result.is_degraded());
}

#[test]
fn failing_checker_falls_back_to_builtin_checks() {
    let grader = grader_with(Arc::new(DownChecker), 20);
    let text = "The the cat sat on the mat.";

    let result = grader.grade(text);
    let grammar = &result.extended.grammar;

    assert_eq!(
        result.extended.degraded,
        vec!["grammar: mock grammar service is not configured"]
    );
    assert_eq!(grammar.issue_count(), 1);
    assert_eq!(grammar.issues[0].message, "Repeated word(s) detected");
    assert_eq!(grammar.issues[0].context, "The");
    assert_eq!(grammar.corrected_text, text);
    assert_eq!(grammar.grammar_score, 98.0);

    // Everything else is still graded.
    assert_eq!(result.stats.total_words, 7);
    assert!(result.extended.sentiment.positivity >= 0.0);
}

#[test]
fn silent_checker_still_runs_builtin_checks() {
    let grader = grader_with(FixedChecker::new(Vec::new()), 20);

    let result = grader.grade("I went  home early today.");
    let grammar = &result.extended.grammar;

    assert!(!result.is_degraded());
    assert_eq!(grammar.issue_count(), 1);
    assert_eq!(grammar.issues[0].message, "Multiple consecutive spaces");
}

#[test]
fn out_of_range_matches_are_dropped() {
    let checker = FixedChecker::new(vec![
        CheckerMatch {
            message:      "Bogus span.".into(),
            offset:       usize::MAX - 5,
            length:       10,
            replacements: vec!["x".into()],
        },
        CheckerMatch {
            message:      "Past the end.".into(),
            offset:       25,
            length:       40,
            replacements: vec!["y".into()],
        },
    ]);
    let grader = grader_with(checker, 20);
    let text = "Some perfectly fine text here.";

    let result = grader.grade(text);
    let grammar = &result.extended.grammar;

    assert!(!result.is_degraded());
    assert_eq!(grammar.issue_count(), 0);
    assert_eq!(grammar.corrected_text, text);
    assert_eq!(grammar.grammar_score, 100.0);
}

#[test]
fn issues_are_capped_and_penalty_saturates() {
    let matches = (0..30)
        .map(|i| CheckerMatch {
            message:      format!("issue {i}"),
            offset:       0,
            length:       1,
            replacements: Vec::new(),
        })
        .collect();
    let grader = grader_with(FixedChecker::new(matches), 20);

    let result = grader.grade("A sentence with plenty of problems, apparently.");
    let grammar = &result.extended.grammar;

    assert_eq!(grammar.issue_count(), 20);
    assert_eq!(grammar.issues[19].message, "issue 19");
    assert_eq!(grammar.grammar_score, 70.0);
}

#[test]
fn offline_grader_never_degrades_grammar() {
    let grader = Grader::default();
    assert!(!grader.grammar().has_checker());

    let result = grader.grade("The the cat sat  on the mat.");
    assert!(!result.is_degraded());
    assert_eq!(result.extended.grammar.issue_count(), 2);
    assert_eq!(result.extended.grammar.grammar_score, 96.0);
}

#[test]
fn unreachable_languagetool_degrades() {
    let client = essaymark::adapters::LanguageToolClient::new(
        "http://127.0.0.1:9",
        "en-US",
        std::time::Duration::from_secs(2),
    )
    .expect("client");
    let grader = grader_with(Arc::new(client), 20);

    let result = grader.grade("The the cat sat on the mat.");

    assert_eq!(result.extended.degraded.len(), 1);
    assert!(result.extended.degraded[0].starts_with("grammar: request failed"));
    assert_eq!(result.extended.grammar.issue_count(), 1);
}

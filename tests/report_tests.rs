use essaymark::{Dashboard, Grader, ScoreResult, report::IssueCount};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn graded() -> Vec<(&'static str, ScoreResult)> {
    let grader = Grader::default();
    vec![
        (
            "hedged",
            grader.grade("This is a simple sentence. It has some words. Perhaps it is clear."),
        ),
        ("passive", grader.grade("The cake was baked by Sam. Teh party was fun.")),
        ("blank", grader.grade("")),
    ]
}

#[test]
fn dashboard_rolls_up_per_essay_series() {
    let entries = graded();
    let dashboard = Dashboard::build(entries.iter().map(|(label, result)| (*label, result)));

    assert_eq!(dashboard.total, 3);
    assert_eq!(dashboard.labels, vec!["hedged", "passive", "blank"]);
    assert_eq!(
        dashboard.overall_scores,
        entries.iter().map(|(_, r)| r.overall).collect::<Vec<_>>()
    );
    assert_eq!(
        dashboard.sentiments,
        entries
            .iter()
            .map(|(_, r)| r.extended.sentiment.positivity)
            .collect::<Vec<_>>()
    );
    assert_eq!(dashboard.grammar_counts, vec![0, 0, 0]);
}

#[test]
fn dashboard_averages_round_to_one_decimal() {
    let entries = graded();
    let dashboard = Dashboard::build(entries.iter().map(|(label, result)| (*label, result)));

    let mean = |f: fn(&ScoreResult) -> f64| {
        round1(entries.iter().map(|(_, r)| f(r)).sum::<f64>() / entries.len() as f64)
    };
    assert_eq!(dashboard.avg_scores.length, mean(|r| r.length_score));
    assert_eq!(dashboard.avg_scores.clarity, 100.0);
    assert_eq!(dashboard.avg_scores.vocabulary, mean(|r| r.vocab_score));
    assert_eq!(dashboard.avg_scores.readability, mean(|r| r.readability_score));
}

#[test]
fn dashboard_reports_only_nonzero_issues_in_order() {
    let entries = graded();
    let dashboard = Dashboard::build(entries.iter().map(|(label, result)| (*label, result)));

    let issue = |label: &str, count| IssueCount {
        label: label.to_string(),
        count,
    };
    assert_eq!(
        dashboard.issues,
        vec![
            issue("Short (<150 words)", 3),
            issue("Low readability (<60)", 1),
            issue("Passive voice", 1),
            issue("Hedging", 1),
            issue("Misspellings", 1),
        ]
    );

    // No topics were given, so every essay sits at the neutral midpoint.
    assert_eq!(dashboard.topic_relevance.medium, 3);
    assert_eq!(dashboard.topic_relevance.high + dashboard.topic_relevance.low, 0);
}

#[test]
fn dashboard_renders_tables() {
    let entries = graded();
    let dashboard = Dashboard::build(entries.iter().map(|(label, result)| (*label, result)));
    let rendered = dashboard.render();

    assert!(rendered.contains("Average scores"));
    assert!(rendered.contains("Common issues"));
    assert!(rendered.contains("Passive voice"));
    assert!(rendered.contains("hedged"));
}

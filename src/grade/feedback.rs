//! Human-readable suggestions derived from the heuristic metrics.

use itertools::Itertools;

use crate::{config::FeedbackThresholds, metrics::HeuristicMetrics};

/// Appended when nothing but the summary line was produced.
pub const PRAISE: &str = "Great job! Clear, varied, and readable.";

/// Renders the feedback narrative.
///
/// The first line always summarizes the counts. Each rule below adds one
/// line when its threshold is crossed, in a fixed order.
pub fn generate(metrics: &HeuristicMetrics, thresholds: &FeedbackThresholds) -> String {
    let stats = &metrics.stats;
    let meta = &metrics.diagnostics;

    let mut lines = vec![format!(
        "Words: {}, Sentences: {}, Avg sentence length: {:.1}",
        stats.total_words, stats.total_sentences, stats.avg_sentence_len
    )];

    if stats.total_words < thresholds.min_words {
        lines.push(format!(
            "• Expand your essay to at least ~{} words to cover the topic more fully.",
            thresholds.min_words
        ));
    }
    if stats.avg_sentence_len > thresholds.max_avg_sentence_len {
        lines.push("• Consider splitting long sentences for clarity.".to_string());
    }
    if metrics.type_token_ratio < thresholds.min_type_token_ratio {
        lines.push("• Try to vary your vocabulary to avoid repetition.".to_string());
    }
    if metrics.scores.readability < thresholds.min_readability {
        lines.push(
            "• Simplify sentence structure and prefer familiar words to improve readability."
                .to_string(),
        );
    }
    if meta.passive_hits > 0 {
        lines.push(format!(
            "• Detected {} possible passive constructions; prefer active voice when appropriate.",
            meta.passive_hits
        ));
    }
    if !meta.hedges.is_empty() {
        lines.push(format!(
            "• Hedging language found ({}); be more confident and precise.",
            meta.hedges.join(", ")
        ));
    }
    if !meta.repeated.is_empty() {
        let listed = meta
            .repeated
            .iter()
            .sorted()
            .take(thresholds.max_repeated_listed)
            .join(", ");
        lines.push(format!("• Repeated words appear often: {listed}. Consider synonyms."));
    }
    if !meta.misspellings.is_empty() {
        let corrections = meta
            .misspellings
            .iter()
            .take(thresholds.max_misspellings_listed)
            .map(|m| format!("{}→{}", m.wrong, m.right))
            .join(", ");
        lines.push(format!("• Possible misspellings: {corrections}."));
    }

    if lines.len() == 1 {
        lines.push(PRAISE.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScoringPolicy, metrics::spelling::Misspelling, text::segment};

    fn feedback(text: &str) -> String {
        let policy = ScoringPolicy::default();
        let metrics = HeuristicMetrics::extract(&segment(text), text, &policy);
        generate(&metrics, &policy.feedback)
    }

    #[test]
    fn summary_line_comes_first() {
        let text = feedback("This is a simple sentence. It has some words. Perhaps it is clear.");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Words: 13, Sentences: 3, Avg sentence length: 4.3")
        );
        assert_eq!(
            lines.next(),
            Some("• Expand your essay to at least ~150 words to cover the topic more fully.")
        );
        assert!(text.contains("• Hedging language found (perhaps); be more confident and precise."));
        assert!(!text.contains(PRAISE));
    }

    #[test]
    fn empty_text_still_summarizes() {
        let text = feedback("");
        assert!(text.starts_with("Words: 0, Sentences: 0, Avg sentence length: 0.0"));
        assert!(!text.contains(PRAISE));
    }

    #[test]
    fn misspellings_use_arrows() {
        let text = feedback("I recieve teh letter.");
        assert!(text.contains("• Possible misspellings: recieve→receive, teh→the."), "{text}");
    }

    /// Metrics that trip no rule.
    fn healthy() -> HeuristicMetrics {
        let mut metrics = HeuristicMetrics::default();
        metrics.stats.total_words = 200;
        metrics.stats.total_sentences = 20;
        metrics.stats.avg_sentence_len = 10.0;
        metrics.type_token_ratio = 0.6;
        metrics.scores.readability = 75.0;
        metrics
    }

    fn misspelling(wrong: &str, right: &str) -> Misspelling {
        Misspelling {
            wrong:    wrong.to_string(),
            right:    right.to_string(),
            original: wrong.to_string(),
        }
    }

    #[test]
    fn praise_when_nothing_fires() {
        let policy = ScoringPolicy::default();
        assert_eq!(
            generate(&healthy(), &policy.feedback),
            format!("Words: 200, Sentences: 20, Avg sentence length: 10.0\n{PRAISE}")
        );
    }

    #[test]
    fn every_rule_fires_in_order() {
        let policy = ScoringPolicy::default();
        let mut metrics = healthy();
        metrics.stats.total_words = 120;
        metrics.stats.total_sentences = 4;
        metrics.stats.avg_sentence_len = 30.0;
        metrics.type_token_ratio = 0.35;
        metrics.scores.readability = 42.0;
        metrics.diagnostics.passive_hits = 2;
        metrics.diagnostics.hedges = vec!["maybe".into(), "i think".into()];
        metrics.diagnostics.repeated = vec!["river".into(), "bank".into()];
        metrics.diagnostics.misspellings = vec![misspelling("recieve", "receive")];

        assert_eq!(
            generate(&metrics, &policy.feedback),
            [
                "Words: 120, Sentences: 4, Avg sentence length: 30.0",
                "• Expand your essay to at least ~150 words to cover the topic more fully.",
                "• Consider splitting long sentences for clarity.",
                "• Try to vary your vocabulary to avoid repetition.",
                "• Simplify sentence structure and prefer familiar words to improve readability.",
                "• Detected 2 possible passive constructions; prefer active voice when appropriate.",
                "• Hedging language found (maybe, i think); be more confident and precise.",
                "• Repeated words appear often: bank, river. Consider synonyms.",
                "• Possible misspellings: recieve→receive.",
            ]
            .join("\n")
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let policy = ScoringPolicy::default();
        let mut metrics = healthy();
        metrics.stats.total_words = 150;
        metrics.stats.avg_sentence_len = 24.0;
        metrics.type_token_ratio = 0.4;
        metrics.scores.readability = 60.0;
        assert!(generate(&metrics, &policy.feedback).ends_with(PRAISE));
    }

    #[test]
    fn repeated_words_are_sorted_and_capped() {
        let policy = ScoringPolicy::default();
        let mut metrics = healthy();
        metrics.diagnostics.repeated = [
            "zebra", "mango", "apple", "kiwi", "lemon", "banana", "grape", "cherry", "date", "fig",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();

        let text = generate(&metrics, &policy.feedback);
        assert!(
            text.contains(
                "• Repeated words appear often: apple, banana, cherry, date, fig, grape, kiwi, \
                 lemon. Consider synonyms."
            ),
            "{text}"
        );
    }

    #[test]
    fn misspellings_are_capped() {
        let policy = ScoringPolicy::default();
        let mut metrics = healthy();
        metrics.diagnostics.misspellings = (0..12)
            .map(|i| misspelling(&format!("wrng{i}"), &format!("wrong{i}")))
            .collect();

        let text = generate(&metrics, &policy.feedback);
        let line = text
            .lines()
            .find(|l| l.starts_with("• Possible misspellings"))
            .expect("misspelling line");
        assert_eq!(line.matches('→').count(), 10);
        assert!(line.ends_with("wrng9→wrong9."), "{line}");
        assert!(!line.contains("wrng10"));
    }
}

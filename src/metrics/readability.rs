//! Syllable estimation and the Flesch-Kincaid style reading-ease proxy.

/// Counts vowel groups in `word` (with `y` as a vowel), drops one for a
/// trailing silent `e`, and never returns less than one.
pub fn estimate_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0;
    let mut prev_is_vowel = false;
    for ch in word.chars() {
        let is_vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_is_vowel {
            count += 1;
        }
        prev_is_vowel = is_vowel;
    }
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Sum of [`estimate_syllables`] over `words`.
pub fn total_syllables<S: AsRef<str>>(words: &[S]) -> usize {
    words.iter().map(|w| estimate_syllables(w.as_ref())).sum()
}

/// `206.835 - 1.015 * ASL - 84.6 * ASW`, clamped to `[0, 100]`.
///
/// Zero when there are no words or no sentences.
pub fn flesch_kincaid_proxy(total_words: usize, total_sentences: usize, syllables: usize) -> f64 {
    if total_words == 0 || total_sentences == 0 {
        return 0.0;
    }
    let asl = total_words as f64 / total_sentences as f64;
    let asw = syllables as f64 / total_words as f64;
    (206.835 - 1.015 * asl - 84.6 * asw).clamp(0.0, 100.0)
}

// Approximate term matching over normalized text.
//
// A term matches if it appears verbatim, or if some word of the text is
// within a normalized edit distance of it. Multi-word terms ("kill yourself")
// are also compared word by word against windows of the same length, but
// only a leet-style vowel swap is tolerated there ("kall yourself" yes,
// "bill you" or "like it" no).
//
// Cost is O(words * terms * len^2). Callers bound the input length.

use super::normalize::is_leet_target;

/// Minimum similarity for a fuzzy match.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Levenshtein edit distance between two strings, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic programming table
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `1 - distance / max_len`, in 0.0..=1.0. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Whether `text` (already normalized) contains `term` exactly or approximately.
///
/// The exact check is a plain substring test, not word-bounded: "skills"
/// contains "kill". Catalog terms that collide with common words should be
/// left out of the catalog rather than worked around here.
pub fn contains_term(text: &str, term: &str) -> bool {
    if term.is_empty() || text.is_empty() {
        return false;
    }
    if text.contains(term) {
        return true;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let term_words = term.split_whitespace().count().max(1);
    let term_len = term.chars().count();

    if words.iter().any(|w| is_close(w, term, term_len)) {
        return true;
    }

    if term_words > 1 && words.len() >= term_words {
        let parts: Vec<&str> = term.split_whitespace().collect();
        return words.windows(term_words).any(|window| {
            window
                .iter()
                .zip(&parts)
                .all(|(word, part)| word == part || is_leet_variant(word, part))
        });
    }

    false
}

/// Similarity check with a cheap length pre-filter: if the lengths alone
/// differ by more than the threshold allows, skip the DP.
fn is_close(candidate: &str, term: &str, term_len: usize) -> bool {
    let len = candidate.chars().count();
    let max_len = len.max(term_len);
    let diff = len.abs_diff(term_len);
    if diff as f64 / max_len as f64 > 1.0 - SIMILARITY_THRESHOLD {
        return false;
    }
    similarity(candidate, term) >= SIMILARITY_THRESHOLD
}

/// Shortest word where a one-letter swap is still treated as obfuscation.
const MIN_VARIANT_CHARS: usize = 4;

/// Same length, at least four chars, and exactly one position differs where
/// both letters are leet targets: "kall" for "kill" (from "k4ll"), but not
/// "bill" for "kill" or "did" for "die".
fn is_leet_variant(word: &str, part: &str) -> bool {
    let word: Vec<char> = word.chars().collect();
    let part: Vec<char> = part.chars().collect();
    if word.len() != part.len() || part.len() < MIN_VARIANT_CHARS {
        return false;
    }

    let mut diffs = word.iter().zip(&part).filter(|(a, b)| a != b);
    match (diffs.next(), diffs.next()) {
        (Some((a, b)), None) => is_leet_target(*a) && is_leet_target(*b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn similarity_identical() {
        assert!((similarity("same", "same") - 1.0).abs() < f64::EPSILON);
        assert!((similarity("", "") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn length_prefilter_agrees_with_similarity() {
        // 13 vs 12 chars, distance 1: 1 - 1/13 > 0.85
        assert!(is_close("killyourself", "kill yourself", 13));
        // 4 vs 13 chars can never reach 0.85
        assert!(!is_close("kill", "kill yourself", 13));
    }

    #[test]
    fn leet_variant_needs_one_vowel_swap() {
        assert!(is_leet_variant("kall", "kill"));
        assert!(!is_leet_variant("bill", "kill"));
        assert!(!is_leet_variant("tell", "kill"));
        assert!(!is_leet_variant("did", "die"));
        assert!(!is_leet_variant("kill", "kill"));
    }
}

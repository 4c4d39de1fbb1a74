//! Word-set similarity between two answers.

use std::collections::HashSet;

/// Lowercased, whitespace-separated tokens of `text`
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Jaccard similarity of the two word sets, in `[0, 1]`.
///
/// Returns 0.0 when either text has no words.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        assert_eq!(similarity("the quick fox", "the quick fox"), 1.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(similarity("Rust IS fast", "rust is FAST"), 1.0);
    }

    #[test]
    fn test_disjoint_texts() {
        assert_eq!(similarity("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // {a, b, c} vs {b, c, d}: 2 shared of 4 total
        assert_eq!(similarity("a b c", "b c d"), 0.5);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("   ", "\n"), 0.0);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(word_set("yes yes YES").len(), 1);
    }

    #[test]
    fn test_range_holds_for_assorted_pairs() {
        let samples = [
            "",
            "one",
            "one two",
            "two three four",
            "The answer is 42",
            "the ANSWER is forty-two",
        ];
        for a in samples {
            for b in samples {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} gave {s}");
                assert_eq!(s, similarity(b, a));
            }
        }
    }
}

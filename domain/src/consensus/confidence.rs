//! Confidence scoring and winner selection for vote mode.

use super::similarity::similarity;
use crate::deliberation::value_objects::{ConfidenceMap, ResponseSet};

/// Score every provider by how much its answer overlaps with the others.
///
/// For each unordered pair of answering providers the pair's similarity is
/// added to both. Scores are then divided by the maximum score, unless that
/// maximum is 0. Failed slots take part in no pair and score 0.0.
///
/// The returned map has one entry per provider in `responses`, in the same
/// order.
pub fn score(responses: &ResponseSet) -> ConfidenceMap {
    let answers: Vec<(&str, Option<&str>)> = responses
        .iter()
        .map(|(name, reply)| (name, reply.text()))
        .collect();

    let mut scores = vec![0.0_f64; answers.len()];
    for i in 0..answers.len() {
        for j in (i + 1)..answers.len() {
            if let (Some(a), Some(b)) = (answers[i].1, answers[j].1) {
                let s = similarity(a, b);
                scores[i] += s;
                scores[j] += s;
            }
        }
    }

    let max = scores.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        for s in &mut scores {
            *s /= max;
        }
    }

    answers
        .iter()
        .zip(scores)
        .map(|((name, _), s)| (name.to_string(), s))
        .collect()
}

/// Pick the answer with the highest confidence.
///
/// Ties go to the provider encountered first in registration order. Only
/// providers that answered are eligible; returns `None` when none did.
///
/// Returns `(answer, provider)`.
pub fn select_best<'a>(
    responses: &'a ResponseSet,
    scores: &ConfidenceMap,
) -> Option<(&'a str, &'a str)> {
    let mut best: Option<(&str, &str, f64)> = None;
    for (provider, text) in responses.answers() {
        let confidence = scores.get(provider).unwrap_or(0.0);
        // strict comparison keeps the earliest provider on ties
        if best.is_none_or(|(_, _, top)| confidence > top) {
            best = Some((text, provider, confidence));
        }
    }
    best.map(|(text, provider, _)| (text, provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::reply::{ProviderReply, ReplyFailure};
    use std::time::Duration;

    fn responses(items: &[(&str, &str)]) -> ResponseSet {
        items
            .iter()
            .map(|(name, text)| (name.to_string(), ProviderReply::answer(*text)))
            .collect()
    }

    #[test]
    fn test_identical_answers_all_full_confidence() {
        let set = responses(&[("A", "same words"), ("B", "same words"), ("C", "same words")]);
        let scores = score(&set);

        for (_, confidence) in scores.iter() {
            assert_eq!(confidence, 1.0);
        }
        let (answer, provider) = select_best(&set, &scores).unwrap();
        assert_eq!(provider, "A");
        assert_eq!(answer, "same words");
    }

    #[test]
    fn test_max_is_one_when_any_overlap() {
        let set = responses(&[
            ("A", "rust is a systems language"),
            ("B", "rust is memory safe"),
            ("C", "bananas are yellow"),
        ]);
        let scores = score(&set);

        assert_eq!(scores.max(), 1.0);
        assert_eq!(scores.get("C"), Some(0.0));
        for (_, confidence) in scores.iter() {
            assert!((0.0..=1.0).contains(&confidence));
        }
    }

    #[test]
    fn test_no_overlap_all_zero() {
        let set = responses(&[("A", "alpha"), ("B", "beta"), ("C", "gamma")]);
        let scores = score(&set);
        for (_, confidence) in scores.iter() {
            assert_eq!(confidence, 0.0);
        }
        // every provider ties at zero: the first one wins
        let (_, provider) = select_best(&set, &scores).unwrap();
        assert_eq!(provider, "A");
    }

    #[test]
    fn test_consensus_answer_wins() {
        let set = responses(&[
            ("A", "paris is the capital"),
            ("B", "the capital is paris france"),
            ("C", "paris is the capital of france"),
        ]);
        // A-B 4/5, A-C 4/6, B-C 5/6: B overlaps most with the others
        let scores = score(&set);
        let (_, provider) = select_best(&set, &scores).unwrap();
        assert_eq!(provider, "B");
    }

    #[test]
    fn test_failed_slots_score_zero_and_are_never_selected() {
        let mut set = ResponseSet::new();
        set.insert(
            "A",
            ProviderReply::failed(ReplyFailure::timeout(Duration::from_secs(30))),
        );
        set.insert(
            "B",
            ProviderReply::failed(ReplyFailure::timeout(Duration::from_secs(30))),
        );
        set.insert("C", ProviderReply::answer("lonely answer"));

        let scores = score(&set);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.get("A"), Some(0.0));

        let (answer, provider) = select_best(&set, &scores).unwrap();
        assert_eq!(provider, "C");
        assert_eq!(answer, "lonely answer");
    }

    #[test]
    fn test_select_best_none_when_all_failed() {
        let mut set = ResponseSet::new();
        set.insert("A", ProviderReply::failed(ReplyFailure::upstream("down")));
        let scores = score(&set);
        assert!(select_best(&set, &scores).is_none());
    }

    #[test]
    fn test_single_provider_scores_zero_but_wins() {
        let set = responses(&[("Solo", "only answer")]);
        let scores = score(&set);
        assert_eq!(scores.get("Solo"), Some(0.0));
        assert_eq!(select_best(&set, &scores).unwrap().1, "Solo");
    }
}

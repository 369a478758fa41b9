//! Property-based tests for the normalizer, the keyword filter and the
//! Likert partition

use proptest::prelude::*;

use ulas::sentiment::LikertScale;
use ulas::text::{normalize, KeywordSet};

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".{0,200}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_is_clean(s in ".{0,200}") {
        let clean = normalize(&s);

        prop_assert!(!clean.chars().any(|c| c.is_ascii_digit()));
        prop_assert!(!clean.contains("  "));
        prop_assert!(clean.chars().all(|c| (c as u32) < 0x10000));
        // Only word characters and single spaces remain
        prop_assert!(clean
            .chars()
            .all(|c| c == ' ' || c.is_alphanumeric() || c == '_' || !c.is_ascii()));
        prop_assert_eq!(clean.trim(), clean.as_str());
    }

    #[test]
    fn likert_partition_is_total_and_monotone(
        scores in proptest::collection::vec(-1.0f64..=1.0, 2..500)
    ) {
        let mut sorted = scores;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut previous: Option<LikertScale> = None;
        for score in sorted {
            let scale = LikertScale::from_score(score);
            // Every score maps to exactly one value in {1..5}
            prop_assert!((1..=5).contains(&scale.value()));
            if let Some(prev) = previous {
                prop_assert!(prev <= scale);
            }
            previous = Some(scale);
        }
    }

    #[test]
    fn filter_output_is_a_subsequence_without_duplicates(
        reviews in proptest::collection::vec("[a-z ]{0,40}", 0..30)
    ) {
        let set = KeywordSet::default();
        let kept = set.filter(&reviews);

        // Order-preserving subsequence of the input
        let mut input = reviews.iter();
        for review in &kept {
            prop_assert!(input.any(|r| r == review));
        }
        // Never more output than input
        prop_assert!(kept.len() <= reviews.len());
    }
}

#[test]
fn likert_boundaries_exact() {
    assert_eq!(LikertScale::from_score(0.6).value(), 5);
    assert_eq!(LikertScale::from_score(0.2).value(), 4);
    assert_eq!(LikertScale::from_score(0.1999).value(), 3);
    assert_eq!(LikertScale::from_score(-0.2).value(), 3);
    assert_eq!(LikertScale::from_score(-0.6).value(), 2);
    assert_eq!(LikertScale::from_score(-0.61).value(), 1);
}

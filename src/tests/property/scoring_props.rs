//! Property-based tests for the match percentage
//!
//! Tests invariants:
//! - Always within `[0, 100]`
//! - Monotonic in the similarity score

use proptest::prelude::*;

use crate::core::scoring::{match_percent, MATCH_CEILING};

proptest! {
    #[test]
    fn prop_match_percent_bounded(score in proptest::num::f64::ANY) {
        prop_assert!(match_percent(Some(score)) <= 100);
    }

    #[test]
    fn prop_match_percent_monotonic(a in -1.0f64..2.0, b in -1.0f64..2.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(match_percent(Some(lo)) <= match_percent(Some(hi)));
    }

    #[test]
    fn prop_monotonic_over_all_non_nan(a in proptest::num::f64::ANY, b in proptest::num::f64::ANY) {
        prop_assume!(!a.is_nan() && !b.is_nan());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(match_percent(Some(lo)) <= match_percent(Some(hi)));
    }

    #[test]
    fn prop_at_or_above_ceiling_is_full(extra in 0.0f64..10.0) {
        prop_assert_eq!(match_percent(Some(MATCH_CEILING + extra)), 100);
    }
}

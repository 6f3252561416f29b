//! Property-based tests for the `page` parameter of a location
//!
//! Tests invariants:
//! - Pages above 1 round-trip, page 1 removes the parameter
//! - Non-numeric values fall back to the default page
//! - Other parameters survive page changes

use proptest::prelude::*;

use crate::core::pagination::location::{Location, PAGE_PARAM};

proptest! {
    #[test]
    fn prop_page_round_trips(page in 1usize..100_000) {
        let loc = Location::home().with_page(page);
        prop_assert_eq!(loc.page(1), page);
        prop_assert_eq!(loc.param(PAGE_PARAM).is_none(), page == 1);
    }

    #[test]
    fn prop_non_numeric_page_uses_default(raw in "[a-zA-Z]{1,12}", default in 1usize..50) {
        let loc = Location::home().with_param(PAGE_PARAM, Some(&raw));
        prop_assert_eq!(loc.page(default), default);
    }

    #[test]
    fn prop_page_below_one_is_one(n in -1000i64..=0) {
        let loc = Location::home().with_param(PAGE_PARAM, Some(&n.to_string()));
        prop_assert_eq!(loc.page(5), 1);
    }

    #[test]
    fn prop_query_survives_page_change(query in "[a-z &=+%]{1,30}", page in 1usize..50) {
        prop_assume!(!query.trim().is_empty());
        let loc = Location::home().with_search_query(&query).with_page(page);
        prop_assert_eq!(loc.search_query(), Some(query));
        prop_assert_eq!(loc.page(1), page);
    }
}

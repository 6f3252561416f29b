//! Property-based tests for page-number pagination
//!
//! Tests invariants:
//! - `total_pages` is `max(1, ceil(total / per_page))`
//! - The current page always lies in `[1, total_pages]`
//! - Page slices partition the collection
//! - Shrinking the collection below the current page resets to page 1

use proptest::prelude::*;

use crate::core::pagination::offset::{total_pages, window, OffsetPagination};

proptest! {
    #[test]
    fn prop_total_pages_formula(total in 0usize..10_000, per_page in 1usize..200) {
        let expected = if total == 0 { 1 } else { (total + per_page - 1) / per_page };
        prop_assert_eq!(total_pages(total, per_page), expected);
    }

    #[test]
    fn prop_window_page_in_range(
        page in 0usize..500,
        per_page in 0usize..50,
        total in 0usize..1_000,
    ) {
        let w = window(page, per_page, total);
        prop_assert!(w.safe_page >= 1);
        prop_assert!(w.safe_page <= w.total_pages);
        prop_assert!(w.start_index <= w.end_index);
        prop_assert!(w.end_index <= total);
    }

    #[test]
    fn prop_pages_partition_collection(total in 0usize..300, per_page in 1usize..25) {
        let items: Vec<usize> = (0..total).collect();
        let mut pager = OffsetPagination::new(per_page, 1);
        pager.set_total_items(total);

        let mut seen = Vec::new();
        for page in 1..=pager.total_pages() {
            pager.go_to_page(page);
            let slice = pager.paginate(&items);
            prop_assert!(slice.len() <= per_page);
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn prop_navigation_stays_in_range(
        total in 0usize..200,
        per_page in 1usize..20,
        moves in prop::collection::vec(0u8..5, 0..40),
    ) {
        let mut pager = OffsetPagination::new(per_page, 1);
        pager.set_total_items(total);
        for m in moves {
            match m {
                0 => { pager.next_page(); }
                1 => { pager.prev_page(); }
                2 => { pager.first_page(); }
                3 => { pager.last_page(); }
                _ => { pager.go_to_page(usize::from(m) * 7); }
            }
            prop_assert!(pager.current_page() >= 1);
            prop_assert!(pager.current_page() <= pager.total_pages());
        }
    }

    #[test]
    fn prop_shrink_below_page_resets(
        total in 20usize..200,
        per_page in 1usize..10,
        shrink_to in 0usize..20,
    ) {
        let mut pager = OffsetPagination::new(per_page, 1);
        pager.set_total_items(total);
        let last = pager.last_page();
        pager.set_total_items(shrink_to);
        if last > pager.total_pages() {
            prop_assert_eq!(pager.current_page(), 1);
        } else {
            prop_assert_eq!(pager.current_page(), last);
        }
    }
}

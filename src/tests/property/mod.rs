//! Property-based tests for CineMatch
//!
//! Invariants checked with proptest over generated inputs, rather than
//! hand-picked cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! PROPTEST_CASES=1000 cargo test property::pagination_props
//! ```
//!
//! ## Test Modules
//!
//! - `pagination_props`: page-number pagination
//!   - `total_pages` is `max(1, ceil(total / per_page))`
//!   - The current page always lies in `[1, total_pages]`
//!   - Page slices partition the collection
//!   - Shrinking the collection below the current page resets to page 1
//!
//! - `location_props`: the `page` parameter of a location
//!   - Pages above 1 round-trip, page 1 removes the parameter
//!   - Non-numeric values fall back to the default page
//!   - Other parameters survive page changes
//!
//! - `scoring_props`: match percentage
//!   - Always within `[0, 100]`
//!   - Monotonic in the similarity score

mod location_props;
mod pagination_props;
mod scoring_props;

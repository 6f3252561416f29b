//! Crate-level tests: HTTP-backed scenarios and property tests.
//!
//! Module-local unit tests live next to the code in `#[cfg(test)]` blocks.

mod common;
mod property;
mod unit;

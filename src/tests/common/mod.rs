//! Common Test Utilities
//!
//! Shared fixtures for building recommendation payloads, clients pointed at
//! a mock server, and controllers wired to them.

pub mod fixtures;

pub use fixtures::*;

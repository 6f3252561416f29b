//! HTTP-backed unit tests.
//!
//! Uses wiremock for HTTP mocking to test:
//! - Request formatting (path, `query`, `count`)
//! - Envelope and item decoding against real responses
//! - Failure handling (non-2xx, bad JSON, timeouts)
//! - The cursor controller end to end

mod client_tests;
mod cursor_tests;

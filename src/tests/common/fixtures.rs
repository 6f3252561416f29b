//! Test Fixtures
//!
//! JSON payload builders and client/controller constructors for tests that
//! run against a `wiremock` server.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::core::api::{Movie, PageSource, RecommendationClient};
use crate::core::pagination::CursorPagination;

// =============================================================================
// Payload Fixtures
// =============================================================================

/// A result item in the shape the service returns.
pub fn movie_json(id: u32, title: &str, score: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "release_date": "1999-03-31",
        "rating": 7.4,
        "genre": [{"id": 1, "name": "Comedy"}, {"id": 2, "name": "Romance"}],
        "talent": [{"id": 10, "name": "Meg Ryan"}],
        "original_language": "en",
        "similarity_score": score,
        "created_at": "2024-01-02T03:04:05Z",
        "updated_at": "2024-01-03T03:04:05Z",
    })
}

/// The `{results, next, previous}` envelope.
pub fn page_json(results: Vec<Value>, next: Option<&str>, previous: Option<&str>) -> Value {
    json!({
        "results": results,
        "next": next,
        "previous": previous,
    })
}

// =============================================================================
// Client Fixtures
// =============================================================================

/// Client with the default page size (12) aimed at `base_url`.
pub fn test_client(base_url: &str) -> RecommendationClient {
    test_client_with(ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    })
}

pub fn test_client_with(config: ApiConfig) -> RecommendationClient {
    RecommendationClient::new(&config).expect("Failed to build test client")
}

/// Cursor controller fetching from `base_url`.
pub fn test_pager(base_url: &str) -> CursorPagination<Movie> {
    let source: Arc<dyn PageSource<Movie>> = Arc::new(test_client(base_url));
    CursorPagination::new(source)
}

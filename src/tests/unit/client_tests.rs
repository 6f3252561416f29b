//! Recommendation Client Unit Tests
//!
//! Tests for `RecommendationClient` against a mock server:
//! - Request path and query parameters
//! - Base URLs with a path prefix
//! - Lenient decoding of real-looking payloads
//! - Error mapping (HTTP status, bad JSON, timeouts)

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::ApiConfig;
use crate::core::api::{ClientError, Movie};
use crate::tests::common::{movie_json, page_json, test_client, test_client_with};

const ENDPOINT: &str = "/cinematch/recommendations/";

// =============================================================================
// Request Formatting Tests
// =============================================================================

#[tokio::test]
async fn test_search_sends_query_and_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("query", "romantic comedy & more"))
        .and(query_param("count", "12"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(
                vec![movie_json(1, "When Harry Met Sally", 0.42)],
                None,
                None,
            )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let url = client.search_url("romantic comedy & more").unwrap();
    let page = client.get_page::<Movie>(url.as_str()).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].title, "When Harry Met Sally");
}

#[tokio::test]
async fn test_custom_page_size() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .and(query_param("count", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with(ApiConfig {
        base_url: server.uri(),
        page_size: 30,
        ..ApiConfig::default()
    });
    let url = client.search_url("noir").unwrap();
    let page = client.get_page::<Movie>(url.as_str()).await.unwrap();
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v2/cinematch/recommendations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api/v2", server.uri()));
    let url = client.search_url("anything").unwrap();
    assert!(client.get_page::<Movie>(url.as_str()).await.is_ok());
}

// =============================================================================
// Response Parsing Tests
// =============================================================================

#[tokio::test]
async fn test_lenient_item_decoding() {
    let server = MockServer::start().await;
    let body = json!({
        "results": [
            {"id": "tt0098635", "title": "Text Id", "vote_average": "6.5", "overview": "From overview"},
            {"id": 7, "title": "No Genres", "genre": null, "similarity_score": 0.2},
            42,
            {"id": 8, "title": "Bad Tag", "genre": [{"id": 1, "name": "Drama"}, "oops"]}
        ],
        "next": "",
        "previous": null
    });
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let url = client.search_url("x").unwrap();
    let page = client.get_page::<Movie>(url.as_str()).await.unwrap();

    // The bare number is skipped, the rest survive
    assert_eq!(page.results.len(), 3);
    assert_eq!(page.results[0].id, "tt0098635");
    assert_eq!(page.results[0].score(), Some(6.5));
    assert_eq!(page.results[0].summary(), Some("From overview"));
    assert!(page.results[1].genre.is_empty());
    assert_eq!(page.results[2].genre.len(), 1);
    // A blank cursor is no cursor
    assert!(page.next.is_none());
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_non_success_status_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_json(page_json(
            vec![movie_json(1, "Should Not Show", 0.3)],
            None,
            None,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let url = client.search_url("x").unwrap();
    let err = client.get_page::<Movie>(url.as_str()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to fetch recommendations (HTTP 500)");
}

#[tokio::test]
async fn test_not_found_status() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());
    let err = client
        .get_page::<Movie>(&format!("{}/nowhere", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let url = client.search_url("x").unwrap();
    let err = client.get_page::<Movie>(url.as_str()).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.to_string().starts_with("Invalid response"));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![], None, None))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = test_client_with(ApiConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        ..ApiConfig::default()
    });
    let url = client.search_url("x").unwrap();
    let err = client.get_page::<Movie>(url.as_str()).await.unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = test_client(&format!("http://{addr}"));
    let url = client.search_url("x").unwrap();
    let err = client.get_page::<Movie>(url.as_str()).await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_garbage_locator_is_url_error() {
    let client = test_client("http://localhost:8000");
    let err = client.get_page::<Movie>("not a url").await.unwrap_err();
    assert!(matches!(err, ClientError::Url(_)));
}

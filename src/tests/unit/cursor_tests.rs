//! Cursor Pagination Scenario Tests
//!
//! Drives `CursorPagination<Movie>` through a real `RecommendationClient`
//! against a mock server:
//! - Submit, then follow the server's `next` locator verbatim
//! - Failure clears results, never shows stale data
//! - At most one request in flight
//! - Reset and re-submit discard superseded responses

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::tests::common::{movie_json, page_json, test_pager};

const ENDPOINT: &str = "/cinematch/recommendations/";

fn ids(pager: &crate::core::pagination::CursorPagination<crate::core::api::Movie>) -> Vec<String> {
    pager.items().iter().map(|m| m.id.clone()).collect()
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_romantic_comedy_then_next_page() {
    let server = MockServer::start().await;
    let next = format!("{}/cursor/2", server.uri());

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("query", "romantic comedy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                movie_json(1, "Notting Hill", 0.41),
                movie_json(2, "Sleepless in Seattle", 0.38),
            ],
            Some(&next),
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cursor/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![movie_json(3, "You've Got Mail", 0.35)],
            None,
            Some(&format!("{}{}?query=romantic+comedy", server.uri(), ENDPOINT)),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    assert!(pager.submit_query("romantic comedy"));
    pager.settle().await;

    assert_eq!(ids(&pager), ["1", "2"]);
    assert!(pager.has_next_page());
    assert!(!pager.has_prev_page());
    assert_eq!(pager.next_locator(), Some(next.as_str()));
    assert!(pager.error().is_none());

    assert!(pager.load_next());
    pager.settle().await;

    assert_eq!(ids(&pager), ["3"]);
    assert!(!pager.has_next_page());
    assert!(pager.has_prev_page());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_server_error_leaves_no_items() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    pager.submit_query("romantic comedy");
    pager.settle().await;

    assert!(pager.items().is_empty());
    assert!(!pager.is_loading());
    let error = pager.error().expect("error message");
    assert!(!error.is_empty());
    assert!(error.contains("500"));
}

#[tokio::test]
async fn test_failure_after_success_clears_previous_results() {
    let server = MockServer::start().await;
    let next = format!("{}/cursor/2", server.uri());
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![movie_json(1, "Heat", 0.3)],
            Some(&next),
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(path("/cursor/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    pager.submit_query("heist");
    pager.settle().await;
    assert_eq!(pager.items().len(), 1);

    pager.load_next();
    pager.settle().await;

    assert!(pager.items().is_empty());
    assert!(!pager.has_next_page());
    assert!(!pager.has_prev_page());
    assert!(pager.error().is_some());
}

/// Base URL of a local port nothing listens on.
fn refused_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn test_network_error_is_reported() {
    let mut pager = test_pager(&refused_uri());
    pager.submit_query("anything");
    pager.settle().await;

    assert!(pager.items().is_empty());
    assert!(!pager.is_loading());
    assert!(pager.error().is_some_and(|e| e.starts_with("Network error")));
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": "))
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    pager.submit_query("anything");
    pager.settle().await;

    assert!(pager.error().is_some_and(|e| e.starts_with("Invalid response")));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_load_next_makes_one_request() {
    let server = MockServer::start().await;
    let next = format!("{}/cursor/2", server.uri());
    Mock::given(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![movie_json(1, "Alien", 0.2)],
            Some(&next),
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(path("/cursor/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![movie_json(2, "Aliens", 0.2)], None, None))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    pager.submit_query("space horror");
    pager.settle().await;

    assert!(pager.load_next());
    assert!(pager.is_loading());
    assert!(!pager.load_next());
    assert!(!pager.load_previous());
    pager.settle().await;

    assert_eq!(ids(&pager), ["2"]);
}

#[tokio::test]
async fn test_reset_while_in_flight_discards_response() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![movie_json(1, "Late", 0.2)], None, None))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    pager.submit_query("slow");
    pager.reset();
    assert!(!pager.is_loading());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!pager.poll());
    assert!(pager.items().is_empty());
    assert!(pager.error().is_none());
}

#[tokio::test]
async fn test_new_query_supersedes_pending_one() {
    let server = MockServer::start().await;
    Mock::given(path(ENDPOINT))
        .and(query_param("query", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![movie_json(1, "Slow", 0.2)], None, None))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(path(ENDPOINT))
        .and(query_param("query", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![movie_json(2, "Fast", 0.2)],
            None,
            None,
        )))
        .mount(&server)
        .await;

    let mut pager = test_pager(&server.uri());
    pager.submit_query("slow");
    assert!(pager.submit_query("fast"));
    pager.settle().await;
    assert_eq!(ids(&pager), ["2"]);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!pager.poll());
    assert_eq!(ids(&pager), ["2"]);
}

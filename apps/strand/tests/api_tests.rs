//! Integration tests for the Strand HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow holding MutexGuard across await - tests are serialized to avoid env
// var conflicts
#![allow(clippy::unwrap_used, clippy::panic, clippy::await_holding_lock)]

use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Mutex;
use strand::api::{
    AppState, ErrorResponse, HealthResponse, ListResponse, NaturalLanguageResponse,
    RecordResponse, StatusResponse, create_router,
};
use strand_core::Analyzer;

/// Mutex to serialize tests since some modify env vars.
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Guard wrapper that holds the mutex and clears the API key on drop.
struct TestGuard {
    _guard: std::sync::MutexGuard<'static, ()>,
}

impl Drop for TestGuard {
    fn drop(&mut self) {
        // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
        unsafe { std::env::remove_var("STRAND_API_KEY") };
    }
}

fn lock_env() -> TestGuard {
    let guard = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::remove_var("STRAND_API_KEY") };
    TestGuard { _guard: guard }
}

fn server_for(analyzer: Analyzer) -> TestServer {
    let state = AppState::new(analyzer).unwrap();
    TestServer::new(create_router(state)).unwrap()
}

/// Create a test server over a fresh in-memory analyzer.
/// Returns a guard that must be kept alive during the test.
fn create_test_server() -> (TestServer, TestGuard) {
    let guard = lock_env();
    (server_for(Analyzer::in_memory()), guard)
}

/// Create a test server with some pre-populated strings.
fn create_populated_test_server() -> (TestServer, TestGuard) {
    let guard = lock_env();
    let mut analyzer = Analyzer::in_memory();
    for value in [
        "racecar",
        "hello world",
        "level",
        "noon",
        "A Santa at NASA",
        "zebra",
        "the quick brown fox",
    ] {
        analyzer.analyze(value).unwrap();
    }
    (server_for(analyzer), guard)
}

fn sorted_values(data: &[RecordResponse]) -> Vec<&str> {
    let mut values: Vec<&str> = data.iter().map(|r| r.value.as_str()).collect();
    values.sort_unstable();
    values
}

// =============================================================================
// HEALTH & STATUS TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_status_counts_records() {
    let (server, _guard) = create_populated_test_server();

    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert_eq!(status.record_count, 7);
    assert_eq!(status.backend, "memory");
}

// =============================================================================
// CREATE TESTS
// =============================================================================

#[tokio::test]
async fn test_create_returns_analysis() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/strings")
        .json(&json!({ "value": "A man, a plan" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let record: RecordResponse = response.json();
    assert_eq!(record.value, "A man, a plan");
    assert_eq!(record.id, record.properties.hash);
    assert_eq!(record.properties.length, 13);
    assert_eq!(record.properties.word_count, 4);
    assert!(!record.properties.is_palindrome);
    assert_eq!(record.properties.character_frequency[&'a'], 3);
}

#[tokio::test]
async fn test_create_wire_format() {
    let (server, _guard) = create_test_server();

    let response = server.post("/strings").json(&json!({ "value": "abc" })).await;
    let body: serde_json::Value = response.json();

    assert_eq!(
        body["id"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(body["properties"]["sha256_hash"], body["id"]);
    assert_eq!(body["properties"]["character_frequency_map"]["b"], 1);
    assert_eq!(body["properties"]["unique_characters"], 3);

    // 2025-01-01T00:00:00.000Z
    let created_at = body["created_at"].as_str().unwrap();
    assert_eq!(created_at.len(), 24);
    assert!(created_at.ends_with('Z'));
    assert_eq!(&created_at[19..20], ".");
}

#[tokio::test]
async fn test_create_duplicate_conflicts() {
    let (server, _guard) = create_test_server();

    server
        .post("/strings")
        .json(&json!({ "value": "twice" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.post("/strings").json(&json!({ "value": "twice" })).await;

    response.assert_status(StatusCode::CONFLICT);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "String already exists in the system");
}

#[tokio::test]
async fn test_create_missing_value() {
    let (server, _guard) = create_test_server();

    for body in [json!({}), json!({ "other": "x" }), json!({ "value": null })] {
        let response = server.post("/strings").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert!(error.error.contains("\"value\""));
    }
}

#[tokio::test]
async fn test_create_non_string_value() {
    let (server, _guard) = create_test_server();

    for value in [json!(42), json!(true), json!(["a"]), json!({ "a": 1 })] {
        let response = server.post("/strings").json(&json!({ "value": value })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_create_invalid_json_body() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/strings")
        .text("not valid json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_empty_string() {
    let (server, _guard) = create_test_server();

    let response = server.post("/strings").json(&json!({ "value": "" })).await;

    response.assert_status(StatusCode::CREATED);
    let record: RecordResponse = response.json();
    assert_eq!(record.properties.length, 0);
    assert!(record.properties.is_palindrome);
}

// =============================================================================
// LOOKUP & DELETE TESTS
// =============================================================================

#[tokio::test]
async fn test_get_existing_string() {
    let (server, _guard) = create_populated_test_server();

    let response = server.get("/strings/hello%20world").await;

    response.assert_status_ok();
    let record: RecordResponse = response.json();
    assert_eq!(record.value, "hello world");
    assert_eq!(record.properties.word_count, 2);
}

#[tokio::test]
async fn test_get_is_case_sensitive() {
    let (server, _guard) = create_populated_test_server();

    let response = server.get("/strings/Racecar").await;

    response.assert_status_not_found();
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "String does not exist in the system");
}

#[tokio::test]
async fn test_invalid_utf8_path_returns_json_error() {
    let (server, _guard) = create_populated_test_server();

    for response in [
        server.get("/strings/%FF%FE").await,
        server.delete("/strings/%FF%FE").await,
    ] {
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert!(!error.error.is_empty());
    }
}

#[tokio::test]
async fn test_delete_string() {
    let (server, _guard) = create_populated_test_server();

    server
        .delete("/strings/racecar")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get("/strings/racecar").await.assert_status_not_found();
    server
        .delete("/strings/racecar")
        .await
        .assert_status_not_found();
}

// =============================================================================
// STRUCTURED FILTER TESTS
// =============================================================================

#[tokio::test]
async fn test_list_without_filters() {
    let (server, _guard) = create_populated_test_server();

    let response = server.get("/strings").await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(list.count, 7);
    assert_eq!(list.data.len(), 7);
    assert!(list.filters_applied.is_empty());
}

#[tokio::test]
async fn test_list_palindromes_min_length() {
    let (server, _guard) = create_populated_test_server();

    let response = server
        .get("/strings")
        .add_query_param("is_palindrome", "true")
        .add_query_param("min_length", "5")
        .await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(
        sorted_values(&list.data),
        vec!["A Santa at NASA", "level", "racecar"]
    );
    assert_eq!(list.count, 3);
    assert_eq!(list.filters_applied.is_palindrome, Some(true));
    assert_eq!(list.filters_applied.min_length, Some(5));
    assert!(list.filters_applied.max_length.is_none());
}

#[tokio::test]
async fn test_list_filters_applied_echo() {
    let (server, _guard) = create_populated_test_server();

    let response = server
        .get("/strings")
        .add_query_param("word_count", "2")
        .add_query_param("contains_character", "w")
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["filters_applied"],
        json!({ "word_count": 2, "contains_character": "w" })
    );
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["value"], "hello world");
}

#[tokio::test]
async fn test_list_contains_character_is_case_sensitive() {
    let (server, _guard) = create_populated_test_server();

    let response = server
        .get("/strings")
        .add_query_param("contains_character", "A")
        .await;

    let list: ListResponse = response.json();
    assert_eq!(sorted_values(&list.data), vec!["A Santa at NASA"]);
}

#[tokio::test]
async fn test_list_invalid_params() {
    let (server, _guard) = create_populated_test_server();

    for (param, bad) in [
        ("is_palindrome", "yes"),
        ("min_length", "-1"),
        ("max_length", "ten"),
        ("word_count", "1.5"),
        ("contains_character", "ab"),
    ] {
        let response = server.get("/strings").add_query_param(param, bad).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert!(
            error.error.contains(param),
            "error for {param} should name it: {}",
            error.error
        );
    }
}

// =============================================================================
// NATURAL-LANGUAGE FILTER TESTS
// =============================================================================

#[tokio::test]
async fn test_natural_language_single_word_palindromes() {
    let (server, _guard) = create_populated_test_server();

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "all single word palindromic strings")
        .await;

    response.assert_status_ok();
    let result: NaturalLanguageResponse = response.json();
    assert_eq!(
        sorted_values(&result.data),
        vec!["level", "noon", "racecar"]
    );
    assert_eq!(result.count, 3);
    assert_eq!(
        result.interpreted_query.original,
        "all single word palindromic strings"
    );
    assert_eq!(result.interpreted_query.parsed_filters.word_count, Some(1));
    assert_eq!(
        result.interpreted_query.parsed_filters.is_palindrome,
        Some(true)
    );
}

#[tokio::test]
async fn test_natural_language_letter_is_case_insensitive() {
    let (server, _guard) = create_populated_test_server();

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "strings containing the letter z")
        .await;

    let result: NaturalLanguageResponse = response.json();
    assert_eq!(sorted_values(&result.data), vec!["zebra"]);

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "strings containing the letter n")
        .await;
    let result: NaturalLanguageResponse = response.json();
    assert!(sorted_values(&result.data).contains(&"A Santa at NASA"));
}

#[tokio::test]
async fn test_natural_language_longer_than() {
    let (server, _guard) = create_populated_test_server();

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "strings longer than 10 characters")
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["interpreted_query"]["parsed_filters"],
        json!({ "min_length": 11 })
    );
    let result: NaturalLanguageResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        sorted_values(&result.data),
        vec!["A Santa at NASA", "hello world", "the quick brown fox"]
    );
}

#[tokio::test]
async fn test_natural_language_missing_query() {
    let (server, _guard) = create_test_server();

    let response = server.get("/strings/filter-by-natural-language").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_natural_language_unparseable() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "xyzzy nonsense")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Unable to parse natural language query");
}

#[tokio::test]
async fn test_natural_language_conflict() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/strings/filter-by-natural-language")
        .add_query_param("query", "longer than 10 and shorter than 5 characters")
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = response.json();
    assert!(error.error.starts_with("Query parsed but resulted in conflicting filters"));
}

// =============================================================================
// ERROR HANDLING TESTS
// =============================================================================

#[tokio::test]
async fn test_404_on_unknown_endpoint() {
    let (server, _guard) = create_test_server();

    server.get("/unknown").await.assert_status_not_found();
}

#[tokio::test]
async fn test_method_not_allowed() {
    let (server, _guard) = create_test_server();

    let response = server.post("/health").await;
    assert_eq!(response.status_code().as_u16(), 405);
}

// =============================================================================
// PERSISTENCE TESTS
// =============================================================================

#[tokio::test]
async fn test_redb_backend_survives_restart() {
    let guard = lock_env();
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("api.redb");

    {
        let server = server_for(Analyzer::with_redb(&path).unwrap());
        server
            .post("/strings")
            .json(&json!({ "value": "durable" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let server = server_for(Analyzer::with_redb(&path).unwrap());
    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.backend, "redb");
    assert_eq!(status.record_count, 1);
    server.get("/strings/durable").await.assert_status_ok();
    drop(guard);
}

// =============================================================================
// AUTHENTICATION MIDDLEWARE TESTS
// =============================================================================

/// Create a test server with authentication enabled.
fn create_auth_test_server(api_key: &str) -> (TestServer, TestGuard) {
    let guard = lock_env();
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::set_var("STRAND_API_KEY", api_key) };
    (server_for(Analyzer::in_memory()), guard)
}

#[tokio::test]
async fn test_auth_valid_bearer_token() {
    let api_key = "test-secret-key-12345";
    let (server, _guard) = create_auth_test_server(api_key);

    let response = server
        .get("/status")
        .add_header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", api_key)
                .parse::<HeaderValue>()
                .unwrap(),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_valid_raw_token() {
    let api_key = "test-raw-key-67890";
    let (server, _guard) = create_auth_test_server(api_key);

    let response = server
        .post("/strings")
        .add_header(
            axum::http::header::AUTHORIZATION,
            api_key.parse::<HeaderValue>().unwrap(),
        )
        .json(&json!({ "value": "authorized" }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_auth_invalid_token_rejected() {
    let (server, _guard) = create_auth_test_server("correct-key");

    let response = server
        .get("/strings")
        .add_header(
            axum::http::header::AUTHORIZATION,
            "Bearer wrong-key".parse::<HeaderValue>().unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Unauthorized");
}

#[tokio::test]
async fn test_auth_missing_header_rejected() {
    let (server, _guard) = create_auth_test_server("required-key");

    server
        .get("/strings/anything")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_health_endpoint_bypasses_auth() {
    let (server, _guard) = create_auth_test_server("secret-key-for-bypass-test");

    let response = server.get("/health").await;

    response.assert_status_ok();
}

//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! response parsing, and transport error behavior against a local server.

use std::collections::HashMap;

use mixin_api::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use mixin_api::{ApiKey, MixinConfig, StoreUrl};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing at the given store URL.
fn create_test_config(store_url: &str, api_key: &str) -> MixinConfig {
    MixinConfig::builder()
        .api_key(ApiKey::new(api_key).unwrap())
        .store_url(StoreUrl::new(store_url).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Client Construction
// ============================================================================

#[test]
fn test_client_targets_management_api() {
    let config = create_test_config("https://shop.example.com/", "test-key");
    let client = HttpClient::new(&config);

    assert_eq!(client.base_uri(), "https://shop.example.com");
    assert_eq!(client.base_path(), "/api/management/v1");
    assert_eq!(
        client.default_headers().get("Authorization").map(String::as_str),
        Some("Api-Key test-key")
    );
    assert_eq!(
        client.default_headers().get("Accept").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn test_user_agent_carries_prefix() {
    let config = MixinConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .store_url(StoreUrl::new("https://shop.example.com").unwrap())
        .user_agent_prefix("HostSync/2.1")
        .build()
        .unwrap();
    let client = HttpClient::new(&config);

    let user_agent = client.default_headers().get("User-Agent").unwrap();
    assert!(user_agent.starts_with("HostSync/2.1 | Mixin API Library v"));
}

// ============================================================================
// Requests Against a Local Server
// ============================================================================

#[tokio::test]
async fn test_request_sends_api_key_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/management/v1/products/"))
        .and(header("Authorization", "Api-Key secret-key"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "secret-key"));
    let request = HttpRequest::builder(HttpMethod::Get, "products/")
        .query_param("page", "2")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.body, json!({"result": []}));
}

#[tokio::test]
async fn test_json_body_is_sent_with_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/management/v1/categories/"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 4, "name": "Shoes"})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "key"));
    let request = HttpRequest::builder(HttpMethod::Post, "categories/")
        .json(json!({"name": "Shoes"}))
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.code, 201);
    assert!(response.is_ok());

    let received = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent, json!({"name": "Shoes"}));
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/management/v1/products/99/"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Request-Id", "req-77")
                .set_body_json(json!({"detail": "Not found."})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "key"));
    let request = HttpRequest::builder(HttpMethod::Get, "products/99/")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 404);
    assert!(!response.is_ok());
    assert_eq!(response.request_id(), Some("req-77"));
    assert_eq!(response.body["detail"], "Not found.");
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_raw() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/management/v1/categories/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error</h1>"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "key"));
    let request = HttpRequest::builder(HttpMethod::Get, "categories/")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 500);
    assert_eq!(response.body, json!({"raw_body": "<h1>Server Error</h1>"}));
}

#[tokio::test]
async fn test_non_json_success_body_is_kept_raw() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/management/v1/products/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "key"));
    let request = HttpRequest::builder(HttpMethod::Get, "products/12/")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.raw_body(), Some("<html>login</html>"));
}

#[tokio::test]
async fn test_empty_success_body_becomes_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/management/v1/products/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "key"));
    let request = HttpRequest::builder(HttpMethod::Get, "products/")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 1
    let client = HttpClient::new(&create_test_config("http://127.0.0.1:1", "key"));
    let request = HttpRequest::builder(HttpMethod::Get, "products/")
        .build()
        .unwrap();

    let result = client.request(request).await;
    assert!(matches!(result, Err(HttpError::Network(_))));
}

// ============================================================================
// Request Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_request_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = HttpClient::new(&create_test_config(&server.uri(), "key"));

    let request = HttpRequest {
        http_method: HttpMethod::Put,
        path: "products/1/".to_string(),
        body: None,
        body_type: None,
        query: HashMap::new(),
        headers: HashMap::new(),
    };

    let result = client.request(request).await;

    assert!(matches!(
        result,
        Err(HttpError::InvalidRequest(
            mixin_api::InvalidHttpRequestError::MissingBody { .. }
        ))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

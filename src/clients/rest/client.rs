//! REST client implementation for the Mixin management API.
//!
//! This module provides the [`RestClient`] type for making REST API requests
//! with automatic path normalization.

use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::MixinConfig;

/// REST API client for the Mixin management API.
///
/// Provides convenient methods (`get`, `post`, `put`) for making REST API
/// requests with automatic path normalization.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use mixin_api::RestClient;
///
/// let client = RestClient::new(&config);
///
/// // GET request
/// let response = client.get("products", None).await?;
///
/// // POST request with body
/// let body = serde_json::json!({"name": "Shoes", "parent": null});
/// let response = client.post("categories", body, None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    page_size: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the configured store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::{ApiKey, MixinConfig, RestClient, StoreUrl};
    ///
    /// let config = MixinConfig::builder()
    ///     .api_key(ApiKey::new("key").unwrap())
    ///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
    ///     .page_size(20)
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = RestClient::new(&config);
    /// assert_eq!(client.page_size(), 20);
    /// ```
    #[must_use]
    pub fn new(config: &MixinConfig) -> Self {
        tracing::debug!(store = %config.store_url(), "Creating Mixin REST client");

        Self {
            http_client: HttpClient::new(config),
            page_size: config.page_size(),
        }
    }

    /// Returns the configured page size for collection fetches.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid (e.g., empty).
    /// Returns [`RestError::Http`] for HTTP-level errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut query = HashMap::new();
    /// query.insert("search".to_string(), "shirt".to_string());
    /// let response = client.get("products", Some(query)).await?;
    /// ```
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query)
            .await
    }

    /// Sends a PUT request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, &normalized_path);

        if let Some(body_value) = body {
            builder = builder.json(body_value);
        }

        if let Some(query_params) = query {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a management API path.
///
/// Strips leading `/` characters and guarantees exactly one trailing `/`.
///
/// ```rust,ignore
/// assert_eq!(normalize_path("products")?, "products/");
/// assert_eq!(normalize_path("/products/12/")?, "products/12/");
/// ```
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_start_matches('/').trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(format!("{trimmed}/"))
}

//! HTTP client for Mixin API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Mixin management API.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, RAW_BODY_KEY};
use crate::config::MixinConfig;

/// Adapter version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path of the management API below the store URL.
pub const MANAGEMENT_API_PATH: &str = "/api/management/v1";

/// HTTP client for making requests to the Mixin API.
///
/// The client handles:
/// - Base URI construction from the configured store URL
/// - Default headers including User-Agent and the API key
/// - Response parsing for every status code
///
/// The client never retries: a failed request is reported once.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use mixin_api::{HttpClient, HttpRequest, HttpMethod, MixinConfig};
///
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "products/")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://shop.example.com`).
    base_uri: String,
    /// Base path (e.g., "/api/management/v1").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured store.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::{ApiKey, MixinConfig, StoreUrl};
    /// use mixin_api::clients::HttpClient;
    ///
    /// let config = MixinConfig::builder()
    ///     .api_key(ApiKey::new("key").unwrap())
    ///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// assert_eq!(client.base_path(), "/api/management/v1");
    /// ```
    #[must_use]
    pub fn new(config: &MixinConfig) -> Self {
        let base_uri = config.store_url().as_ref().to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Mixin API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Api-Key {}", config.api_key().as_ref()),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path: MANAGEMENT_API_PATH.to_string(),
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Mixin API.
    ///
    /// Any response the server sends back is returned as `Ok`, including
    /// 4xx and 5xx statuses. Callers decide how to classify the status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No response could be obtained (`Network`)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = HttpRequest::builder(HttpMethod::Get, "orders/")
    ///     .query_param("page", "1")
    ///     .build()
    ///     .unwrap();
    ///
    /// let response = client.request(request).await?;
    /// if response.is_ok() {
    ///     println!("Orders: {}", response.body);
    /// }
    /// ```
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        headers.extend(request.headers.clone());

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, %url, "Sending Mixin API request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            // HTML and plain-text pages are kept verbatim for the caller to reject
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ RAW_BODY_KEY: body_text }))
        };

        let response = HttpResponse::new(code, res_headers, body);

        if !response.is_ok() {
            tracing::debug!(
                status = code,
                request_id = response.request_id().unwrap_or_default(),
                path = %request.path,
                "Mixin API returned an error status"
            );
        }

        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, StoreUrl};

    fn create_test_config(prefix: Option<&str>) -> MixinConfig {
        let mut builder = MixinConfig::builder()
            .api_key(ApiKey::new("test-api-key").unwrap())
            .store_url(StoreUrl::new("https://shop.example.com/").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_client_construction_from_config() {
        let client = HttpClient::new(&create_test_config(None));

        assert_eq!(client.base_uri(), "https://shop.example.com");
        assert_eq!(client.base_path(), "/api/management/v1");
    }

    #[test]
    fn test_authorization_header_uses_api_key_scheme() {
        let client = HttpClient::new(&create_test_config(None));

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Api-Key test-api-key".to_string())
        );
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config(None));

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config(None));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Mixin API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = HttpClient::new(&create_test_config(Some("MyApp/1.0")));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Mixin API Library"));
    }
}

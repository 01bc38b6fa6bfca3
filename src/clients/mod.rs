//! HTTP client types for Mixin API communication.
//!
//! This module provides the foundational HTTP client layer for making
//! authenticated requests to the Mixin management API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT)
//! - [`DataType`]: Content types for request bodies
//! - [`rest::RestClient`]: Higher-level REST API client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::{ApiKey, HttpClient, HttpMethod, HttpRequest, MixinConfig, StoreUrl};
//!
//! let config = MixinConfig::builder()
//!     .api_key(ApiKey::new("api-key").unwrap())
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(&config);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "products/")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Status Handling
//!
//! The HTTP layer performs no retries and maps no statuses to errors. Every
//! response that arrives is handed back as an [`HttpResponse`]; only
//! transport failures surface as [`HttpError::Network`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, MANAGEMENT_API_PATH, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RAW_BODY_KEY};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};

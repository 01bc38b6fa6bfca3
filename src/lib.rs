//! # Mixin API Rust Adapter
//!
//! A Rust adapter for the Mixin storefront management API. It lets a host
//! platform synchronize its catalog with a Mixin store and read back orders
//! with line items it can map onto its own products.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MixinConfig`] and [`MixinConfigBuilder`]
//! - Validated newtypes for the API key and store URL
//! - An async HTTP client sending `Authorization: Api-Key ...` on every call
//! - Composite identifiers folding a product and variant into one integer
//! - Field masks for updates that leave chosen fields untouched
//! - Exhaustive page-numbered collection fetching
//! - Order assembly that infers each line's variant from its display name
//! - The [`MixinStore`] façade with every host-facing operation
//!
//! ## Quick Start
//!
//! ```rust
//! use mixin_api::{ApiKey, MixinConfig, MixinStore, StoreUrl};
//!
//! let config = MixinConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let store = MixinStore::new(&config);
//! assert_eq!(store.client().page_size(), 100);
//! ```
//!
//! ## Host Settings
//!
//! Hosts usually keep adapter settings in a flat string map:
//!
//! ```rust
//! use std::collections::HashMap;
//! use mixin_api::{MixinConfig, API_KEY_SETTING};
//!
//! let settings = HashMap::from([(API_KEY_SETTING.to_string(), "your-api-key".to_string())]);
//! let config = MixinConfig::from_settings("https://shop.example.com", &settings).unwrap();
//! assert_eq!(config.store_url().as_ref(), "https://shop.example.com");
//! ```
//!
//! ## Composite Identifiers
//!
//! Products and variants share one id space on the host side:
//!
//! ```rust
//! use mixin_api::rest::CompositeId;
//!
//! let variant = CompositeId::encode(12, 7).unwrap();
//! assert_eq!(variant.decode(), (12, 7));
//!
//! let product = CompositeId::encode(12, 0).unwrap();
//! assert_eq!(product.get(), 78);
//! ```
//!
//! ## Working With Orders
//!
//! ```rust,ignore
//! use mixin_api::store::OrderFilter;
//! use mixin_api::rest::resources::OrderStatus;
//!
//! let filter = OrderFilter {
//!     statuses: vec![OrderStatus::Completed],
//!     ..OrderFilter::default()
//! };
//!
//! for order in store.orders_by_filters(&filter).await? {
//!     for item in &order.items {
//!         println!("order {} line {:?}", order.id, item.composite_id);
//!     }
//! }
//! ```
//!
//! ## Making Raw Requests
//!
//! ```rust,ignore
//! use mixin_api::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "products/")
//!     .query_param("page", "2")
//!     .build()
//!     .unwrap();
//!
//! let response = store.client().http_client().request(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Stateless paging**: Every collection call carries its own cursor

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod store;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, MixinConfig, MixinConfigBuilder, StoreUrl, API_KEY_SETTING};
pub use error::ConfigError;
pub use store::{MixinStore, OrderFilter};

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RestClient, RestError,
};

//! REST API client for the Mixin management API.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that offers convenient methods
//! for interacting with the management endpoints.
//!
//! # Overview
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `put()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::{RestClient, MixinConfig};
//!
//! let client = RestClient::new(&config);
//!
//! let response = client.get("products", None).await?;
//! println!("Products: {}", response.body);
//! ```
//!
//! # Path Normalization
//!
//! Management endpoints always end in a slash:
//!
//! - Leading slashes are stripped: `/products` -> `products/`
//! - A trailing slash is added when missing: `products/12` -> `products/12/`

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;

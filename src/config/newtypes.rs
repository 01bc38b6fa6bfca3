//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Mixin management API key.
///
/// The key is sent as `Authorization: Api-Key {key}` on every request, so it
/// is treated as a secret: the `Debug` implementation masks its value.
///
/// # Example
///
/// ```rust
/// use mixin_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key.to_string()))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated store URL.
///
/// This is the public address of the Mixin store; the management API lives
/// under its `/api/management/v1` path. Trailing slashes are trimmed.
///
/// # Example
///
/// ```rust
/// use mixin_api::StoreUrl;
///
/// let url = StoreUrl::new("https://shop.example.com/").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "shop.example.com");
/// assert_eq!(url.as_ref(), "https://shop.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl StoreUrl {
    /// Creates a new validated store URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreUrl`] if the URL has no scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidStoreUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        // Query strings and fragments cannot prefix an API path
        if url[host_end..].contains(['?', '#']) {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

//! Configuration types for the Mixin API adapter.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`MixinConfig`]: The main configuration struct holding all adapter settings
//! - [`MixinConfigBuilder`]: A builder for constructing [`MixinConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`StoreUrl`]: A validated store URL
//!
//! # Example
//!
//! ```rust
//! use mixin_api::{MixinConfig, ApiKey, StoreUrl};
//!
//! let config = MixinConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, StoreUrl};

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::rest::MAX_PAGE_SIZE;

/// Settings key under which host platforms store the Mixin API key.
pub const API_KEY_SETTING: &str = "MixinApiKey";

/// Configuration for the Mixin API adapter.
///
/// # Thread Safety
///
/// `MixinConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use mixin_api::{MixinConfig, ApiKey, StoreUrl};
///
/// let config = MixinConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
///     .page_size(50)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.page_size(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct MixinConfig {
    api_key: ApiKey,
    store_url: StoreUrl,
    page_size: u32,
    user_agent_prefix: Option<String>,
}

impl MixinConfig {
    /// Creates a new builder for constructing a `MixinConfig`.
    #[must_use]
    pub fn builder() -> MixinConfigBuilder {
        MixinConfigBuilder::new()
    }

    /// Builds a configuration from a host platform's plugin settings.
    ///
    /// The API key is read from the [`API_KEY_SETTING`] entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the settings have no
    /// API key entry, or the validation error of the key or URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::MixinConfig;
    /// use std::collections::HashMap;
    ///
    /// let mut settings = HashMap::new();
    /// settings.insert("MixinApiKey".to_string(), "secret".to_string());
    ///
    /// let config = MixinConfig::from_settings("https://shop.example.com", &settings).unwrap();
    /// assert_eq!(config.api_key().as_ref(), "secret");
    /// ```
    #[allow(clippy::implicit_hasher)]
    pub fn from_settings(
        store_url: &str,
        settings: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let key = settings
            .get(API_KEY_SETTING)
            .ok_or(ConfigError::MissingRequiredField {
                field: API_KEY_SETTING,
            })?;

        Self::builder()
            .api_key(ApiKey::new(key.as_str())?)
            .store_url(StoreUrl::new(store_url)?)
            .build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the store URL.
    #[must_use]
    pub const fn store_url(&self) -> &StoreUrl {
        &self.store_url
    }

    /// Returns the page size used for collection fetches.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify MixinConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MixinConfig>();
};

/// Builder for constructing [`MixinConfig`] instances.
///
/// Required fields are `api_key` and `store_url`.
///
/// # Defaults
///
/// - `page_size`: 100 (values are clamped to `1..=100`)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct MixinConfigBuilder {
    api_key: Option<ApiKey>,
    store_url: Option<StoreUrl>,
    page_size: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl MixinConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the store URL (required).
    #[must_use]
    pub fn store_url(mut self, url: StoreUrl) -> Self {
        self.store_url = Some(url);
        self
    }

    /// Sets the page size for collection fetches.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MixinConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `store_url` are not set.
    pub fn build(self) -> Result<MixinConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let store_url = self
            .store_url
            .ok_or(ConfigError::MissingRequiredField { field: "store_url" })?;

        Ok(MixinConfig {
            api_key,
            store_url,
            page_size: self.page_size.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_url() -> StoreUrl {
        StoreUrl::new("https://shop.example.com").unwrap()
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = MixinConfigBuilder::new().store_url(store_url()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_requires_store_url() {
        let result = MixinConfigBuilder::new()
            .api_key(ApiKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "store_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = MixinConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .store_url(store_url())
            .build()
            .unwrap();

        assert_eq!(config.page_size(), 100);
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.store_url().as_ref(), "https://shop.example.com");
    }

    #[test]
    fn test_builder_clamps_page_size() {
        let build = |size| {
            MixinConfig::builder()
                .api_key(ApiKey::new("key").unwrap())
                .store_url(store_url())
                .page_size(size)
                .build()
                .unwrap()
                .page_size()
        };

        assert_eq!(build(0), 1);
        assert_eq!(build(25), 25);
        assert_eq!(build(500), 100);
    }

    #[test]
    fn test_from_settings_reads_api_key() {
        let mut settings = HashMap::new();
        settings.insert("MixinApiKey".to_string(), "secret".to_string());
        settings.insert("Unrelated".to_string(), "value".to_string());

        let config = MixinConfig::from_settings("https://shop.example.com/", &settings).unwrap();
        assert_eq!(config.api_key().as_ref(), "secret");
        assert_eq!(config.store_url().host_name(), "shop.example.com");
    }

    #[test]
    fn test_from_settings_requires_api_key_entry() {
        let settings = HashMap::new();
        let result = MixinConfig::from_settings("https://shop.example.com", &settings);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "MixinApiKey"
            })
        ));
    }

    #[test]
    fn test_from_settings_rejects_invalid_url() {
        let mut settings = HashMap::new();
        settings.insert("MixinApiKey".to_string(), "secret".to_string());

        let result = MixinConfig::from_settings("shop.example.com", &settings);
        assert!(matches!(result, Err(ConfigError::InvalidStoreUrl { .. })));
    }

    #[test]
    fn test_config_is_clone_and_debug_masks_key() {
        let config = MixinConfig::builder()
            .api_key(ApiKey::new("very-secret").unwrap())
            .store_url(store_url())
            .user_agent_prefix("Host/2.1")
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.api_key(), config.api_key());
        assert_eq!(cloned.user_agent_prefix(), Some("Host/2.1"));

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("MixinConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}

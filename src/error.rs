//! Error types for the Mixin API adapter.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use mixin_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during adapter configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Mixin management API key.")]
    EmptyApiKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Store URL is invalid.
    #[error("Invalid store URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://shop.example.com').")]
    InvalidStoreUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

//! HTTP-specific error types for the Mixin API adapter.
//!
//! The HTTP layer never turns a status code into an error: every received
//! response is returned to the caller, who classifies it. Errors here cover
//! only requests that fail validation and requests that never produced a
//! response.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status {}: {}", response.code, response.body),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST/PUT requests
/// - Body provided without `body_type`
///
/// # Example
///
/// ```rust
/// use mixin_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, including timeouts and unreadable bodies.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

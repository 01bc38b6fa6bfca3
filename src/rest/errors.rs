//! Resource-specific error types for REST API operations.
//!
//! This module contains the error taxonomy for Mixin resource operations,
//! extending the base [`RestError`](crate::clients::RestError) with semantic
//! variants derived from the vendor's status codes and error bodies.
//!
//! # Error Handling
//!
//! The vendor reports most rejections as a 400 or 500 whose body carries an
//! error code. [`ResourceError::from_http_response`] maps them as follows:
//!
//! - **404**: [`ResourceError::NotFound`]
//! - **400**: `product_invalid_id` is [`ResourceError::NotFound`]; known codes
//!   become [`ResourceError::VendorRejected`] with a specific
//!   [`RejectionReason`]; anything else is [`RejectionReason::BadRequest`]
//! - **401**: [`ResourceError::Unauthenticated`]
//! - **403**: [`ResourceError::Forbidden`]
//! - **500**: `duplicate_term_slug` and `missing_parent` become
//!   [`ResourceError::VendorRejected`]; anything else is
//!   [`ResourceError::UnknownVendorError`]
//! - **Other**: [`ResourceError::UnknownVendorError`]
//!
//! Transport failures (no status received) become
//! [`ResourceError::TransientNetwork`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{ResourceError, RejectionReason};
//!
//! match store.create_category(&category, &mask).await {
//!     Ok(id) => println!("Created category {}", id),
//!     Err(ResourceError::VendorRejected { reason: RejectionReason::DuplicateName, .. }) => {
//!         println!("A category with that name already exists");
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use std::fmt;

use crate::clients::{HttpError, RestError, RAW_BODY_KEY};
use thiserror::Error;

/// A caller supplied a value that violates an input contract.
///
/// These errors are raised synchronously before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// An identifier component was negative.
    #[error("Identifier components must be non-negative (outer: {outer}, inner: {inner})")]
    NegativeComponent {
        /// The outer (product) component.
        outer: i64,
        /// The inner (variant) component.
        inner: i64,
    },

    /// The pair is too large to fold into a 64-bit composite identifier.
    #[error("Identifier pair ({outer}, {inner}) does not fit in a composite identifier")]
    Overflow {
        /// The outer (product) component.
        outer: i64,
        /// The inner (variant) component.
        inner: i64,
    },

    /// A composite identifier was negative.
    #[error("Composite identifier must be non-negative, got {code}")]
    NegativeCompositeId {
        /// The rejected code.
        code: i64,
    },

    /// A field category name is not part of the fixed category table.
    #[error("Unsupported field: {field}")]
    UnsupportedField {
        /// The unrecognized category name.
        field: String,
    },

    /// A product URL could not be parsed.
    #[error("Malformed product URL '{url}': {reason}")]
    MalformedUrl {
        /// The URL that was rejected.
        url: String,
        /// Why the URL was rejected.
        reason: &'static str,
    },
}

/// The specific reason a vendor rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// A category (term) with the same name or slug already exists.
    DuplicateName,
    /// The referenced parent category does not exist.
    MissingParent,
    /// The SKU is invalid.
    InvalidSku,
    /// The stock quantity is invalid.
    InvalidQuantity,
    /// A 400 response without a recognized error code.
    BadRequest,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::DuplicateName => "duplicate name",
            Self::MissingParent => "missing parent",
            Self::InvalidSku => "invalid SKU",
            Self::InvalidQuantity => "invalid quantity",
            Self::BadRequest => "bad request",
        };
        f.write_str(text)
    }
}

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use mixin_api::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Product",
///     id: "123".to_string(),
/// };
/// assert!(error.to_string().contains("Product"));
/// assert!(error.to_string().contains("123"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The caller passed an invalid argument.
    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    /// The resource does not exist at the vendor.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Product", "Category").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// The API key was rejected (HTTP 401).
    #[error("Authentication with the Mixin API failed. Check the configured API key.")]
    Unauthenticated,

    /// The API key lacks access to the resource (HTTP 403).
    #[error("Access forbidden: {body}")]
    Forbidden {
        /// The raw response body.
        body: String,
    },

    /// No response was received from the vendor.
    #[error("Network error: {message}")]
    TransientNetwork {
        /// Description of the transport failure.
        message: String,
    },

    /// The vendor rejected the request with a recognized error body.
    #[error("Request rejected by Mixin ({reason}): {body}")]
    VendorRejected {
        /// The specific rejection reason.
        reason: RejectionReason,
        /// The raw response body.
        body: String,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The vendor returned an unrecognized status or error body.
    #[error("Unexpected Mixin API error (status {code}): {body}")]
    UnknownVendorError {
        /// The HTTP status code.
        code: u16,
        /// The raw response body.
        body: String,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The operation is not supported by the vendor API.
    #[error("{operation} is not supported by the Mixin API")]
    Unsupported {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// No valid path matches the provided IDs and operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "all", "update").
        operation: &'static str,
    },

    /// A successful response carried a body that could not be decoded.
    #[error("Unexpected response body for {resource}: {message}")]
    UnexpectedBody {
        /// The type name of the resource.
        resource: &'static str,
        /// What went wrong during decoding.
        message: String,
    },

    /// A record could not be serialized for sending.
    #[error("Failed to serialize {resource}: {message}")]
    Serialization {
        /// The type name of the resource.
        resource: &'static str,
        /// The serializer's message.
        message: String,
    },

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(RestError),
}

impl From<RestError> for ResourceError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(HttpError::Network(e)) => Self::TransientNetwork {
                message: e.to_string(),
            },
            other => Self::Rest(other),
        }
    }
}

impl ResourceError {
    /// Classifies a non-2xx vendor response.
    ///
    /// # Arguments
    ///
    /// * `code` - The HTTP status code
    /// * `body` - The response body as JSON
    /// * `resource` - The resource type name (e.g., "Product")
    /// * `id` - The resource ID (if applicable)
    /// * `request_id` - The X-Request-Id header value
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::rest::{ResourceError, RejectionReason};
    /// use serde_json::json;
    ///
    /// let error = ResourceError::from_http_response(
    ///     400,
    ///     &json!({"code": "term_exists"}),
    ///     "Category",
    ///     None,
    ///     None,
    /// );
    /// assert!(matches!(
    ///     error,
    ///     ResourceError::VendorRejected { reason: RejectionReason::DuplicateName, .. }
    /// ));
    /// ```
    #[must_use]
    pub fn from_http_response(
        code: u16,
        body: &serde_json::Value,
        resource: &'static str,
        id: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        let text = body_text(body);
        let not_found = || Self::NotFound {
            resource,
            id: id.unwrap_or("unknown").to_string(),
        };
        let rejected = |reason| Self::VendorRejected {
            reason,
            body: text.clone(),
            request_id: request_id.map(ToString::to_string),
        };
        let unknown = || Self::UnknownVendorError {
            code,
            body: text.clone(),
            request_id: request_id.map(ToString::to_string),
        };

        match code {
            404 => not_found(),
            400 if text.contains("product_invalid_id") => not_found(),
            400 if text.contains("product_invalid_sku") => rejected(RejectionReason::InvalidSku),
            400 if text.contains("stock_quantity") => rejected(RejectionReason::InvalidQuantity),
            400 if text.contains("term_exists") => rejected(RejectionReason::DuplicateName),
            400 => rejected(RejectionReason::BadRequest),
            401 => Self::Unauthenticated,
            403 => Self::Forbidden { body: text.clone() },
            500 if text.contains("duplicate_term_slug") => {
                rejected(RejectionReason::DuplicateName)
            }
            500 if text.contains("missing_parent") => rejected(RejectionReason::MissingParent),
            _ => unknown(),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::VendorRejected { request_id, .. } | Self::UnknownVendorError { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }
}

/// Returns the body as text, unwrapping bodies the HTTP layer kept verbatim.
fn body_text(body: &serde_json::Value) -> String {
    body.get(RAW_BODY_KEY)
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| body.to_string(), ToString::to_string)
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
    assert_send_sync::<ArgumentError>();
};

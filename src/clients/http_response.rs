//! HTTP response types for the Mixin API adapter.
//!
//! This module provides the [`HttpResponse`] type for accessing the status,
//! headers, and parsed body of a management API response.

use std::collections::HashMap;

/// Key under which a body that is not JSON is kept.
pub const RAW_BODY_KEY: &str = "raw_body";

/// An HTTP response from the Mixin API.
///
/// Every received response is represented here regardless of its status
/// code; use [`is_ok`](Self::is_ok) to distinguish success.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    ///
    /// An empty body is represented as `{}`. A body that is not JSON is kept
    /// as `{"raw_body": "<text>"}`, whatever the status.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the verbatim text of a body that was not JSON.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match &self.body {
            serde_json::Value::Object(map) if map.len() == 1 => {
                map.get(RAW_BODY_KEY).and_then(serde_json::Value::as_str)
            }
            _ => None,
        }
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}

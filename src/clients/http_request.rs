//! Requests against the management API.
//!
//! The vendor speaks JSON only, so a request is a method, a path below
//! `/api/management/v1/`, an optional JSON body and a flat query map.
//! Writes (`POST`, `PUT`) always carry a body: the vendor has no partial
//! update, so an empty write is a caller bug caught by [`HttpRequest::verify`].

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// The verbs the management API answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    /// Returns the lowercase verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
        }
    }

    /// Returns `true` for the verbs that must send a record.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body encoding. The vendor accepts nothing but JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Json,
}

impl DataType {
    /// Returns the `Content-Type` value.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// One call to the management API.
///
/// # Example
///
/// ```rust
/// use mixin_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let page = HttpRequest::builder(HttpMethod::Get, "orders/")
///     .query_param("status", "finished,canceled")
///     .query_param("page", "2")
///     .build()
///     .unwrap();
/// assert_eq!(page.query.len(), 2);
///
/// let write = HttpRequest::builder(HttpMethod::Put, "products/12/variants/7/")
///     .json(json!({"stock": 4}))
///     .build()
///     .unwrap();
/// assert!(write.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub http_method: HttpMethod,
    /// Path below the management API root, e.g. `products/12/`.
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub body_type: Option<DataType>,
    /// Sent as the URL query string; empty sends none.
    pub query: HashMap<String, String>,
    /// Sent on top of the client's default headers, overriding them.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Starts a request for `method` on `path`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            request: Self {
                http_method: method,
                path: path.into(),
                body: None,
                body_type: None,
                query: HashMap::new(),
                headers: HashMap::new(),
            },
        }
    }

    /// Checks that a body has an encoding and that every write has a body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBodyType`] for a body
    /// without a type, or [`InvalidHttpRequestError::MissingBody`] for a
    /// `POST` or `PUT` without a body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (&self.body, self.body_type) {
            (Some(_), None) => Err(InvalidHttpRequestError::MissingBodyType),
            (None, _) if self.http_method.carries_body() => {
                Err(InvalidHttpRequestError::MissingBody {
                    method: self.http_method.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder returned by [`HttpRequest::builder`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Sets a JSON body. Shorthand for `body(..)` plus `body_type(DataType::Json)`.
    #[must_use]
    pub fn json(self, body: impl Into<serde_json::Value>) -> Self {
        self.body(body).body_type(DataType::Json)
    }

    /// Sets the body; pair it with [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.request.body_type = Some(body_type);
        self
    }

    /// Merges `query` into the query string.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.request.query.extend(query);
        self
    }

    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(key.into(), value.into());
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_writes_carry_a_body() {
        assert!(!HttpMethod::Get.carries_body());
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert_eq!(HttpMethod::Put.to_string(), "put");
    }

    #[test]
    fn test_json_sets_body_and_type() {
        let request = HttpRequest::builder(HttpMethod::Put, "products/12/")
            .json(json!({"name": "Shirt", "price": null}))
            .build()
            .unwrap();

        assert_eq!(request.body, Some(json!({"name": "Shirt", "price": null})));
        assert_eq!(request.body_type, Some(DataType::Json));
    }

    #[test]
    fn test_writes_without_body_are_rejected() {
        for (method, name) in [(HttpMethod::Post, "post"), (HttpMethod::Put, "put")] {
            let result = HttpRequest::builder(method, "categories/").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { method }) if method == name
            ));
        }
    }

    #[test]
    fn test_body_without_type_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "categories/")
            .body(json!({"name": "Shoes"}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBodyType)
        ));
    }

    #[test]
    fn test_query_merges_with_single_params() {
        let request = HttpRequest::builder(HttpMethod::Get, "orders/")
            .query(HashMap::from([("status".to_string(), "finished".to_string())]))
            .query_param("page", "2")
            .header("X-Request-Id", "sync-41")
            .build()
            .unwrap();

        assert_eq!(request.query.get("status").map(String::as_str), Some("finished"));
        assert_eq!(request.query.get("page").map(String::as_str), Some("2"));
        assert_eq!(
            request.headers.get("X-Request-Id").map(String::as_str),
            Some("sync-41")
        );
    }
}

//! Path building infrastructure for REST resources.
//!
//! Mixin resources are reached through plain and nested management paths.
//! A `Variant`, for example, only exists beneath its product:
//!
//! - `products/{product_id}/variants/` (list)
//! - `products/{product_id}/variants/{id}/` (single record)
//!
//! The path resolution system selects the most specific path whose ids are
//! all available. Templates keep the trailing `/` the vendor expects.
//!
//! # Example
//!
//! ```rust
//! use mixin_api::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use mixin_api::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Find,
//!         &["product_id", "id"],
//!         "products/{product_id}/variants/{id}/",
//!     ),
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::All,
//!         &["product_id"],
//!         "products/{product_id}/variants/",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Find, &["product_id", "id"]);
//! assert!(path.is_some());
//!
//! let mut ids = HashMap::new();
//! ids.insert("product_id", "12");
//! ids.insert("id", "7");
//! let url = build_path(path.unwrap().template, &ids);
//! assert_eq!(url, "products/12/variants/7/");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single record (GET `/resources/{id}/`).
    Find,
    /// List records page by page (GET `/resources/`).
    All,
    /// Create a record (POST `/resources/`).
    Create,
    /// Overwrite a record (PUT `/resources/{id}/`).
    Update,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Find | Self::All => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// A path configuration for a REST resource operation.
///
/// Templates use `{id_name}` placeholders:
/// - `categories/{id}/` - Single ID
/// - `products/{product_id}/variants/{id}/` - Multiple IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required ID parameters in order (e.g., `["product_id", "id"]`).
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` so paths can be declared as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose required IDs are all available,
/// the one with the most IDs wins.
///
/// # Example
///
/// ```rust
/// use mixin_api::rest::{ResourcePath, ResourceOperation, get_path};
/// use mixin_api::HttpMethod;
///
/// const PATHS: &[ResourcePath] = &[
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "products/"),
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "products/{id}/"),
/// ];
///
/// let path = get_path(PATHS, ResourceOperation::Find, &["id"]);
/// assert_eq!(path.unwrap().template, "products/{id}/");
///
/// assert!(get_path(PATHS, ResourceOperation::Update, &["id"]).is_none());
/// ```
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Builds a URL from a template by interpolating IDs.
///
/// # Example
///
/// ```rust
/// use mixin_api::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", 456_i64);
///
/// assert_eq!(build_path("orders/{id}/", &ids), "orders/456/");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &value.to_string());
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

//! REST Resource trait for Mixin management endpoints.
//!
//! This module defines the [`RestResource`] trait. Implementors declare their
//! name, paths and id accessor, and gain `find()`, `all()`,
//! `all_with_parent()`, `first_page()`, `create()` and `update()`.
//!
//! # Writes
//!
//! The vendor has no partial-update verb. `create()` and `update()` always
//! serialize the whole record, run the caller's [`FieldMask`] over the JSON
//! and only then send it, so masked fields keep their stored values.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{RestResource, ResourcePath, ResourceOperation};
//! use mixin_api::HttpMethod;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Category {
//!     #[serde(skip_serializing)]
//!     pub id: Option<i64>,
//!     pub name: String,
//! }
//!
//! impl RestResource for Category {
//!     const NAME: &'static str = "Category";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "categories/{id}/"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "categories/"),
//!     ];
//!
//!     fn get_id(&self) -> Option<i64> {
//!         self.id
//!     }
//! }
//!
//! let category = Category::find(&client, 12).await?;
//! let every_category = Category::all(&client, None, None).await?.into_records();
//! ```

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{HttpResponse, RestClient};
use crate::rest::{
    build_path, fetch_all, get_path, Collected, FieldMask, PageCursor, PageEnvelope,
    ResourceError, ResourceOperation, ResourcePath, RestPageExecutor,
};

/// A Mixin record reachable through the management API.
///
/// # Associated Constants
///
/// - `NAME`: The singular resource name used in errors (e.g., "Product")
/// - `PATHS`: Available paths for the supported operations
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The singular name of the resource (e.g., "Product").
    const NAME: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Returns the vendor id, `None` for records not yet created.
    fn get_id(&self) -> Option<i64>;

    /// Resolves and fills the path template for an operation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no path for the
    /// operation can be built from `ids`.
    fn resolve_path(
        operation: ResourceOperation,
        ids: &[(&str, i64)],
    ) -> Result<String, ResourceError> {
        let available_ids: Vec<&str> = ids.iter().map(|(name, _)| *name).collect();
        let path = get_path(Self::PATHS, operation, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: operation.as_str(),
            },
        )?;

        let ids: HashMap<&str, i64> = ids.iter().copied().collect();
        Ok(build_path(path.template, &ids))
    }

    /// Fetches a single record by vendor id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the record doesn't exist,
    /// [`ResourceError::UnexpectedBody`] if the answer is not a record with an
    /// id, or any other classified vendor error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let customer = Customer::find(&client, 9).await?;
    /// println!("{}", customer.full_name());
    /// ```
    async fn find(client: &RestClient, id: i64) -> Result<Self, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::Find, &[("id", id)])?;
        let response = client.get(&path, None).await?;
        let record: Self = decode_record(response, Self::NAME, Some(&id.to_string()))?;

        if record.get_id().is_none() {
            return Err(ResourceError::UnexpectedBody {
                resource: Self::NAME,
                message: format!("record {id} came back without an id"),
            });
        }
        Ok(record)
    }

    /// Fetches every record, page by page, starting at `cursor`.
    ///
    /// Without a cursor the walk starts at page 1 with the client's page size.
    /// A failed page ends the walk early; see [`Collected::end`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// list path.
    async fn all(
        client: &RestClient,
        query: Option<HashMap<String, String>>,
        cursor: Option<PageCursor>,
    ) -> Result<Collected<Self>, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::All, &[])?;
        let executor =
            RestPageExecutor::<Self>::new(client, path).query(query.unwrap_or_default());
        let cursor = cursor.unwrap_or_else(|| PageCursor::first(client.page_size()));

        Ok(fetch_all(&executor, cursor).await)
    }

    /// Fetches every record nested under a parent resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no list path takes
    /// `parent_id_name`.
    async fn all_with_parent(
        client: &RestClient,
        parent_id_name: &str,
        parent_id: i64,
        cursor: Option<PageCursor>,
    ) -> Result<Collected<Self>, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::All, &[(parent_id_name, parent_id)])?;
        let executor = RestPageExecutor::<Self>::new(client, path);
        let cursor = cursor.unwrap_or_else(|| PageCursor::first(client.page_size()));

        Ok(fetch_all(&executor, cursor).await)
    }

    /// Fetches a single page of the collection.
    ///
    /// Unlike [`all`](Self::all), a failed page is returned as an error.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error for a non-2xx page, or
    /// [`ResourceError::UnexpectedBody`] if the envelope cannot be decoded.
    async fn first_page(
        client: &RestClient,
        query: Option<HashMap<String, String>>,
        cursor: Option<PageCursor>,
    ) -> Result<PageEnvelope<Self>, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::All, &[])?;
        let cursor = cursor.unwrap_or_else(|| PageCursor::first(client.page_size()));

        let mut query = query.unwrap_or_default();
        query.extend(cursor.query_params());

        let response = client.get(&path, Some(query)).await?;
        decode_record(response, Self::NAME, None)
    }

    /// Creates the record, omitting the masked fields.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the create is rejected.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let created = category.create(&client, &FieldMask::new()).await?;
    /// println!("New category {}", created.id.unwrap_or_default());
    /// ```
    async fn create(&self, client: &RestClient, mask: &FieldMask) -> Result<Self, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::Create, &[])?;
        let body = self.masked_body(mask)?;

        let response = client.post(&path, body, None).await?;
        decode_record(response, Self::NAME, None)
    }

    /// Overwrites the record at `ids`, keeping the masked fields unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if `ids` does not
    /// select an update path, or the classified vendor error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mask: FieldMask = [FieldCategory::ProductPrice].into_iter().collect();
    /// let saved = variant
    ///     .update(&client, &[("product_id", 12), ("id", 7)], &mask)
    ///     .await?;
    /// ```
    async fn update(
        &self,
        client: &RestClient,
        ids: &[(&str, i64)],
        mask: &FieldMask,
    ) -> Result<Self, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::Update, ids)?;
        let body = self.masked_body(mask)?;

        let response = client.put(&path, body, None).await?;
        let id = ids
            .iter()
            .find(|(name, _)| *name == "id")
            .map(|(_, id)| id.to_string());
        decode_record(response, Self::NAME, id.as_deref())
    }

    /// Serializes the full record and strips the masked keys.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if the record cannot be
    /// turned into JSON.
    fn masked_body(&self, mask: &FieldMask) -> Result<Value, ResourceError> {
        let mut body = serde_json::to_value(self).map_err(|e| ResourceError::Serialization {
            resource: Self::NAME,
            message: e.to_string(),
        })?;
        mask.apply(&mut body);
        Ok(body)
    }
}

/// Classifies a response and decodes a successful body.
fn decode_record<T: DeserializeOwned>(
    response: HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<T, ResourceError> {
    if !response.is_ok() {
        return Err(ResourceError::from_http_response(
            response.code,
            &response.body,
            resource,
            id,
            response.request_id(),
        ));
    }

    if let Some(text) = response.raw_body() {
        return Err(ResourceError::UnexpectedBody {
            resource,
            message: format!("response is not JSON: {}", text.chars().take(80).collect::<String>()),
        });
    }

    serde_json::from_value(response.body).map_err(|e| ResourceError::UnexpectedBody {
        resource,
        message: e.to_string(),
    })
}

/// Serializes a params struct to a query parameter map.
///
/// `null` values are skipped and arrays become comma-separated lists.
pub(crate) fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| ResourceError::Serialization {
        resource: "query",
        message: e.to_string(),
    })?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

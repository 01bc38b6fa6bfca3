//! The store façade a host platform talks to.
//!
//! [`MixinStore`] bundles a [`RestClient`] with the operations a host needs to
//! synchronize its catalog and orders with a Mixin store:
//!
//! - **Products and variants**: listing, searching, creating and masked updates
//! - **Categories**: listing, searching, creating and masked updates
//! - **Customers**: lookup and search
//! - **Orders**: filtered listing and assembly with composite line ids
//!
//! Catalog records are handed out under their [`CompositeId`], so a bare
//! product `12` is `encode(12, 0)` and its variant `7` is `encode(12, 7)`.
//! Category, customer and order ids are the vendor's own.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::{ApiKey, MixinConfig, MixinStore, StoreUrl};
//! use mixin_api::rest::resources::ProductKind;
//! use mixin_api::rest::PageCursor;
//!
//! let config = MixinConfig::builder()
//!     .api_key(ApiKey::new("my-api-key")?)
//!     .store_url(StoreUrl::new("https://shop.example.com")?)
//!     .build()?;
//! let store = MixinStore::new(&config);
//!
//! if store.validate_connection().await {
//!     for product in store
//!         .search_products(Some("Shirt"), ProductKind::Variable, PageCursor::default())
//!         .await?
//!     {
//!         println!("{} {:?}", product.id(), product.name);
//!     }
//! }
//! ```

mod catalog;
mod customers;
mod orders;

pub use orders::OrderFilter;

use std::collections::HashMap;

use crate::clients::RestClient;
use crate::config::MixinConfig;
use crate::rest::resources::PaymentMethod;
use crate::rest::{CompositeId, ResourceError, RestResource};

/// Path requested by [`MixinStore::validate_connection`].
const CONNECTION_CHECK_PATH: &str = "products/";

/// Entry point for all vendor operations of one store.
#[derive(Debug)]
pub struct MixinStore {
    client: RestClient,
}

// Verify MixinStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MixinStore>();
    assert_send_sync::<OrderFilter>();
};

impl MixinStore {
    /// Creates a store bound to the configured Mixin instance.
    #[must_use]
    pub fn new(config: &MixinConfig) -> Self {
        Self::from_client(RestClient::new(config))
    }

    /// Wraps an existing REST client.
    #[must_use]
    pub const fn from_client(client: RestClient) -> Self {
        Self { client }
    }

    /// Returns the underlying REST client.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Returns `true` if the vendor answers the product list with HTTP 200.
    ///
    /// Any other status, and any transport failure, counts as unreachable.
    pub async fn validate_connection(&self) -> bool {
        match self.client.get(CONNECTION_CHECK_PATH, None).await {
            Ok(response) => {
                tracing::debug!(status = response.code, "Connection check answered");
                response.code == 200
            }
            Err(error) => {
                tracing::warn!(%error, "Connection check failed");
                false
            }
        }
    }

    /// Returns the payment methods the vendor reports on orders.
    ///
    /// The vendor has no endpoint for this; the list is fixed.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn payment_methods(&self) -> [PaymentMethod; 3] {
        PaymentMethod::all()
    }
}

/// Builds the `search` query parameter map.
fn search_query(term: &str) -> HashMap<String, String> {
    HashMap::from([("search".to_string(), term.to_string())])
}

/// Returns the vendor id of a record read back from the vendor.
fn vendor_id<R: RestResource>(record: &R) -> Result<i64, ResourceError> {
    record.get_id().ok_or(ResourceError::UnexpectedBody {
        resource: R::NAME,
        message: "record has no id".to_string(),
    })
}

/// Encodes a bare product id.
fn product_id(outer: i64) -> Result<CompositeId, ResourceError> {
    Ok(CompositeId::encode(outer, 0)?)
}

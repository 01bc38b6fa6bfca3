//! Building the host-facing view of a vendor order.
//!
//! Each line item links to the product page it was bought from:
//!
//! ```text
//! https://shop.example.com/product/12/shirt?vid=7
//! ```
//!
//! [`OrderAssembler`] reads the product id from that URL, asks a
//! [`VariantResolver`] which variant the line names and stores
//! `encode(product, variant)` on the line. The variant id is chosen as:
//!
//! 1. the resolver's answer, if it found one;
//! 2. otherwise the URL's `vid` parameter, if present;
//! 3. otherwise `0`, the bare product.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{CatalogVariantResolver, OrderAssembler, RestResource};
//! use mixin_api::rest::resources::OrderDetail;
//!
//! let detail = OrderDetail::find(&client, 501).await?;
//! let assembler = OrderAssembler::new(CatalogVariantResolver::new(&client));
//! let order = assembler.assemble(detail).await?;
//!
//! for item in &order.items {
//!     println!("{} -> {:?}", item.name, item.composite_id);
//! }
//! ```

use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::rest::resources::{OrderDetail, OrderItem, OrderStatus, PaymentMethod};
use crate::rest::{ArgumentError, CompositeId, ResourceError, VariantResolution, VariantResolver};

static PRODUCT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/product/(?P<product_id>\d+)").expect("valid regex"));

static VARIANT_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vid=(?P<variant_id>[^&]*)").expect("valid regex"));

/// Product and variant ids read from a storefront product URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductUrl {
    /// The product id from the `/product/{id}` segment.
    pub product_id: i64,
    /// The `vid` query value, when present and numeric.
    pub variant_id: Option<i64>,
}

impl ProductUrl {
    /// Parses a product URL.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::MalformedUrl`] if the URL is blank or has no
    /// numeric `/product/{id}` segment.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::rest::ProductUrl;
    ///
    /// let url = ProductUrl::parse("https://shop.example.com/Product/12/shirt?vid=7&ref=x").unwrap();
    /// assert_eq!(url.product_id, 12);
    /// assert_eq!(url.variant_id, Some(7));
    /// ```
    pub fn parse(url: &str) -> Result<Self, ArgumentError> {
        let malformed = |reason| ArgumentError::MalformedUrl {
            url: url.to_string(),
            reason,
        };

        if url.trim().is_empty() {
            return Err(malformed("URL is empty"));
        }

        let product_id = PRODUCT_SEGMENT
            .captures(url)
            .ok_or_else(|| malformed("no /product/{id} segment"))?["product_id"]
            .parse::<i64>()
            .map_err(|_| malformed("product id is out of range"))?;

        let variant_id = VARIANT_PARAM
            .captures(url)
            .and_then(|captures| captures["variant_id"].trim().parse::<i64>().ok())
            .filter(|variant_id| *variant_id >= 0);

        Ok(Self {
            product_id,
            variant_id,
        })
    }
}

impl FromStr for ProductUrl {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A vendor order with composite ids on every line and mapped enums.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledOrder {
    detail: OrderDetail,
    status: OrderStatus,
    payment_method: Option<PaymentMethod>,
}

impl AssembledOrder {
    /// Returns the mapped order status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the mapped payment method.
    #[must_use]
    pub const fn payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_method.as_ref()
    }

    /// Consumes the order and returns the underlying detail.
    #[must_use]
    pub fn into_detail(self) -> OrderDetail {
        self.detail
    }
}

impl Deref for AssembledOrder {
    type Target = OrderDetail;

    fn deref(&self) -> &Self::Target {
        &self.detail
    }
}

/// Attaches composite ids to order lines.
#[derive(Debug, Clone)]
pub struct OrderAssembler<R> {
    resolver: R,
}

impl<R: VariantResolver> OrderAssembler<R> {
    /// Creates an assembler that resolves variants with `resolver`.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Assembles an order detail into the host-facing order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if a line's product URL is
    /// malformed or its ids cannot be encoded.
    pub async fn assemble(
        &self,
        mut detail: OrderDetail,
    ) -> Result<AssembledOrder, ResourceError> {
        for item in &mut detail.items {
            item.composite_id = Some(self.line_id(item).await?);
        }

        Ok(AssembledOrder {
            status: detail.order_status(),
            payment_method: detail.payment(),
            detail,
        })
    }

    /// Computes the composite id for one order line.
    ///
    /// # Errors
    ///
    /// See [`assemble`](Self::assemble).
    pub async fn line_id(&self, item: &OrderItem) -> Result<CompositeId, ResourceError> {
        let url = ProductUrl::parse(&item.url)?;

        let resolution = self.resolver.resolve(&item.name, url.product_id).await;

        let variant_id = match (resolution, url.variant_id) {
            (VariantResolution::Resolved(variant_id), _) => variant_id,
            (VariantResolution::Unresolved, Some(url_variant_id)) => {
                tracing::warn!(
                    product_id = url.product_id,
                    variant_id = url_variant_id,
                    item_name = %item.name,
                    "Variant not resolved from line name, using the URL's variant id"
                );
                url_variant_id
            }
            (VariantResolution::Unresolved, None) => 0,
        };

        Ok(CompositeId::encode(url.product_id, variant_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Resolves from a fixed table and records every lookup.
    #[derive(Default)]
    struct TableResolver {
        table: HashMap<(String, i64), i64>,
        lookups: Mutex<Vec<(String, i64)>>,
    }

    impl TableResolver {
        fn with(item_name: &str, product_id: i64, variant_id: i64) -> Self {
            let mut resolver = Self::default();
            resolver
                .table
                .insert((item_name.to_string(), product_id), variant_id);
            resolver
        }
    }

    impl VariantResolver for TableResolver {
        async fn resolve(&self, item_name: &str, product_id: i64) -> VariantResolution {
            let key = (item_name.to_string(), product_id);
            self.lookups.lock().unwrap().push(key.clone());
            self.table.get(&key).copied().into()
        }
    }

    fn item(name: &str, url: &str) -> OrderItem {
        OrderItem {
            id: "1".to_string(),
            name: name.to_string(),
            quantity: 1,
            compare_at_price: None,
            price: 1000,
            total_price: 1000,
            image: None,
            url: url.to_string(),
            composite_id: None,
        }
    }

    fn detail(items: Vec<OrderItem>) -> OrderDetail {
        serde_json::from_value::<OrderDetail>(serde_json::json!({
            "id": 501,
            "creation_date": Utc::now().to_rfc3339(),
            "status": "finished",
            "payment_method": "CARD"
        }))
        .map(|mut detail| {
            detail.items = items;
            detail
        })
        .unwrap()
    }

    #[test]
    fn test_product_url_parses_product_and_variant() {
        let url = ProductUrl::parse("https://shop.example.com/product/12/shirt?vid=7").unwrap();
        assert_eq!(url.product_id, 12);
        assert_eq!(url.variant_id, Some(7));

        let url: ProductUrl = "/PRODUCT/40".parse().unwrap();
        assert_eq!(url.product_id, 40);
        assert_eq!(url.variant_id, None);
    }

    #[test]
    fn test_product_url_ignores_non_numeric_variant() {
        let url = ProductUrl::parse("/product/12?vid=blue&x=1").unwrap();
        assert_eq!(url.variant_id, None);

        let url = ProductUrl::parse("/product/12?VID=&x=1").unwrap();
        assert_eq!(url.variant_id, None);
    }

    #[test]
    fn test_product_url_rejects_malformed_input() {
        assert!(matches!(
            ProductUrl::parse("   "),
            Err(ArgumentError::MalformedUrl { reason: "URL is empty", .. })
        ));
        assert!(matches!(
            ProductUrl::parse("https://shop.example.com/category/3"),
            Err(ArgumentError::MalformedUrl { .. })
        ));
        assert!(ProductUrl::parse("/product/99999999999999999999").is_err());
    }

    #[tokio::test]
    async fn test_resolved_variant_wins_over_url() {
        let assembler = OrderAssembler::new(TableResolver::with("Shirt - Blue / 30", 12, 8));
        let line = item("Shirt - Blue / 30", "/product/12?vid=7");

        let id = assembler.line_id(&line).await.unwrap();
        assert_eq!(id.decode(), (12, 8));
    }

    #[tokio::test]
    async fn test_url_variant_is_used_when_unresolved() {
        let assembler = OrderAssembler::new(TableResolver::default());
        let line = item("Shirt - Green", "/product/12?vid=7");

        let id = assembler.line_id(&line).await.unwrap();
        assert_eq!(id.decode(), (12, 7));
    }

    #[tokio::test]
    async fn test_bare_product_when_nothing_names_a_variant() {
        let resolver = TableResolver::default();
        let assembler = OrderAssembler::new(resolver);
        let line = item("Mug", "/product/30");

        let id = assembler.line_id(&line).await.unwrap();
        assert_eq!(id, CompositeId::encode(30, 0).unwrap());
        assert_eq!(
            assembler.resolver.lookups.lock().unwrap().as_slice(),
            [("Mug".to_string(), 30)]
        );
    }

    #[tokio::test]
    async fn test_assemble_sets_every_line_and_maps_enums() {
        let assembler = OrderAssembler::new(TableResolver::with("Shirt - Blue", 12, 8));
        let order = assembler
            .assemble(detail(vec![
                item("Shirt - Blue", "/product/12?vid=7"),
                item("Mug", "/product/30"),
            ]))
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.payment_method(), Some(&PaymentMethod::Card));
        assert_eq!(order.items[0].composite_id.unwrap().decode(), (12, 8));
        assert_eq!(order.items[1].composite_id.unwrap().decode(), (30, 0));
    }

    #[tokio::test]
    async fn test_assemble_fails_on_malformed_line_url() {
        let assembler = OrderAssembler::new(TableResolver::default());
        let result = assembler.assemble(detail(vec![item("Mug", "")])).await;

        assert!(matches!(
            result,
            Err(ResourceError::InvalidArgument(ArgumentError::MalformedUrl { .. }))
        ));
    }
}

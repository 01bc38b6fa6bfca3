//! Product resource implementation.
//!
//! Products live at `products/` and are written as whole records. Variants
//! are embedded in product responses but are only writable through the
//! [`Variant`](super::Variant) resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{FieldMask, RestResource};
//! use mixin_api::rest::resources::{Product, ProductKind};
//!
//! let product = Product::find(&client, 12).await?;
//! assert_eq!(product.kind(), ProductKind::Simple);
//!
//! let products = Product::all(&client, None, None).await?.into_records();
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::Variant;

/// How a product's stock is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockType {
    /// Never runs out.
    Unlimited,
    /// Tracked by the `stock` count.
    #[default]
    Limited,
    /// Not available for sale.
    OutOfStock,
    /// Made to order.
    Call,
    /// A value this crate does not know.
    #[serde(other)]
    Unknown,
}

/// Product shape used to filter searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductKind {
    /// Every product.
    #[default]
    Any,
    /// Products without variants.
    Simple,
    /// Products with variants.
    Variable,
}

impl ProductKind {
    /// Returns `true` if the product has this shape.
    #[must_use]
    pub const fn matches(self, product: &Product) -> bool {
        match self {
            Self::Any => true,
            Self::Simple => !product.has_variants,
            Self::Variable => product.has_variants,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    #[serde(skip_serializing)]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub main_category: Option<i64>,
    #[serde(default)]
    pub other_categories: Option<Vec<i64>>,
    pub price: Option<i64>,
    pub compare_at_price: Option<i64>,
    #[serde(default)]
    pub stock_type: Option<StockType>,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub draft: Option<bool>,
    #[serde(default)]
    pub product_identifier: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing)]
    pub has_variants: bool,
    #[serde(default, skip_serializing)]
    pub images: Vec<Value>,
    #[serde(default, skip_serializing)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Returns the product's shape.
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        if self.has_variants {
            ProductKind::Variable
        } else {
            ProductKind::Simple
        }
    }

    /// Returns the display name, falling back to the English name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.english_name.as_deref())
    }

    /// Returns `true` if the display name contains `term`.
    #[must_use]
    pub fn name_contains(&self, term: &str) -> bool {
        self.display_name().is_some_and(|name| name.contains(term))
    }
}

impl RestResource for Product {
    const NAME: &'static str = "Product";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "products/{id}/",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "products/"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "products/",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "products/{id}/",
        ),
    ];

    fn get_id(&self) -> Option<i64> {
        self.id
    }
}

//! Variant resource implementation.
//!
//! Variants only exist beneath their product:
//! - List: `products/{product_id}/variants/`
//! - Single record: `products/{product_id}/variants/{id}/`
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::RestResource;
//! use mixin_api::rest::resources::Variant;
//!
//! let variants = Variant::all_with_parent(&client, "product_id", 12, None).await?;
//! for variant in &variants.records {
//!     println!("{:?}", variant.attribute_values().collect::<Vec<_>>());
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// One attribute value of a variant, such as a colour or size.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Attribute {
    pub id: i64,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Variant {
    #[serde(skip_serializing)]
    pub id: Option<i64>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub compare_at_price: Option<i64>,
    #[serde(default)]
    pub show_price: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
}

impl Variant {
    /// Iterates over the attribute values in vendor order.
    pub fn attribute_values(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attribute| attribute.value.as_str())
    }
}

impl RestResource for Variant {
    const NAME: &'static str = "Variant";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["product_id", "id"],
            "products/{product_id}/variants/{id}/",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["product_id"],
            "products/{product_id}/variants/",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["product_id", "id"],
            "products/{product_id}/variants/{id}/",
        ),
    ];

    fn get_id(&self) -> Option<i64> {
        self.id
    }
}

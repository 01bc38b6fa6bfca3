//! Field exclusion for full-resource writes.
//!
//! The Mixin API has no partial-update verb: every `PUT` replaces the whole
//! record. To change only some fields, a caller names the field categories it
//! does not want touched, and the corresponding keys are removed from the
//! serialized payload just before it is sent.
//!
//! # Example
//!
//! ```rust
//! use mixin_api::rest::{FieldCategory, FieldMask};
//! use serde_json::json;
//!
//! let mask: FieldMask = [FieldCategory::ProductPrice].into_iter().collect();
//!
//! let mut body = json!({"name": "Shirt", "price": 100, "compare_at_price": 120, "stock": 4});
//! mask.apply(&mut body);
//!
//! assert_eq!(body, json!({"name": "Shirt", "stock": 4}));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::rest::ArgumentError;

/// A named cluster of outbound JSON keys that are suppressed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldCategory {
    /// Regular and compare-at price.
    ProductPrice,
    /// The discounted price only.
    ProductDiscount,
    /// Localized and English name.
    ProductName,
    /// Product identifier and parent link.
    Sku,
    /// Stock level and stock type.
    Stock,
    /// Variant attribute values.
    ProductAttributes,
    /// Description and analysis text.
    ProductDescription,
    /// Main and additional categories of a product.
    CategoryOfProduct,
    /// Draft flag and availability.
    DraftStatus,
    /// Category name.
    CategoryName,
}

impl FieldCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::ProductPrice,
        Self::ProductDiscount,
        Self::ProductName,
        Self::Sku,
        Self::Stock,
        Self::ProductAttributes,
        Self::ProductDescription,
        Self::CategoryOfProduct,
        Self::DraftStatus,
        Self::CategoryName,
    ];

    /// Returns the literal payload keys this category controls.
    #[must_use]
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Self::ProductPrice => &["price", "compare_at_price"],
            Self::ProductDiscount => &["price"],
            Self::ProductName => &["name", "english_name"],
            Self::Sku => &["product_identifier", "parent"],
            Self::Stock => &["stock", "stock_type"],
            Self::ProductAttributes => &["attributes"],
            Self::ProductDescription => &["description", "analysis"],
            Self::CategoryOfProduct => &["main_category", "other_categories"],
            Self::DraftStatus => &["draft", "available"],
            Self::CategoryName => &["name"],
        }
    }

    /// Returns the snake case name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductPrice => "product_price",
            Self::ProductDiscount => "product_discount",
            Self::ProductName => "product_name",
            Self::Sku => "sku",
            Self::Stock => "stock",
            Self::ProductAttributes => "product_attributes",
            Self::ProductDescription => "product_description",
            Self::CategoryOfProduct => "category_of_product",
            Self::DraftStatus => "draft_status",
            Self::CategoryName => "category_name",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldCategory {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ArgumentError::UnsupportedField {
                field: s.to_string(),
            })
    }
}

/// A set of field categories to strip from an outbound payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    categories: BTreeSet<FieldCategory>,
}

impl FieldMask {
    /// Creates an empty mask, which leaves payloads untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses category names into a mask.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::UnsupportedField`] for the first unknown name.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ArgumentError> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }

    /// Adds a category. Returns `true` if it was not already present.
    pub fn insert(&mut self, category: FieldCategory) -> bool {
        self.categories.insert(category)
    }

    /// Removes a category. Returns `true` if it was present.
    pub fn remove(&mut self, category: FieldCategory) -> bool {
        self.categories.remove(&category)
    }

    /// Returns `true` if the mask contains the category.
    #[must_use]
    pub fn contains(&self, category: FieldCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Returns `true` if the mask has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates over the categories in the mask.
    pub fn iter(&self) -> impl Iterator<Item = FieldCategory> + '_ {
        self.categories.iter().copied()
    }

    /// Returns the union of the keys named by every category in the mask.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&'static str> {
        self.iter().flat_map(FieldCategory::keys).copied().collect()
    }

    /// Removes every masked key from a JSON object.
    ///
    /// Absent keys are ignored, the order of the remaining keys is kept, and
    /// values that are not objects are left alone.
    pub fn apply(&self, payload: &mut Value) {
        if self.is_empty() {
            return;
        }
        if let Value::Object(map) = payload {
            let keys = self.keys();
            map.retain(|key, _| !keys.contains(key.as_str()));
        }
    }
}

impl FromIterator<FieldCategory> for FieldMask {
    fn from_iter<I: IntoIterator<Item = FieldCategory>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

impl Extend<FieldCategory> for FieldMask {
    fn extend<I: IntoIterator<Item = FieldCategory>>(&mut self, iter: I) {
        self.categories.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_payload() -> Value {
        json!({
            "name": "Shirt",
            "english_name": "Shirt",
            "main_category": 3,
            "price": 100,
            "compare_at_price": 120,
            "stock_type": "limited",
            "stock": 4.0,
            "available": true,
            "draft": false,
            "description": null
        })
    }

    #[test]
    fn test_every_category_maps_to_at_least_one_key() {
        for category in FieldCategory::ALL {
            assert!(!category.keys().is_empty(), "{category} has no keys");
        }
    }

    #[test]
    fn test_category_names_parse_back() {
        for category in FieldCategory::ALL {
            assert_eq!(category.as_str().parse::<FieldCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_fails_fast() {
        assert_eq!(
            "colour".parse::<FieldCategory>(),
            Err(ArgumentError::UnsupportedField {
                field: "colour".to_string()
            })
        );
        assert!(FieldMask::parse(&["stock", "weight"]).is_err());
        assert!(FieldMask::parse(&["stock", "product_name"]).is_ok());
    }

    #[test]
    fn test_apply_removes_only_masked_keys_and_keeps_order() {
        let mask: FieldMask = [FieldCategory::Stock, FieldCategory::DraftStatus]
            .into_iter()
            .collect();
        let mut payload = product_payload();
        mask.apply(&mut payload);

        let keys: Vec<&str> = payload
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "name",
                "english_name",
                "main_category",
                "price",
                "compare_at_price",
                "description"
            ]
        );
    }

    #[test]
    fn test_apply_ignores_absent_keys() {
        let mask: FieldMask = [FieldCategory::Sku, FieldCategory::ProductDescription]
            .into_iter()
            .collect();
        let mut payload = json!({"name": "Shoes"});
        mask.apply(&mut payload);
        assert_eq!(payload, json!({"name": "Shoes"}));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mask: FieldMask = [FieldCategory::ProductPrice, FieldCategory::ProductName]
            .into_iter()
            .collect();
        let mut once = product_payload();
        mask.apply(&mut once);
        let mut twice = once.clone();
        mask.apply(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_mask_is_a_no_op() {
        let mut payload = product_payload();
        FieldMask::new().apply(&mut payload);
        assert_eq!(payload, product_payload());
    }

    #[test]
    fn test_apply_leaves_non_objects_alone() {
        let mask: FieldMask = [FieldCategory::ProductPrice].into_iter().collect();
        let mut payload = json!(["price"]);
        mask.apply(&mut payload);
        assert_eq!(payload, json!(["price"]));
    }

    #[test]
    fn test_insert_and_remove_report_membership_changes() {
        let mut mask = FieldMask::new();
        assert!(mask.insert(FieldCategory::ProductDiscount));
        assert!(!mask.insert(FieldCategory::ProductDiscount));
        assert!(mask.contains(FieldCategory::ProductDiscount));
        assert!(mask.remove(FieldCategory::ProductDiscount));
        assert!(!mask.remove(FieldCategory::ProductDiscount));
        assert!(mask.is_empty());
    }

    #[test]
    fn test_overlapping_categories_union_their_keys() {
        let mask: FieldMask = [FieldCategory::ProductName, FieldCategory::CategoryName]
            .into_iter()
            .collect();
        let keys: Vec<_> = mask.keys().into_iter().collect();
        assert_eq!(keys, ["english_name", "name"]);
    }
}

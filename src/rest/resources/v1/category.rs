//! Category resource implementation.

use serde::{Deserialize, Serialize};

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Category {
    #[serde(skip_serializing)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl Category {
    /// Creates an available category.
    #[must_use]
    pub fn new(name: impl Into<String>, parent: Option<i64>) -> Self {
        Self {
            id: None,
            name: name.into(),
            parent,
            available: true,
        }
    }

    /// Returns the parent id, treating the vendor's `0` as no parent.
    #[must_use]
    pub fn parent_id(&self) -> Option<i64> {
        self.parent.filter(|parent| *parent != 0)
    }
}

impl RestResource for Category {
    const NAME: &'static str = "Category";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "categories/{id}/",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &[],
            "categories/",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "categories/",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "categories/{id}/",
        ),
    ];

    fn get_id(&self) -> Option<i64> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_round_trips_vendor_shape() {
        let category: Category = serde_json::from_value(json!({
            "id": 4,
            "name": "Shoes",
            "parent": null,
            "available": true
        }))
        .unwrap();
        assert_eq!(category.id, Some(4));
        assert_eq!(category.parent_id(), None);

        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            json!({"name": "Shoes", "parent": null, "available": true})
        );
    }

    #[test]
    fn test_zero_parent_means_no_parent() {
        let category = Category::new("Boots", Some(0));
        assert_eq!(category.parent_id(), None);
        assert_eq!(Category::new("Boots", Some(4)).parent_id(), Some(4));
    }

    #[test]
    fn test_missing_available_defaults_to_true() {
        let category: Category = serde_json::from_value(json!({"id": 1, "name": "Hats"})).unwrap();
        assert!(category.available);
    }
}

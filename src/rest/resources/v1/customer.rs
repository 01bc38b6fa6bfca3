//! Customer resource implementation.
//!
//! Customers are read-only through the management API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::common::vendor_datetime;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Customer {
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub national_number: Option<i64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, with = "vendor_datetime::option")]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default, with = "vendor_datetime::option")]
    pub last_login: Option<DateTime<Utc>>,
}

impl Customer {
    /// Returns `"First Last"`, skipping whichever part is missing.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns `true` if either name part contains `term`.
    #[must_use]
    pub fn name_contains(&self, term: &str) -> bool {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .any(|part| part.contains(term))
    }
}

impl RestResource for Customer {
    const NAME: &'static str = "Customer";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "customers/{id}/",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "customers/"),
    ];

    fn get_id(&self) -> Option<i64> {
        self.id
    }
}

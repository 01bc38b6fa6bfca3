//! Order resource implementation.
//!
//! The list endpoint returns [`OrderSummary`] records; the single-record
//! endpoint returns the full [`OrderDetail`] with its line items and events.
//! Orders are read-only: the vendor offers no status update.
//!
//! # Status Mapping
//!
//! | Vendor string | [`OrderStatus`] |
//! |---------------|-----------------|
//! | `processing`  | `Pending`       |
//! | `shipping`    | `Processing`    |
//! | `finished`    | `Completed`     |
//! | `draft`       | `OnHold`        |
//! | `canceled`    | `Cancelled`     |
//! | anything else | `Other`         |
//!
//! `Other` is written back as `processing`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{CompositeId, ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::common::{string_or_number, vendor_datetime};

/// The host's view of an order's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    OnHold,
    Cancelled,
    /// Any vendor status without a host counterpart.
    Other,
}

impl OrderStatus {
    /// Every status, `Other` last.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::OnHold,
        Self::Cancelled,
        Self::Other,
    ];

    /// Maps a vendor status string, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixin_api::rest::resources::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::from_vendor("Shipping"), OrderStatus::Processing);
    /// assert_eq!(OrderStatus::from_vendor("returned"), OrderStatus::Other);
    /// ```
    #[must_use]
    pub fn from_vendor(status: &str) -> Self {
        let status = status.trim();
        [
            ("processing", Self::Pending),
            ("shipping", Self::Processing),
            ("finished", Self::Completed),
            ("draft", Self::OnHold),
            ("canceled", Self::Cancelled),
        ]
        .into_iter()
        .find(|(vendor, _)| vendor.eq_ignore_ascii_case(status))
        .map_or(Self::Other, |(_, mapped)| mapped)
    }

    /// Returns the vendor status string. `Other` has none and maps to `processing`.
    #[must_use]
    pub const fn as_vendor(self) -> &'static str {
        match self {
            Self::Pending | Self::Other => "processing",
            Self::Processing => "shipping",
            Self::Completed => "finished",
            Self::OnHold => "draft",
            Self::Cancelled => "canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::OnHold => "OnHold",
            Self::Cancelled => "Cancelled",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// How an order was paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Online,
    Cash,
    Card,
    /// A vendor method this crate does not know, kept verbatim.
    Other(String),
}

impl PaymentMethod {
    /// Maps a vendor payment string, ignoring ASCII case.
    #[must_use]
    pub fn from_vendor(method: &str) -> Self {
        match method.trim().to_ascii_lowercase().as_str() {
            "online" => Self::Online,
            "cash" => Self::Cash,
            "card" => Self::Card,
            _ => Self::Other(method.to_string()),
        }
    }

    /// Returns the vendor string. Unknown methods are written as `online`.
    #[must_use]
    pub const fn as_vendor(&self) -> &'static str {
        match self {
            Self::Online | Self::Other(_) => "online",
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }

    /// Returns the host's numeric id: 1, 2 and 3 for the known methods, 0 otherwise.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Online => 1,
            Self::Cash => 2,
            Self::Card => 3,
            Self::Other(_) => 0,
        }
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Online => "Online",
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Other(raw) => raw,
        }
    }

    /// Returns a short description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Other(raw) => raw.clone(),
            known => format!("{} Payment", known.title()),
        }
    }

    /// The methods the vendor supports.
    #[must_use]
    pub fn all() -> [Self; 3] {
        [Self::Online, Self::Cash, Self::Card]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(with = "vendor_datetime")]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub shipping_method_name: Option<String>,
    #[serde(default)]
    pub final_price: Option<f64>,
}

impl OrderSummary {
    /// Returns the mapped status.
    #[must_use]
    pub fn order_status(&self) -> OrderStatus {
        OrderStatus::from_vendor(&self.status)
    }
}

impl RestResource for OrderSummary {
    const NAME: &'static str = "Order";

    const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::All,
        &[],
        "orders/",
    )];

    fn get_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetail {
    pub id: i64,
    #[serde(with = "vendor_datetime")]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub customer_note: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub shipping_method_name: Option<String>,
    #[serde(default, with = "vendor_datetime::option")]
    pub shipping_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shipping_start_time: Option<String>,
    #[serde(default)]
    pub shipping_end_time: Option<String>,
    #[serde(default)]
    pub shipping_province: Option<String>,
    #[serde(default)]
    pub shipping_city: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub shipping_zip_code: Option<String>,
    #[serde(default)]
    pub shipping_first_name: Option<String>,
    #[serde(default)]
    pub shipping_last_name: Option<String>,
    #[serde(default)]
    pub shipping_phone_number: Option<String>,
    #[serde(default)]
    pub shipping_tracking_code: Option<String>,
    #[serde(default)]
    pub coupon_discount_amount: Option<f64>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub cart_price: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    #[serde(default)]
    pub shipping_price: Option<f64>,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub events: Vec<OrderEvent>,
}

impl OrderDetail {
    /// Returns the mapped status.
    #[must_use]
    pub fn order_status(&self) -> OrderStatus {
        OrderStatus::from_vendor(&self.status)
    }

    /// Returns the mapped payment method, `None` if the vendor sent none.
    #[must_use]
    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment_method.as_deref().map(PaymentMethod::from_vendor)
    }
}

impl RestResource for OrderDetail {
    const NAME: &'static str = "Order";

    const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Find,
        &["id"],
        "orders/{id}/",
    )];

    fn get_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

/// One purchased line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub compare_at_price: Option<i64>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: String,
    /// The product or variant bought, set when the order is assembled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_id: Option<CompositeId>,
}

impl OrderItem {
    /// Returns the unit price before discount.
    #[must_use]
    pub fn unit_price(&self) -> i64 {
        self.compare_at_price.unwrap_or(self.price)
    }

    /// Returns the per-unit discount.
    #[must_use]
    pub fn unit_discount(&self) -> i64 {
        self.unit_price() - self.price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(with = "vendor_datetime")]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
}

/// Query parameters for the order list.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct OrderListParams {
    /// Earliest creation day, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest creation day, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Vendor status strings, sent comma-joined.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<&'static str>,
}

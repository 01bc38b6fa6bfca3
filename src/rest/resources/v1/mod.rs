//! REST resources for the Mixin management API v1.
//!
//! # Available Resources
//!
//! ## Catalog
//!
//! - [`Product`] - A product, with its embedded variants
//! - [`ProductKind`] - Simple or variable product filter
//! - [`StockType`] - How a product's stock is tracked
//! - [`Variant`] - A product variant, nested under its product
//! - [`Attribute`] - One attribute value of a variant
//! - [`Category`] - A product category
//!
//! ## Customers
//!
//! - [`Customer`] - A registered customer (read-only)
//!
//! ## Orders
//!
//! - [`OrderSummary`] - An entry of the order list
//! - [`OrderDetail`] - A full order with line items and events
//! - [`OrderItem`] - One purchased line
//! - [`OrderEvent`] - A timeline entry of an order
//! - [`OrderStatus`] - Host order state, mapped from vendor strings
//! - [`PaymentMethod`] - Payment method, mapped from vendor strings
//! - [`OrderListParams`] - Date and status filters for the order list

mod category;
mod common;
mod customer;
mod order;
mod product;
mod variant;

pub use category::Category;
pub use common::parse_vendor_datetime;
pub use customer::Customer;
pub use order::{
    OrderDetail, OrderEvent, OrderItem, OrderListParams, OrderStatus, OrderSummary, PaymentMethod,
};
pub use product::{Product, ProductKind, StockType};
pub use variant::{Attribute, Variant};

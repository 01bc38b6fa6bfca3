//! Version-specific REST resource implementations.
//!
//! Resources are organized by management API version:
//!
//! ```text
//! resources/
//!   mod.rs           <- This file (re-exports the current version)
//!   v1/
//!     mod.rs         <- Version-specific resources
//! ```
//!
//! # Using Resources
//!
//! ```rust,ignore
//! use mixin_api::rest::resources::Product;  // Uses the current version
//!
//! // Or explicitly specify a version:
//! use mixin_api::rest::resources::v1::Product;
//! ```
//!
//! ## Products and Variants
//!
//! ```rust,ignore
//! use mixin_api::rest::resources::{Product, Variant};
//! use mixin_api::rest::RestResource;
//!
//! let product = Product::find(&client, 12).await?;
//! let variants = Variant::all_with_parent(&client, "product_id", 12, None).await?;
//! ```
//!
//! ## Orders
//!
//! ```rust,ignore
//! use mixin_api::rest::resources::{OrderDetail, OrderStatus};
//! use mixin_api::rest::RestResource;
//!
//! let order = OrderDetail::find(&client, 501).await?;
//! assert_eq!(order.order_status(), OrderStatus::Processing);
//! ```

pub mod v1;

pub use v1::*;

//! REST resource infrastructure and the adapter's core algorithms.
//!
//! This module provides:
//!
//! - **[`RestResource`] trait**: find, list, create and update for Mixin records
//! - **[`CompositeId`]**: product/variant pairs folded into one host-facing id
//! - **[`FieldMask`]**: key exclusion that makes whole-record writes safe
//! - **[`fetch_all`]**: exhaustive page-numbered collection fetching
//! - **[`VariantResolver`]**: variant inference for order lines
//! - **[`OrderAssembler`]**: order lines tagged with composite ids
//! - **[`ResourceError`]**: the error taxonomy for vendor operations
//!
//! # Overview
//!
//! Data flows from the vendor through [`fetch_all`] (collections) or
//! [`RestResource::find`] (single records). Catalog records cross into the
//! host wrapped in [`Encoded`], and order lines pass through
//! [`OrderAssembler`]. Writes take the opposite path: the record is
//! serialized in full, the [`FieldMask`] strips the fields the caller wants
//! left alone, and the remainder is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{FieldCategory, FieldMask, RestResource};
//! use mixin_api::rest::resources::Product;
//!
//! let collected = Product::all(&client, None, None).await?;
//! if !collected.is_complete() {
//!     println!("stopped early: {:?}", collected.end);
//! }
//!
//! // Change only the stock of product 12
//! let mut product = Product::find(&client, 12).await?;
//! product.stock = 8.0;
//! let mask: FieldMask = [FieldCategory::ProductPrice, FieldCategory::ProductName]
//!     .into_iter()
//!     .collect();
//! product.update(&client, &[("id", 12)], &mask).await?;
//! ```
//!
//! # Key Types
//!
//! - [`ResourceError`], [`ArgumentError`], [`RejectionReason`]: errors
//! - [`ResourcePath`] and [`ResourceOperation`]: path building infrastructure
//! - [`PageCursor`], [`PageExecutor`], [`Collected`]: pagination
//! - [`resources`]: version-specific records (Product, OrderDetail, ...)

mod errors;
mod field_mask;
mod id_codec;
mod order_assembler;
mod pagination;
mod path;
mod resource;
mod response;
mod variant_resolver;

pub mod resources;

pub use errors::{ArgumentError, RejectionReason, ResourceError};
pub use field_mask::{FieldCategory, FieldMask};
pub use id_codec::{decode, encode, CompositeId};
pub use order_assembler::{AssembledOrder, OrderAssembler, ProductUrl};
pub use pagination::{
    fetch_all, Collected, PageCursor, PageEnvelope, PageExecutor, PageResponse,
    RestPageExecutor, StreamEnd, MAX_PAGE_SIZE,
};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::RestResource;
pub(crate) use resource::serialize_to_query;
pub use response::Encoded;
pub use variant_resolver::{
    match_variant, parse_variant_tokens, CatalogVariantResolver, VariantResolution,
    VariantResolver, VARIANT_SEPARATOR,
};

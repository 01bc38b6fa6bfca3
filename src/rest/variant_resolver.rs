//! Recovering the purchased variant of an order line.
//!
//! Order lines do not reliably carry a variant id. The storefront does,
//! however, append the chosen attribute values to the line's display name:
//!
//! ```text
//! Shirt - Blue / 30
//! ```
//!
//! [`CatalogVariantResolver`] splits that suffix into tokens, lists the
//! product's variants and returns the first variant whose attribute values
//! contain every token. Matching is plain string comparison, so values in
//! any script work as long as they are spelled the same way.
//!
//! A failed lookup is never an error. [`VariantResolution::Unresolved`] sends
//! the caller back to its fallback (the URL's variant id, or the bare
//! product), which keeps false positives out at the cost of false negatives.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_api::rest::{CatalogVariantResolver, VariantResolution, VariantResolver};
//!
//! let resolver = CatalogVariantResolver::new(&client);
//! match resolver.resolve("Shirt - Blue / 30", 12).await {
//!     VariantResolution::Resolved(variant_id) => println!("variant {variant_id}"),
//!     VariantResolution::Unresolved => println!("no variant"),
//! }
//! ```

use std::collections::HashSet;

use crate::clients::RestClient;
use crate::rest::resources::Variant;
use crate::rest::RestResource;

/// Separates the product name from the attribute values in a line name.
pub const VARIANT_SEPARATOR: &str = " - ";

/// Outcome of a variant lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantResolution {
    /// The line matched this vendor variant id.
    Resolved(i64),
    /// No variant could be inferred.
    Unresolved,
}

impl VariantResolution {
    /// Returns the resolved variant id, if any.
    #[must_use]
    pub const fn variant_id(self) -> Option<i64> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::Unresolved => None,
        }
    }
}

impl From<Option<i64>> for VariantResolution {
    fn from(id: Option<i64>) -> Self {
        id.map_or(Self::Unresolved, Self::Resolved)
    }
}

/// Infers which variant an order line refers to.
#[allow(async_fn_in_trait)]
pub trait VariantResolver {
    /// Resolves the variant named by `item_name` among the variants of `product_id`.
    async fn resolve(&self, item_name: &str, product_id: i64) -> VariantResolution;
}

/// Extracts the attribute tokens from an order line name.
///
/// Returns `None` when the name has no [`VARIANT_SEPARATOR`] or nothing
/// but whitespace after it. Only the segment between the first and a
/// possible second separator is read.
///
/// # Example
///
/// ```rust
/// use mixin_api::rest::parse_variant_tokens;
///
/// assert_eq!(parse_variant_tokens("Shirt - Blue / 30"), Some(vec!["Blue", "30"]));
/// assert_eq!(parse_variant_tokens("Shirt"), None);
/// ```
#[must_use]
pub fn parse_variant_tokens(item_name: &str) -> Option<Vec<&str>> {
    let suffix = item_name.split(VARIANT_SEPARATOR).nth(1)?;

    let tokens: Vec<&str> = suffix
        .split('/')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    (!tokens.is_empty()).then_some(tokens)
}

/// Returns the id of the first variant whose attribute values contain every token.
///
/// Variants without an id are skipped.
#[must_use]
pub fn match_variant(tokens: &[&str], variants: &[Variant]) -> Option<i64> {
    variants
        .iter()
        .filter(|variant| {
            let values: HashSet<&str> = variant.attribute_values().collect();
            tokens.iter().all(|token| values.contains(token))
        })
        .find_map(|variant| variant.id)
}

/// Resolver backed by the product's variant list.
#[derive(Debug, Clone, Copy)]
pub struct CatalogVariantResolver<'a> {
    client: &'a RestClient,
}

impl<'a> CatalogVariantResolver<'a> {
    /// Creates a resolver that lists variants through `client`.
    #[must_use]
    pub const fn new(client: &'a RestClient) -> Self {
        Self { client }
    }
}

impl VariantResolver for CatalogVariantResolver<'_> {
    async fn resolve(&self, item_name: &str, product_id: i64) -> VariantResolution {
        let Some(tokens) = parse_variant_tokens(item_name) else {
            tracing::debug!(product_id, item_name, "Line name carries no variant suffix");
            return VariantResolution::Unresolved;
        };

        let variants =
            match Variant::all_with_parent(self.client, "product_id", product_id, None).await {
                Ok(collected) => collected.records,
                Err(error) => {
                    tracing::debug!(product_id, %error, "Could not list variants");
                    return VariantResolution::Unresolved;
                }
            };

        let resolution = VariantResolution::from(match_variant(&tokens, &variants));
        tracing::debug!(
            product_id,
            item_name,
            candidates = variants.len(),
            ?resolution,
            "Resolved order line variant"
        );
        resolution
    }
}

//! Composite identifiers for products and variants.
//!
//! The host platform sees a single integer for every catalog record. A
//! product and one of its variants are folded into that integer with the
//! Cantor pairing function:
//!
//! ```text
//! code = (outer + inner)(outer + inner + 1) / 2 + inner
//! ```
//!
//! An inner id of `0` denotes the bare product.
//!
//! # Example
//!
//! ```rust
//! use mixin_api::rest::CompositeId;
//!
//! let id = CompositeId::encode(5, 3).unwrap();
//! assert_eq!(id.get(), 39);
//! assert_eq!(id.decode(), (5, 3));
//!
//! let bare = CompositeId::encode(5, 0).unwrap();
//! assert_eq!(bare.decode(), (5, 0));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rest::ArgumentError;

/// A product/variant pair folded into one host-facing integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeId(i64);

impl CompositeId {
    /// Wraps an existing composite code received from the host.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NegativeCompositeId`] if `code` is negative.
    pub const fn new(code: i64) -> Result<Self, ArgumentError> {
        if code < 0 {
            return Err(ArgumentError::NegativeCompositeId { code });
        }
        Ok(Self(code))
    }

    /// Folds `(outer, inner)` into a composite identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NegativeComponent`] if either component is
    /// negative, or [`ArgumentError::Overflow`] if the code exceeds `i64`.
    pub fn encode(outer: i64, inner: i64) -> Result<Self, ArgumentError> {
        if outer < 0 || inner < 0 {
            return Err(ArgumentError::NegativeComponent { outer, inner });
        }

        let sum = i128::from(outer) + i128::from(inner);
        let code = sum * (sum + 1) / 2 + i128::from(inner);

        i64::try_from(code)
            .map(Self)
            .map_err(|_| ArgumentError::Overflow { outer, inner })
    }

    /// Splits the identifier back into `(outer, inner)`.
    #[must_use]
    pub fn decode(self) -> (i64, i64) {
        let code = i128::from(self.0);
        let w = diagonal(code);
        let inner = code - triangular(w);
        let outer = w - inner;

        // Both components are bounded by the diagonal, which is below the code
        #[allow(clippy::cast_possible_truncation)]
        (outer as i64, inner as i64)
    }

    /// Returns the raw integer code.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the outer (product) component.
    #[must_use]
    pub fn outer(self) -> i64 {
        self.decode().0
    }

    /// Returns the inner (variant) component, `0` for a bare product.
    #[must_use]
    pub fn inner(self) -> i64 {
        self.decode().1
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CompositeId> for i64 {
    fn from(id: CompositeId) -> Self {
        id.0
    }
}

/// Folds `(outer, inner)` into a raw composite code.
///
/// # Errors
///
/// See [`CompositeId::encode`].
pub fn encode(outer: i64, inner: i64) -> Result<i64, ArgumentError> {
    CompositeId::encode(outer, inner).map(CompositeId::get)
}

/// Splits a raw composite code into `(outer, inner)`.
///
/// # Errors
///
/// Returns [`ArgumentError::NegativeCompositeId`] if `code` is negative.
pub fn decode(code: i64) -> Result<(i64, i64), ArgumentError> {
    CompositeId::new(code).map(CompositeId::decode)
}

const fn triangular(w: i128) -> i128 {
    w * (w + 1) / 2
}

/// Largest `w` with `triangular(w) <= code`.
fn diagonal(code: i128) -> i128 {
    // The float root is only an estimate near 2^63; the loops settle it exactly
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let mut w = (((8.0 * code as f64 + 1.0).sqrt() - 1.0) / 2.0).floor() as i128;

    while w > 0 && triangular(w) > code {
        w -= 1;
    }
    while triangular(w + 1) <= code {
        w += 1;
    }
    w
}

//! Host-facing wrapper for vendor records.
//!
//! The host never sees a raw Mixin id. Every product or variant handed across
//! the boundary is wrapped in [`Encoded<T>`], which pairs the record with its
//! [`CompositeId`].
//!
//! # Deref Pattern
//!
//! `Encoded<T>` implements `Deref<Target = T>`, so the record's fields and
//! methods are reachable directly:
//!
//! ```rust
//! use mixin_api::rest::{CompositeId, Encoded};
//!
//! let id = CompositeId::encode(5, 3).unwrap();
//! let encoded = Encoded::new(id, String::from("Blue / 30"));
//!
//! assert_eq!(encoded.len(), 9);
//! assert_eq!(encoded.id().get(), 39);
//! ```

use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::rest::CompositeId;

/// A vendor record paired with the composite id exposed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoded<T> {
    id: CompositeId,
    #[serde(flatten)]
    record: T,
}

impl<T> Encoded<T> {
    /// Pairs a record with its composite id.
    #[must_use]
    pub const fn new(id: CompositeId, record: T) -> Self {
        Self { id, record }
    }

    /// Returns the composite id.
    #[must_use]
    pub const fn id(&self) -> CompositeId {
        self.id
    }

    /// Returns a reference to the record.
    #[must_use]
    pub const fn record(&self) -> &T {
        &self.record
    }

    /// Consumes the wrapper and returns the record.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.record
    }

    /// Consumes the wrapper and returns both parts.
    #[must_use]
    pub fn into_parts(self) -> (CompositeId, T) {
        (self.id, self.record)
    }

    /// Maps the record to a new type, keeping the id.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Encoded<U>
    where
        F: FnOnce(T) -> U,
    {
        Encoded {
            id: self.id,
            record: f(self.record),
        }
    }
}

impl<T> Deref for Encoded<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

impl<T> DerefMut for Encoded<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.record
    }
}

//! # Content Identifier
//!
//! Records are content-addressed: the identifier of a value is its SHA-256
//! digest. There is no counter and no state.

use crate::properties::sha256_hex;
use crate::types::{Properties, RecordId};

impl RecordId {
    /// Identifier for `value`. Identical values always map to the same id.
    #[must_use]
    pub fn for_value(value: &str) -> Self {
        Self::from_digest(sha256_hex(value))
    }

    /// Reuse the digest already computed as the `hash` property.
    #[must_use]
    pub fn from_properties(properties: &Properties) -> Self {
        Self::from_digest(properties.hash.clone())
    }
}

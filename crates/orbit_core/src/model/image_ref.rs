//! Image reference model.
//!
//! # Invariants
//! - At most one live `uri` exists per `owner_id`; last write wins.
//! - `updated_at_ms` is `None` only for entries migrated from the legacy
//!   flat mapping, which carried no recency metadata.

use serde::{Deserialize, Serialize};

/// Picked image URI associated with one connection/contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Stable connection/contact ID.
    pub owner_id: String,
    /// Opaque URI returned by the platform image picker.
    pub uri: String,
    /// Unix epoch milliseconds of the last write, when known.
    pub updated_at_ms: Option<i64>,
}

impl ImageRef {
    pub fn new(owner_id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            uri: uri.into(),
            updated_at_ms: None,
        }
    }
}

//! Shared response shapes for merchants and their catalog.
//!
//! Catalog types are request-scoped: they are built from upstream payloads,
//! serialized once, and dropped. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// A merchant known to the local directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub db_id: i64,
    pub external_merchant_id: String,
    pub name: String,
}

/// A sellable unit inside a category: either a bare item or one of its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: String,
    pub name: String,
    /// Major currency units (cents / 100).
    pub price: f64,
}

/// A category with every variation linked to it, in upstream item order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub variations: Vec<Variation>,
}

impl Category {
    #[must_use]
    pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variations: Vec::new(),
        }
    }
}

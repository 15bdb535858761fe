//! Transaction record shown in the home screen list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single transaction as delivered by the backend.
///
/// Fields the cache does not know about are kept in `extra` so that a
/// save/load cycle returns the record unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    /// Signed amount in minor currency units
    #[serde(default)]
    pub amount_cents: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// RFC 3339 date of the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Creates a transaction with only an id and an amount.
    pub fn new(id: u64, amount_cents: i64) -> Self {
        Self {
            id,
            amount_cents,
            ..Self::default()
        }
    }
}

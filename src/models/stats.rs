//! Aggregate statistics shown at the top of the home screen.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Home screen aggregates. Amounts are in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeStats {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub income: i64,
    #[serde(default)]
    pub expenses: i64,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HomeStats {
    pub fn with_total(total: i64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }
}

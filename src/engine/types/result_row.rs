use serde::{Deserialize, Serialize};

use crate::engine::types::group_id::GroupId;

/// One aggregated tuple returned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub group_id: Option<GroupId>,
    pub lookup_value: String,
    pub total: u64,
}

impl ResultRow {
    pub fn new(lookup_value: &str, total: u64) -> Self {
        Self {
            group_id: None,
            lookup_value: lookup_value.to_string(),
            total,
        }
    }

    pub fn grouped(group_id: GroupId, lookup_value: &str, total: u64) -> Self {
        Self {
            group_id: Some(group_id),
            lookup_value: lookup_value.to_string(),
            total,
        }
    }
}

use serde_json::{Map, Value, json};

use crate::engine::store::Record;
use crate::engine::types::CellValue;

pub struct RecordFactory {
    params: Map<String, Value>,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self { params: Map::new() }
    }

    /// Incident owned by `alice` in group `unicef`, dated 2021-03-10.
    pub fn incident(id: i64) -> Self {
        Self::new()
            .with("id", id)
            .with("incident_date", "2021-03-10")
            .with("date_of_first_report", "2021-03-12")
            .with("owned_by", "alice")
            .with("associated_user_groups", json!(["unicef"]))
            .with("module_id", "primeromodule-mrm")
    }

    pub fn violation(id: i64, incident_id: i64) -> Self {
        Self::new()
            .with("id", id)
            .with("incident_id", incident_id)
            .with("type", "killing")
            .with("ctfmr_verified", false)
    }

    pub fn victim(id: i64, violation_id: i64) -> Self {
        Self::new()
            .with("id", id)
            .with("violation_id", violation_id)
            .with("individual_sex", "female")
            .with("individual_age", 10)
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.params.remove(key);
        self
    }

    pub fn create(self) -> Record {
        self.params
            .into_iter()
            .map(|(k, v)| (k, CellValue::from(v)))
            .collect()
    }
}

use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::errors::DatasetError;
use crate::engine::types::CellValue;

/// One stored record: column name to value. Missing columns read as null.
pub type Record = BTreeMap<String, CellValue>;

/// Named tables of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    tables: HashMap<String, Vec<Record>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: &str, record: Record) {
        self.tables.entry(table.to_string()).or_default().push(record);
    }

    /// Registers an empty table so queries against it return no rows rather than failing.
    pub fn ensure_table(&mut self, table: &str) {
        self.tables.entry(table.to_string()).or_default();
    }

    pub fn table(&self, name: &str) -> Option<&[Record]> {
        self.tables.get(name).map(Vec::as_slice)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }

    /// Parses `{"incidents": [{...}], "violations": [...]}`.
    pub fn from_json(value: &JsonValue) -> Result<Self, DatasetError> {
        let JsonValue::Object(tables) = value else {
            return Err(DatasetError::InvalidShape(
                "dataset must be an object of tables".to_string(),
            ));
        };
        let mut dataset = Dataset::new();
        for (name, rows) in tables {
            let JsonValue::Array(rows) = rows else {
                return Err(DatasetError::InvalidShape(format!(
                    "table '{name}' must be an array of records"
                )));
            };
            dataset.ensure_table(name);
            for row in rows {
                let JsonValue::Object(fields) = row else {
                    return Err(DatasetError::InvalidShape(format!(
                        "table '{name}' contains a non-object record"
                    )));
                };
                let record: Record = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), CellValue::from(v.clone())))
                    .collect();
                dataset.insert(name, record);
            }
        }
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path)?;
        let json: JsonValue = serde_json::from_str(&raw)?;
        let dataset = Self::from_json(&json)?;
        info!(
            target: "indicator_engine::store",
            path = %path.display(),
            tables = dataset.tables.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

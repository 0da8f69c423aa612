use serde::Serialize;

use crate::engine::types::{GroupId, ResultRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub label: String,
    pub group_id: Option<GroupId>,
}

/// Spanning header above sub-period columns, e.g. `2021` over `2021-Q1..Q4`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub label: String,
    pub colspan: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Raw lookup value the row was built from.
    pub key: String,
    pub label: String,
    /// One cell per table column, zero-filled.
    pub values: Vec<u64>,
    pub colspan: usize,
}

/// Presentation-ready indicator result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTable {
    pub lookup_key: String,
    pub headers: Vec<HeaderCell>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl GroupedTable {
    pub fn empty(lookup_key: &str) -> Self {
        Self {
            lookup_key: lookup_key.to_string(),
            headers: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns_number(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, key: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Flattens the table back into result tuples, skipping zero-filled cells.
    pub fn to_result_rows(&self) -> Vec<ResultRow> {
        let mut out = Vec::new();
        for row in &self.rows {
            for (column, total) in self.columns.iter().zip(&row.values) {
                if *total == 0 {
                    continue;
                }
                out.push(ResultRow {
                    group_id: column.group_id,
                    lookup_value: row.key.clone(),
                    total: *total,
                });
            }
        }
        out
    }
}

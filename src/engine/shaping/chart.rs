use serde::Serialize;

use crate::engine::shaping::grouped_table::GroupedTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
}

/// Series view of a table: one dataset per column, one point per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn from_table(table: &GroupedTable) -> Self {
        let labels = table.rows.iter().map(|r| r.label.clone()).collect();
        let datasets = table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| ChartDataset {
                label: column.label.clone(),
                data: table
                    .rows
                    .iter()
                    .map(|r| r.values.get(idx).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();
        Self { labels, datasets }
    }
}

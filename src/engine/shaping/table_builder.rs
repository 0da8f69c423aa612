use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::engine::lookup::LookupResolver;
use crate::engine::shaping::grouped_table::{GroupedTable, HeaderCell, TableColumn, TableRow};
use crate::engine::shaping::ordering::RowOrder;
use crate::engine::types::{GroupId, ResultRow};
use crate::shared::config::ReportConfig;

pub const TOTAL_COLUMN: &str = "total";

/// Pivots `(group_id, lookup_value, total)` tuples into a zero-filled table.
pub struct TableBuilder<'a> {
    lookup_key: String,
    resolver: &'a dyn LookupResolver,
    grouped: bool,
    age_lookup_key: String,
}

impl<'a> TableBuilder<'a> {
    pub fn new(lookup_key: &str, resolver: &'a dyn LookupResolver) -> Self {
        Self {
            lookup_key: lookup_key.to_string(),
            resolver,
            grouped: false,
            age_lookup_key: ReportConfig::default().age_lookup_key,
        }
    }

    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    pub fn age_lookup_key(mut self, key: &str) -> Self {
        self.age_lookup_key = key.to_string();
        self
    }

    pub fn build(&self, rows: &[ResultRow]) -> GroupedTable {
        if rows.is_empty() {
            return GroupedTable::empty(&self.lookup_key);
        }

        let columns = if self.grouped {
            self.group_columns(rows)
        } else {
            vec![TableColumn {
                label: TOTAL_COLUMN.to_string(),
                group_id: None,
            }]
        };
        let positions: BTreeMap<Option<GroupId>, usize> = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.group_id, idx))
            .collect();

        // Sum per (lookup value, column); insertion order is irrelevant after sorting.
        let mut cells: IndexMap<&str, Vec<u64>> = IndexMap::new();
        for row in rows {
            let column = if self.grouped { row.group_id } else { None };
            let Some(&idx) = positions.get(&column) else {
                continue;
            };
            let values = cells
                .entry(row.lookup_value.as_str())
                .or_insert_with(|| vec![0; columns.len()]);
            values[idx] += row.total;
        }

        let mut table_rows: Vec<TableRow> = cells
            .into_iter()
            .map(|(key, values)| TableRow {
                key: key.to_string(),
                label: self.resolver.resolve(&self.lookup_key, key),
                values,
                colspan: 0,
            })
            .collect();
        RowOrder::for_lookup_key(&self.lookup_key, &self.age_lookup_key).sort(&mut table_rows);

        debug!(
            target: "indicator_engine::shaping",
            lookup_key = %self.lookup_key,
            rows = table_rows.len(),
            columns = columns.len(),
            "Shaped indicator table"
        );

        GroupedTable {
            lookup_key: self.lookup_key.clone(),
            headers: headers(&columns),
            columns,
            rows: table_rows,
        }
    }

    fn group_columns(&self, rows: &[ResultRow]) -> Vec<TableColumn> {
        let groups: BTreeSet<Option<GroupId>> = rows.iter().map(|r| r.group_id).collect();
        groups
            .into_iter()
            .map(|group_id| TableColumn {
                label: group_id.map(|g| g.label()).unwrap_or_else(|| TOTAL_COLUMN.to_string()),
                group_id,
            })
            .collect()
    }
}

/// One spanning header per year when columns carry quarters or months.
fn headers(columns: &[TableColumn]) -> Vec<HeaderCell> {
    let has_parts = columns
        .iter()
        .any(|c| c.group_id.is_some_and(|g| g.part.is_some()));
    if !has_parts {
        return Vec::new();
    }

    let mut headers: Vec<HeaderCell> = Vec::new();
    for column in columns {
        let label = column
            .group_id
            .map(|g| g.year.to_string())
            .unwrap_or_else(|| column.label.clone());
        match headers.last_mut() {
            Some(last) if last.label == label => last.colspan += 1,
            _ => headers.push(HeaderCell { label, colspan: 1 }),
        }
    }
    headers
}

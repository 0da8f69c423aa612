use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use crate::engine::errors::QueryExecutionError;
use crate::engine::filter::FieldAccessor;
use crate::engine::indicator::AggregateQuery;
use crate::engine::store::dataset::{Dataset, Record};
use crate::engine::store::executor::StoreExecutor;
use crate::engine::types::{CellValue, ColumnRef, GroupId, ResultRow};

/// A joined record: one source record per table alias.
struct JoinedRow<'a> {
    parts: Vec<(&'a str, &'a Record)>,
}

impl<'a> JoinedRow<'a> {
    fn extend(&self, alias: &'a str, record: &'a Record) -> Self {
        let mut parts = self.parts.clone();
        parts.push((alias, record));
        Self { parts }
    }
}

impl FieldAccessor for JoinedRow<'_> {
    fn get(&self, column: &ColumnRef) -> Option<&CellValue> {
        self.parts
            .iter()
            .find(|(alias, _)| *alias == column.alias)
            .and_then(|(_, record)| record.get(&column.column))
    }
}

/// Executes indicator queries directly against an in-memory `Dataset`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    dataset: Dataset,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    fn table(&self, name: &str) -> Result<&[Record], QueryExecutionError> {
        self.dataset
            .table(name)
            .ok_or_else(|| QueryExecutionError::UnknownTable(name.to_string()))
    }

    fn check_aliases(query: &AggregateQuery) -> Result<(), QueryExecutionError> {
        let known: HashSet<&str> = query.source.aliases().collect();
        let mut columns = query.dimension.columns();
        if let Some(predicate) = &query.predicate {
            columns.extend(predicate.columns());
        }
        if let Some(grouping) = &query.grouping {
            columns.push(&grouping.column);
        }
        for join in &query.source.joins {
            columns.push(&join.left);
        }
        match columns.into_iter().find(|c| !known.contains(c.alias.as_str())) {
            Some(column) => Err(QueryExecutionError::UnknownAlias(column.alias.clone())),
            None => Ok(()),
        }
    }

    fn joined_rows<'a>(
        &'a self,
        query: &'a AggregateQuery,
    ) -> Result<Vec<JoinedRow<'a>>, QueryExecutionError> {
        let source = &query.source;
        let mut rows: Vec<JoinedRow<'a>> = self
            .table(&source.table)?
            .iter()
            .map(|record| JoinedRow {
                parts: vec![(source.alias.as_str(), record)],
            })
            .collect();

        for join in &source.joins {
            let mut index: HashMap<String, Vec<&'a Record>> = HashMap::new();
            for record in self.table(&join.table)? {
                if let Some(key) = record.get(&join.column).filter(|v| !v.is_null()) {
                    index.entry(key.to_string_repr()).or_default().push(record);
                }
            }
            rows = rows
                .iter()
                .flat_map(|row| {
                    let matches = row
                        .get(&join.left)
                        .filter(|v| !v.is_null())
                        .and_then(|key| index.get(&key.to_string_repr()));
                    matches
                        .into_iter()
                        .flatten()
                        .map(|record| row.extend(join.alias.as_str(), *record))
                        .collect::<Vec<_>>()
                })
                .collect();
        }
        Ok(rows)
    }
}

impl StoreExecutor for InMemoryStore {
    fn execute(&self, query: &AggregateQuery) -> Result<Vec<ResultRow>, QueryExecutionError> {
        Self::check_aliases(query)?;
        let rows = self.joined_rows(query)?;
        let scanned = rows.len();

        let mut counts: BTreeMap<(Option<GroupId>, String), u64> = BTreeMap::new();
        for row in rows.iter() {
            if let Some(predicate) = &query.predicate {
                if !predicate.evaluate(row) {
                    continue;
                }
            }
            let group_id = match &query.grouping {
                Some(grouping) => match row.get(&grouping.column).and_then(|v| v.as_date()) {
                    Some(date) => Some(GroupId::from_date(date, grouping.period)),
                    None => continue,
                },
                None => None,
            };
            let lookup_value =
                query
                    .dimension
                    .lookup_value(row, query.as_of, &query.incomplete_data_key);
            *counts.entry((group_id, lookup_value)).or_insert(0) += 1;
        }

        debug!(
            target: "indicator_engine::executor",
            indicator = %query.indicator,
            scanned,
            "In-memory scan complete"
        );

        let results: Vec<ResultRow> = counts
            .into_iter()
            .map(|((group_id, lookup_value), total)| ResultRow {
                group_id,
                lookup_value,
                total,
            })
            .collect();

        info!(
            target: "indicator_engine::executor",
            indicator = %query.indicator,
            rows = results.len(),
            "Indicator query executed"
        );
        Ok(results)
    }
}

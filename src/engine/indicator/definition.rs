use serde::Serialize;

use crate::engine::filter::{FilterBinding, StaticPredicate};
use crate::engine::indicator::dimension::Dimension;
use crate::engine::types::ColumnRef;

/// Inner join of `table AS alias` on `alias.column = left`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub column: String,
    pub left: ColumnRef,
}

/// The record set an indicator counts: a base table plus inner joins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSource {
    pub table: String,
    pub alias: String,
    pub joins: Vec<Join>,
}

impl RecordSource {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            alias: table.to_string(),
            joins: Vec::new(),
        }
    }

    /// Joins `table` (aliased by its own name) where `table.column = left`.
    pub fn join(mut self, table: &str, column: &str, left: ColumnRef) -> Self {
        self.joins.push(Join {
            table: table.to_string(),
            alias: table.to_string(),
            column: column.to_string(),
            left,
        });
        self
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.alias.as_str()).chain(self.joins.iter().map(|j| j.alias.as_str()))
    }
}

/// A named report metric: which records, which filters, which classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorDefinition {
    pub name: String,
    pub lookup_key: String,
    pub source: RecordSource,
    /// Alias whose ownership columns the access scope is applied to.
    pub scope_alias: String,
    /// Date of record, used for year/quarter/month grouping.
    pub date_column: ColumnRef,
    pub filters: Vec<FilterBinding>,
    pub static_predicates: Vec<StaticPredicate>,
    pub dimension: Dimension,
}

impl IndicatorDefinition {
    pub fn new(
        name: &str,
        lookup_key: &str,
        source: RecordSource,
        scope_alias: &str,
        date_column: ColumnRef,
        dimension: Dimension,
    ) -> Self {
        Self {
            name: name.to_string(),
            lookup_key: lookup_key.to_string(),
            source,
            scope_alias: scope_alias.to_string(),
            date_column,
            filters: Vec::new(),
            static_predicates: Vec::new(),
            dimension,
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterBinding>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_static(mut self, predicate: StaticPredicate) -> Self {
        self.static_predicates.push(predicate);
        self
    }

    pub fn binding(&self, filter: &str) -> Option<&FilterBinding> {
        self.filters.iter().find(|b| b.name == filter)
    }
}

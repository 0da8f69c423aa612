use std::error::Error;
use tracing::{debug, info};

use crate::engine::errors::QueryExecutionError;
use crate::engine::indicator::{AggregateQuery, GroupingPeriod};
use crate::engine::render::SqlRenderer;
use crate::engine::store::executor::StoreExecutor;
use crate::engine::types::{CellValue, GroupId, ResultRow};

/// Minimal relational driver surface: run parameterized SQL, return positional rows.
pub trait SqlConnection: Send + Sync {
    fn query(
        &self,
        sql: &str,
        params: &[CellValue],
    ) -> Result<Vec<Vec<CellValue>>, Box<dyn Error + Send + Sync>>;
}

/// Executes indicator queries on a relational store through `SqlRenderer`.
pub struct SqlStoreExecutor<C> {
    connection: C,
}

impl<C: SqlConnection> SqlStoreExecutor<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    fn decode(query: &AggregateQuery, row: &[CellValue]) -> Result<ResultRow, QueryExecutionError> {
        let period = query.grouping.as_ref().map(|g| g.period);
        let expected = match period {
            None => 2,
            Some(GroupingPeriod::Year) => 3,
            Some(_) => 4,
        };
        if row.len() != expected {
            return Err(QueryExecutionError::Decode(format!(
                "expected {expected} columns, got {}",
                row.len()
            )));
        }

        let int = |value: &CellValue, what: &str| {
            value
                .as_i64()
                .ok_or_else(|| QueryExecutionError::Decode(format!("{what} is not an integer: {value}")))
        };
        let year = |value: &CellValue| -> Result<i32, QueryExecutionError> {
            i32::try_from(int(value, "group_year")?)
                .map_err(|_| QueryExecutionError::Decode(format!("group_year out of range: {value}")))
        };
        let part = |value: &CellValue| -> Result<u8, QueryExecutionError> {
            u8::try_from(int(value, "group_part")?)
                .map_err(|_| QueryExecutionError::Decode(format!("group_part out of range: {value}")))
        };

        let group_id = match period {
            None => None,
            Some(GroupingPeriod::Year) => Some(GroupId::year(year(&row[0])?)),
            Some(GroupingPeriod::Quarter) => Some(GroupId::quarter(year(&row[0])?, part(&row[1])?)),
            Some(GroupingPeriod::Month) => Some(GroupId::month(year(&row[0])?, part(&row[1])?)),
        };
        let lookup_value = row[expected - 2].to_string_repr();
        let total = u64::try_from(int(&row[expected - 1], "total")?)
            .map_err(|_| QueryExecutionError::Decode("negative total".to_string()))?;

        Ok(ResultRow {
            group_id,
            lookup_value,
            total,
        })
    }
}

impl<C: SqlConnection> StoreExecutor for SqlStoreExecutor<C> {
    fn execute(&self, query: &AggregateQuery) -> Result<Vec<ResultRow>, QueryExecutionError> {
        let rendered = SqlRenderer::render(query);
        debug!(
            target: "indicator_engine::executor",
            indicator = %query.indicator,
            sql = %rendered.sql,
            params = rendered.params.len(),
            "Executing rendered query"
        );
        let rows = self
            .connection
            .query(&rendered.sql, &rendered.params)
            .map_err(QueryExecutionError::Storage)?;
        let results = rows
            .iter()
            .map(|row| Self::decode(query, row))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            target: "indicator_engine::executor",
            indicator = %query.indicator,
            rows = results.len(),
            "Indicator query executed"
        );
        Ok(results)
    }
}

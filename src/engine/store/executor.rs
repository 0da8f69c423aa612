use std::sync::Arc;

use crate::engine::errors::QueryExecutionError;
use crate::engine::indicator::AggregateQuery;
use crate::engine::types::ResultRow;

/// Runs an assembled indicator query once. Implementations never retry.
pub trait StoreExecutor: Send + Sync {
    fn execute(&self, query: &AggregateQuery) -> Result<Vec<ResultRow>, QueryExecutionError>;
}

impl<T: StoreExecutor + ?Sized> StoreExecutor for Arc<T> {
    fn execute(&self, query: &AggregateQuery) -> Result<Vec<ResultRow>, QueryExecutionError> {
        (**self).execute(query)
    }
}

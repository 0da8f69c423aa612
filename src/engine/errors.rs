use thiserror::Error;
use tracing::{debug, error};

/// Malformed report input. Raised before any query is executed.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Unknown managed report: {0}")]
    UnknownReport(String),

    #[error("Unknown filter '{filter}' for indicator {indicator}")]
    UnknownFilter { indicator: String, filter: String },

    #[error("Invalid date for filter '{filter}': {value}")]
    InvalidDate { filter: String, value: String },

    #[error("Malformed filter '{filter}': {reason}")]
    MalformedFilter { filter: String, reason: String },

    #[error("Filter '{filter}' expects a {expected} value")]
    FilterKindMismatch { filter: String, expected: String },

    #[error("Invalid age range: {0}")]
    InvalidAgeRange(String),
}

/// Errors that can occur while running an assembled indicator query.
#[derive(Debug, Error)]
pub enum QueryExecutionError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown table alias: {0}")]
    UnknownAlias(String),

    #[error("Result decode failed: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QueryExecutionError {
    pub fn log_error(&self) {
        match self {
            QueryExecutionError::UnknownTable(t) => {
                error!("Query referenced unknown table: {}", t);
            }
            QueryExecutionError::UnknownAlias(a) => {
                error!("Query referenced unknown alias: {}", a);
            }
            QueryExecutionError::Decode(e) => {
                error!("Result decode failed: {}", e);
                debug!("Result decode error details: {}", e);
            }
            QueryExecutionError::Storage(e) => {
                error!("Storage error: {}", e);
                debug!("Storage error details: {:?}", e);
            }
        }
    }
}

/// Failures of a lookup data source (e.g. the location table).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the report orchestration layer.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] QueryExecutionError),
}

/// Failures loading an in-memory dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dataset shape: {0}")]
    InvalidShape(String),
}

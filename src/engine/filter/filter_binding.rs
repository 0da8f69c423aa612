use serde::Serialize;
use std::fmt;

use crate::engine::types::ColumnRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterKind {
    DateRange,
    Equality,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::DateRange => f.write_str("date range"),
            FilterKind::Equality => f.write_str("equality"),
        }
    }
}

/// Maps a caller-facing filter name onto the column it constrains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBinding {
    pub name: String,
    pub kind: FilterKind,
    pub column: ColumnRef,
}

impl FilterBinding {
    pub fn date_range(name: &str, column: ColumnRef) -> Self {
        Self {
            name: name.to_string(),
            kind: FilterKind::DateRange,
            column,
        }
    }

    pub fn equality(name: &str, column: ColumnRef) -> Self {
        Self {
            name: name.to_string(),
            kind: FilterKind::Equality,
            column,
        }
    }
}

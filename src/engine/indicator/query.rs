use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::errors::ValidationError;
use crate::engine::filter::Predicate;
use crate::engine::indicator::definition::RecordSource;
use crate::engine::indicator::dimension::Dimension;
use crate::engine::types::ColumnRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingPeriod {
    Year,
    Quarter,
    Month,
}

impl FromStr for GroupingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(GroupingPeriod::Year),
            "quarter" => Ok(GroupingPeriod::Quarter),
            "month" => Ok(GroupingPeriod::Month),
            other => Err(ValidationError::MalformedFilter {
                filter: "grouped_by".to_string(),
                reason: format!("unknown grouping period '{other}'"),
            }),
        }
    }
}

impl fmt::Display for GroupingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroupingPeriod::Year => "year",
            GroupingPeriod::Quarter => "quarter",
            GroupingPeriod::Month => "month",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouping {
    pub period: GroupingPeriod,
    pub column: ColumnRef,
}

/// A fully assembled, executable aggregation: count rows per lookup value
/// (and per group when `grouping` is set).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateQuery {
    pub indicator: String,
    pub lookup_key: String,
    pub source: RecordSource,
    pub predicate: Option<Predicate>,
    pub dimension: Dimension,
    pub grouping: Option<Grouping>,
    /// Reference date bound into date classification rules.
    pub as_of: NaiveDate,
    pub incomplete_data_key: String,
}

impl AggregateQuery {
    pub fn is_grouped(&self) -> bool {
        self.grouping.is_some()
    }

    pub fn conjuncts(&self) -> Vec<&Predicate> {
        self.predicate
            .as_ref()
            .map(|p| p.conjuncts())
            .unwrap_or_default()
    }
}

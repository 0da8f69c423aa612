use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::engine::errors::ValidationError;
use crate::engine::filter::FieldAccessor;
use crate::engine::types::ColumnRef;

/// Derives the lookup value each counted row is bucketed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Dimension {
    /// The raw column value.
    Column(ColumnRef),
    Classification(Classification),
    /// Integer age bucketed into configured ranges.
    AgeRange {
        column: ColumnRef,
        ranges: Vec<AgeRange>,
    },
}

/// Ordered rules; the first matching case wins, otherwise `otherwise`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub cases: Vec<ClassificationCase>,
    pub otherwise: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationCase {
    pub rule: ClassificationRule,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassificationRule {
    /// Column is set and falls on or before the query's as-of date.
    DateOnOrBefore(ColumnRef),
}

impl ClassificationRule {
    pub fn column(&self) -> &ColumnRef {
        match self {
            ClassificationRule::DateOnOrBefore(c) => c,
        }
    }

    fn matches<A: FieldAccessor + ?Sized>(&self, row: &A, as_of: NaiveDate) -> bool {
        match self {
            ClassificationRule::DateOnOrBefore(column) => row
                .get(column)
                .and_then(|v| v.as_date())
                .is_some_and(|d| d <= as_of),
        }
    }
}

impl Dimension {
    pub fn columns(&self) -> Vec<&ColumnRef> {
        match self {
            Dimension::Column(column) | Dimension::AgeRange { column, .. } => vec![column],
            Dimension::Classification(c) => c.cases.iter().map(|case| case.rule.column()).collect(),
        }
    }

    pub fn lookup_value<A: FieldAccessor + ?Sized>(
        &self,
        row: &A,
        as_of: NaiveDate,
        incomplete_data_key: &str,
    ) -> String {
        match self {
            Dimension::Column(column) => match row.get(column) {
                Some(v) if !v.is_empty() => v.to_string_repr(),
                _ => incomplete_data_key.to_string(),
            },
            Dimension::Classification(classification) => classification
                .cases
                .iter()
                .find(|case| case.rule.matches(row, as_of))
                .map(|case| case.label.clone())
                .unwrap_or_else(|| classification.otherwise.clone()),
            Dimension::AgeRange { column, ranges } => row
                .get(column)
                .and_then(|v| v.as_i64())
                .and_then(|age| u32::try_from(age).ok())
                .and_then(|age| ranges.iter().find(|r| r.contains(age)))
                .map(|r| r.to_string())
                .unwrap_or_else(|| incomplete_data_key.to_string()),
        }
    }
}

/// Inclusive age bucket; `max = None` is open-ended (`18+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.is_none_or(|max| age <= max)
    }

    pub fn parse_all(ranges: &[String]) -> Result<Vec<AgeRange>, ValidationError> {
        ranges.iter().map(|r| r.parse()).collect()
    }
}

impl FromStr for AgeRange {
    type Err = ValidationError;

    /// Accepts `"0-4"`, `"0 - 4"` and `"18+"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAgeRange(s.to_string());
        let trimmed = s.trim();
        if let Some(min) = trimmed.strip_suffix('+') {
            let min = min.trim().parse::<u32>().map_err(|_| invalid())?;
            return Ok(AgeRange { min, max: None });
        }
        let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
        let min = min.trim().parse::<u32>().map_err(|_| invalid())?;
        let max = max.trim().parse::<u32>().map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(AgeRange {
            min,
            max: Some(max),
        })
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

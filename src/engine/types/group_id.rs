use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::indicator::GroupingPeriod;

/// Sub-year part of a composite group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPart {
    Quarter(u8),
    Month(u8),
}

/// Column key of a grouped result: a year, optionally narrowed to a quarter or month.
///
/// Ordering is years ascending, then parts by their ordinal within the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId {
    pub year: i32,
    pub part: Option<PeriodPart>,
}

impl GroupId {
    pub fn year(year: i32) -> Self {
        Self { year, part: None }
    }

    pub fn quarter(year: i32, quarter: u8) -> Self {
        Self {
            year,
            part: Some(PeriodPart::Quarter(quarter)),
        }
    }

    pub fn month(year: i32, month: u8) -> Self {
        Self {
            year,
            part: Some(PeriodPart::Month(month)),
        }
    }

    pub fn from_date(date: NaiveDate, period: GroupingPeriod) -> Self {
        let year = date.year();
        match period {
            GroupingPeriod::Year => Self::year(year),
            GroupingPeriod::Quarter => Self::quarter(year, (date.month0() / 3 + 1) as u8),
            GroupingPeriod::Month => Self::month(year, date.month() as u8),
        }
    }

    /// Column label: `2021`, `2021-Q3` or `2021-Sep`.
    pub fn label(&self) -> String {
        match self.part {
            None => self.year.to_string(),
            Some(PeriodPart::Quarter(q)) => format!("{}-Q{}", self.year, q),
            Some(PeriodPart::Month(m)) => match Month::try_from(m) {
                Ok(month) => format!("{}-{}", self.year, &month.name()[..3]),
                Err(_) => format!("{}-{:02}", self.year, m),
            },
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

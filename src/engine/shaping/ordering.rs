use std::cmp::Ordering;

use crate::engine::indicator::AgeRange;
use crate::engine::shaping::grouped_table::TableRow;

/// Final row order of a shaped table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Case-insensitive by label, ties broken by raw key.
    Alphabetical,
    /// Numeric by the range's lower bound; unparseable keys last.
    AgeRange,
}

impl RowOrder {
    pub fn for_lookup_key(lookup_key: &str, age_lookup_key: &str) -> Self {
        if lookup_key == age_lookup_key {
            RowOrder::AgeRange
        } else {
            RowOrder::Alphabetical
        }
    }

    pub fn sort(&self, rows: &mut [TableRow]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }

    pub fn compare(&self, a: &TableRow, b: &TableRow) -> Ordering {
        match self {
            RowOrder::Alphabetical => alphabetical(a, b),
            RowOrder::AgeRange => match (age_bounds(&a.key), age_bounds(&b.key)) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| alphabetical(a, b)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => alphabetical(a, b),
            },
        }
    }
}

fn alphabetical(a: &TableRow, b: &TableRow) -> Ordering {
    a.label
        .to_lowercase()
        .cmp(&b.label.to_lowercase())
        .then_with(|| a.key.cmp(&b.key))
}

/// `(lower, upper)` with open-ended ranges sorting after closed ones sharing a lower bound.
pub fn age_bounds(raw: &str) -> Option<(u32, u32)> {
    raw.parse::<AgeRange>()
        .ok()
        .map(|range| (range.min, range.max.unwrap_or(u32::MAX)))
}

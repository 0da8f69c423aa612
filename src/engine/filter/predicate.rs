use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::engine::types::{CellValue, ColumnRef};

/// Read access to the columns of one (joined) record.
pub trait FieldAccessor {
    /// Returns `None` when the record has no value for the column.
    fn get(&self, column: &ColumnRef) -> Option<&CellValue>;
}

impl FieldAccessor for HashMap<ColumnRef, CellValue> {
    fn get(&self, column: &ColumnRef) -> Option<&CellValue> {
        HashMap::get(self, column)
    }
}

/// Typed query fragment. Every variant is bound to a table alias through its
/// `ColumnRef`; fragments compose only by conjunction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Predicate {
    /// Inclusive date range; an absent bound leaves that side open.
    DateRange {
        column: ColumnRef,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    /// Scalar `=`; list columns never match. Use a scope predicate for arrays.
    Equality {
        column: ColumnRef,
        value: CellValue,
    },
    Scope(ScopePredicate),
    Static(StaticPredicate),
    And(Vec<Predicate>),
}

/// Access-scope restriction produced by a `ScopeProvider`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScopePredicate {
    /// Scalar column equals one of `values`.
    Membership {
        column: ColumnRef,
        values: Vec<CellValue>,
    },
    /// Array column shares at least one element with `values`.
    Overlap {
        column: ColumnRef,
        values: Vec<CellValue>,
    },
    /// Principal may not see any record.
    DenyAll,
}

/// Fixed predicates an indicator always applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StaticPredicate {
    Present(ColumnRef),
    IsTrue(ColumnRef),
    Equals(ColumnRef, CellValue),
}

impl Predicate {
    /// Conjunction of any number of optional fragments.
    ///
    /// Absent fragments are skipped and nested `And`s are flattened, so a caller
    /// never has to know whether a fragment is the first one. Returns `None` when
    /// nothing constrains the query.
    pub fn all_of<I>(fragments: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        let mut parts = Vec::new();
        for fragment in fragments.into_iter().flatten() {
            match fragment {
                Predicate::And(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Predicate::And(parts)),
        }
    }

    /// Flattened list of the conjuncts making up this predicate.
    pub fn conjuncts(&self) -> Vec<&Predicate> {
        match self {
            Predicate::And(parts) => parts.iter().flat_map(|p| p.conjuncts()).collect(),
            other => vec![other],
        }
    }

    /// Every column the predicate reads.
    pub fn columns(&self) -> Vec<&ColumnRef> {
        match self {
            Predicate::DateRange { column, .. } | Predicate::Equality { column, .. } => {
                vec![column]
            }
            Predicate::Scope(ScopePredicate::Membership { column, .. })
            | Predicate::Scope(ScopePredicate::Overlap { column, .. }) => vec![column],
            Predicate::Scope(ScopePredicate::DenyAll) => Vec::new(),
            Predicate::Static(stat) => vec![stat.column()],
            Predicate::And(parts) => parts.iter().flat_map(|p| p.columns()).collect(),
        }
    }

    pub fn evaluate<A: FieldAccessor + ?Sized>(&self, row: &A) -> bool {
        match self {
            Predicate::DateRange { column, from, to } => {
                let Some(date) = row.get(column).and_then(|v| v.as_date()) else {
                    return false;
                };
                from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
            }
            Predicate::Equality { column, value } => match row.get(column) {
                Some(CellValue::List(_)) | None => false,
                Some(cell) => cell.matches(value),
            },
            Predicate::Scope(scope) => scope.evaluate(row),
            Predicate::Static(stat) => stat.evaluate(row),
            Predicate::And(parts) => parts.iter().all(|p| p.evaluate(row)),
        }
    }
}

impl ScopePredicate {
    pub fn evaluate<A: FieldAccessor + ?Sized>(&self, row: &A) -> bool {
        match self {
            ScopePredicate::Membership { column, values } => row
                .get(column)
                .is_some_and(|cell| values.iter().any(|v| cell.matches(v))),
            ScopePredicate::Overlap { column, values } => match row.get(column) {
                Some(CellValue::List(items)) => items
                    .iter()
                    .any(|item| values.iter().any(|v| item.matches(v))),
                Some(cell) => values.iter().any(|v| cell.matches(v)),
                None => false,
            },
            ScopePredicate::DenyAll => false,
        }
    }
}

impl StaticPredicate {
    pub fn column(&self) -> &ColumnRef {
        match self {
            StaticPredicate::Present(c) | StaticPredicate::IsTrue(c) => c,
            StaticPredicate::Equals(c, _) => c,
        }
    }

    pub fn evaluate<A: FieldAccessor + ?Sized>(&self, row: &A) -> bool {
        match self {
            StaticPredicate::Present(column) => row.get(column).is_some_and(|v| !v.is_null()),
            StaticPredicate::IsTrue(column) => {
                row.get(column).and_then(|v| v.as_bool()) == Some(true)
            }
            StaticPredicate::Equals(column, value) => {
                row.get(column).is_some_and(|cell| cell.matches(value))
            }
        }
    }
}

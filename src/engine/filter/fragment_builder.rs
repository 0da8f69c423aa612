use tracing::debug;

use crate::engine::errors::ValidationError;
use crate::engine::filter::filter_binding::{FilterBinding, FilterKind};
use crate::engine::filter::filter_spec::{DateRangeInput, FilterValue};
use crate::engine::filter::predicate::Predicate;
use crate::engine::types::{CellValue, ColumnRef};

/// Turns caller filter values into optional predicate fragments.
///
/// Every builder returns `Ok(None)` when the value carries no constraint, so the
/// results can be handed straight to `Predicate::all_of`.
pub struct FragmentBuilder;

impl FragmentBuilder {
    pub fn date_range_fragment(
        filter: &str,
        range: &DateRangeInput,
        column: &ColumnRef,
    ) -> Result<Option<Predicate>, ValidationError> {
        let (from, to) = range.parse(filter)?;
        if from.is_none() && to.is_none() {
            return Ok(None);
        }
        Ok(Some(Predicate::DateRange {
            column: column.clone(),
            from,
            to,
        }))
    }

    pub fn equality_fragment(value: &CellValue, column: &ColumnRef) -> Option<Predicate> {
        if value.is_empty() {
            return None;
        }
        Some(Predicate::Equality {
            column: column.clone(),
            value: value.clone(),
        })
    }

    /// Builds the fragment for one bound filter, checking the value shape
    /// against the binding kind.
    pub fn filter_fragment(
        binding: &FilterBinding,
        value: &FilterValue,
    ) -> Result<Option<Predicate>, ValidationError> {
        let fragment = match (binding.kind, value) {
            (_, FilterValue::Absent) => None,
            (FilterKind::DateRange, FilterValue::DateRange(range)) => {
                Self::date_range_fragment(&binding.name, range, &binding.column)?
            }
            (FilterKind::Equality, FilterValue::Equality(v)) => {
                Self::equality_fragment(v, &binding.column)
            }
            (FilterKind::Equality, FilterValue::Flag(flag)) => {
                Self::equality_fragment(&CellValue::Boolean(*flag), &binding.column)
            }
            (kind, _) => {
                return Err(ValidationError::FilterKindMismatch {
                    filter: binding.name.clone(),
                    expected: kind.to_string(),
                });
            }
        };
        debug!(
            target: "indicator_engine::filter",
            filter = %binding.name,
            applied = fragment.is_some(),
            "Built filter fragment"
        );
        Ok(fragment)
    }
}

use crate::engine::filter::{DateRangeInput, FilterSpec, FilterValue};
use crate::engine::types::CellValue;

pub struct FilterSpecFactory {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSpecFactory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Every bundled filter, all absent.
    pub fn all_absent() -> Self {
        let mut factory = Self::new();
        for name in [
            "incident_date",
            "date_of_first_report",
            "ctfmr_verified_date",
            "ctfmr_verified",
            "module_id",
        ] {
            factory = factory.with(name, FilterValue::Absent);
        }
        factory
    }

    pub fn with(mut self, name: &str, value: FilterValue) -> Self {
        self.entries.push((name.to_string(), value));
        self
    }

    pub fn with_date_range(self, name: &str, from: &str, to: &str) -> Self {
        self.with(
            name,
            FilterValue::DateRange(DateRangeInput::new(Some(from), Some(to))),
        )
    }

    pub fn with_equality(self, name: &str, value: impl Into<CellValue>) -> Self {
        self.with(name, FilterValue::Equality(value.into()))
    }

    pub fn with_flag(self, name: &str, flag: bool) -> Self {
        self.with(name, FilterValue::Flag(flag))
    }

    pub fn entries(&self) -> &[(String, FilterValue)] {
        &self.entries
    }

    pub fn create(self) -> FilterSpec {
        self.entries.into_iter().collect()
    }
}

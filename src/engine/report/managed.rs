use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::errors::ValidationError;

pub const VIOLATIONS_REPORT: &str = "violations";

/// A named bundle of indicators run together with shared filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagedReport {
    pub id: String,
    pub indicators: Vec<String>,
}

impl ManagedReport {
    pub fn new(id: &str, indicators: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn violations() -> Self {
        Self::new(
            VIOLATIONS_REPORT,
            &[
                "violation_type",
                "verified_violations",
                "detention_status",
                "individual_age",
                "individual_sex",
            ],
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportCatalog {
    reports: IndexMap<String, ManagedReport>,
}

impl ReportCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register(ManagedReport::violations());
        catalog
    }

    pub fn register(&mut self, report: ManagedReport) {
        self.reports.insert(report.id.clone(), report);
    }

    pub fn get(&self, id: &str) -> Result<&ManagedReport, ValidationError> {
        self.reports
            .get(id)
            .ok_or_else(|| ValidationError::UnknownReport(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.reports.keys().map(String::as_str)
    }
}

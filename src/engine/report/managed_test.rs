use crate::engine::errors::ValidationError;
use crate::engine::indicator::IndicatorRegistry;
use crate::engine::report::{ManagedReport, ReportCatalog};
use crate::shared::config::ReportConfig;

#[test]
fn violations_report_only_names_registered_indicators() {
    let registry = IndicatorRegistry::with_defaults(&ReportConfig::default()).unwrap();
    let report = ManagedReport::violations();

    assert_eq!(report.indicators.len(), 5);
    for indicator in &report.indicators {
        assert!(registry.get(indicator).is_ok(), "missing {indicator}");
    }
}

#[test]
fn unknown_report_is_a_validation_error() {
    let catalog = ReportCatalog::with_defaults();

    assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["violations"]);
    assert_eq!(
        catalog.get("monthly").unwrap_err(),
        ValidationError::UnknownReport("monthly".into())
    );
}

use crate::engine::errors::ValidationError;
use crate::engine::indicator::{IndicatorRegistry, builtin};
use crate::shared::config::ReportConfig;

#[test]
fn defaults_register_every_bundled_indicator_in_order() {
    let registry = IndicatorRegistry::with_defaults(&ReportConfig::default()).unwrap();

    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec![
            "violation_type",
            "verified_violations",
            "detention_status",
            "individual_age",
            "individual_sex",
            "incident_location",
        ]
    );
    assert_eq!(registry.get("individual_age").unwrap().lookup_key, "age");
}

#[test]
fn unknown_indicator_is_a_validation_error() {
    let registry = IndicatorRegistry::new();

    assert!(registry.is_empty());
    assert_eq!(
        registry.get("detention_status").unwrap_err(),
        ValidationError::UnknownIndicator("detention_status".into())
    );
}

#[test]
fn invalid_configured_age_range_is_rejected() {
    let config = ReportConfig {
        age_ranges: vec!["0-4".into(), "old".into()],
        ..ReportConfig::default()
    };

    assert_eq!(
        IndicatorRegistry::with_defaults(&config).unwrap_err(),
        ValidationError::InvalidAgeRange("old".into())
    );
}

#[test]
fn register_replaces_by_name() {
    let mut registry = IndicatorRegistry::new();
    registry.register(builtin::violation_type());
    let mut custom = builtin::verified_violations();
    custom.name = "violation_type".into();
    registry.register(custom);

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("violation_type").unwrap().static_predicates.len(),
        1
    );
}

#[test]
fn app_config_uses_configured_age_key() {
    let registry = IndicatorRegistry::from_app_config().unwrap();

    assert_eq!(registry.len(), 6);
    assert_eq!(registry.get("individual_age").unwrap().lookup_key, "age");
}

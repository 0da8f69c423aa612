//! Indicator definitions bundled with the engine.
//!
//! Record layout: `individual_victims.violation_id -> violations.id` and
//! `violations.incident_id -> incidents.id`. Access scope always applies to
//! the owning incident.

use crate::engine::filter::{FilterBinding, StaticPredicate};
use crate::engine::indicator::definition::{IndicatorDefinition, RecordSource};
use crate::engine::indicator::dimension::{
    AgeRange, Classification, ClassificationCase, ClassificationRule, Dimension,
};
use crate::engine::types::{CellValue, ColumnRef};

pub const INCIDENTS: &str = "incidents";
pub const VIOLATIONS: &str = "violations";
pub const INDIVIDUAL_VICTIMS: &str = "individual_victims";

pub const DETENTION_RELEASED: &str = "detention_released";
pub const DETENTION_DETAINED: &str = "detention_detained";

pub const LOCATION_LOOKUP_KEY: &str = "location";

fn incidents(column: &str) -> ColumnRef {
    ColumnRef::new(INCIDENTS, column)
}

fn violations(column: &str) -> ColumnRef {
    ColumnRef::new(VIOLATIONS, column)
}

fn victims(column: &str) -> ColumnRef {
    ColumnRef::new(INDIVIDUAL_VICTIMS, column)
}

fn violation_source() -> RecordSource {
    RecordSource::table(VIOLATIONS).join(INCIDENTS, "id", violations("incident_id"))
}

fn victim_source() -> RecordSource {
    RecordSource::table(INDIVIDUAL_VICTIMS)
        .join(VIOLATIONS, "id", victims("violation_id"))
        .join(INCIDENTS, "id", violations("incident_id"))
}

/// Filters every bundled indicator accepts.
pub fn common_filters() -> Vec<FilterBinding> {
    vec![
        FilterBinding::date_range("incident_date", incidents("incident_date")),
        FilterBinding::date_range("date_of_first_report", incidents("date_of_first_report")),
        FilterBinding::date_range("ctfmr_verified_date", violations("ctfmr_verified_date")),
        FilterBinding::equality("ctfmr_verified", violations("ctfmr_verified")),
        FilterBinding::equality("module_id", incidents("module_id")),
    ]
}

/// Detained victims, split by whether the deprivation of liberty has ended.
pub fn detention_status() -> IndicatorDefinition {
    let released = ClassificationCase {
        rule: ClassificationRule::DateOnOrBefore(victims("deprivation_liberty_end")),
        label: DETENTION_RELEASED.to_string(),
    };
    IndicatorDefinition::new(
        "detention_status",
        "detention_status",
        victim_source(),
        INCIDENTS,
        incidents("incident_date"),
        Dimension::Classification(Classification {
            cases: vec![released],
            otherwise: DETENTION_DETAINED.to_string(),
        }),
    )
    .with_filters(common_filters())
    .with_static(StaticPredicate::Present(victims("length_of_deprivation_liberty")))
    .with_static(StaticPredicate::IsTrue(victims(
        "victim_deprived_liberty_security_reasons",
    )))
}

pub fn violation_type() -> IndicatorDefinition {
    IndicatorDefinition::new(
        "violation_type",
        "violation_type",
        violation_source(),
        INCIDENTS,
        incidents("incident_date"),
        Dimension::Column(violations("type")),
    )
    .with_filters(common_filters())
}

pub fn verified_violations() -> IndicatorDefinition {
    IndicatorDefinition::new(
        "verified_violations",
        "violation_type",
        violation_source(),
        INCIDENTS,
        incidents("incident_date"),
        Dimension::Column(violations("type")),
    )
    .with_filters(common_filters())
    .with_static(StaticPredicate::Equals(
        violations("ctfmr_verified"),
        CellValue::Boolean(true),
    ))
}

pub fn individual_age(age_lookup_key: &str, ranges: Vec<AgeRange>) -> IndicatorDefinition {
    IndicatorDefinition::new(
        "individual_age",
        age_lookup_key,
        victim_source(),
        INCIDENTS,
        incidents("incident_date"),
        Dimension::AgeRange {
            column: victims("individual_age"),
            ranges,
        },
    )
    .with_filters(common_filters())
}

pub fn individual_sex() -> IndicatorDefinition {
    IndicatorDefinition::new(
        "individual_sex",
        "sex",
        victim_source(),
        INCIDENTS,
        incidents("incident_date"),
        Dimension::Column(victims("individual_sex")),
    )
    .with_filters(common_filters())
}

/// Incidents by where they happened; codes resolve through the location table.
pub fn incident_location() -> IndicatorDefinition {
    IndicatorDefinition::new(
        "incident_location",
        LOCATION_LOOKUP_KEY,
        violation_source(),
        INCIDENTS,
        incidents("incident_date"),
        Dimension::Column(incidents("incident_location")),
    )
    .with_filters(common_filters())
}

use chrono::NaiveDate;
use std::sync::Arc;

use crate::engine::errors::QueryExecutionError;
use crate::engine::filter::{AccessScope, FilterSpec, Principal, RecordOwnershipScope};
use crate::engine::indicator::{
    AggregateQuery, GroupingPeriod, IndicatorDefinition, QueryAssembler, RecordSource, builtin,
};
use crate::engine::store::{Dataset, InMemoryStore, StoreExecutor};
use crate::engine::types::{ColumnRef, GroupId, ResultRow};
use crate::shared::datetime::FixedClock;
use crate::test_helpers::factories::{DatasetFactory, PrincipalFactory, RecordFactory};

fn assemble(
    principal: &Principal,
    definition: &IndicatorDefinition,
    grouped_by: Option<GroupingPeriod>,
) -> AggregateQuery {
    QueryAssembler::new(
        Arc::new(RecordOwnershipScope::default()),
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
        "incomplete_data",
    )
    .assemble(principal, definition, &FilterSpec::new(), grouped_by)
    .unwrap()
}

fn two_incidents() -> Dataset {
    DatasetFactory::new()
        .with_incident(RecordFactory::incident(1))
        .with_incident(
            RecordFactory::incident(2)
                .with("incident_date", "2022-11-05")
                .with("owned_by", "bob")
                .with("associated_user_groups", serde_json::json!(["unhcr"])),
        )
        .with_violation(RecordFactory::violation(10, 1))
        .with_violation(RecordFactory::violation(11, 1).with("type", "abduction"))
        .with_violation(RecordFactory::violation(12, 2))
        .with_violation(RecordFactory::violation(13, 2).without("type"))
        .with_violation(RecordFactory::violation(14, 99))
        .create()
}

#[test]
fn counts_joined_rows_per_lookup_value() {
    let store = InMemoryStore::new(two_incidents());
    let query = assemble(
        &PrincipalFactory::new().create(),
        &builtin::violation_type(),
        None,
    );

    let rows = store.execute(&query).unwrap();

    assert_eq!(
        rows,
        vec![
            ResultRow::new("abduction", 1),
            ResultRow::new("incomplete_data", 1),
            ResultRow::new("killing", 2),
        ]
    );
}

#[test]
fn groups_by_year_of_incident() {
    let store = InMemoryStore::new(two_incidents());
    let query = assemble(
        &PrincipalFactory::new().create(),
        &builtin::violation_type(),
        Some(GroupingPeriod::Year),
    );

    let rows = store.execute(&query).unwrap();

    assert_eq!(
        rows,
        vec![
            ResultRow::grouped(GroupId::year(2021), "abduction", 1),
            ResultRow::grouped(GroupId::year(2021), "killing", 1),
            ResultRow::grouped(GroupId::year(2022), "incomplete_data", 1),
            ResultRow::grouped(GroupId::year(2022), "killing", 1),
        ]
    );
}

#[test]
fn rows_without_a_record_date_are_not_grouped() {
    let dataset = DatasetFactory::new()
        .with_incident(RecordFactory::incident(1).without("incident_date"))
        .with_incident(RecordFactory::incident(2))
        .with_violation(RecordFactory::violation(10, 1))
        .with_violation(RecordFactory::violation(11, 2))
        .create();
    let query = assemble(
        &PrincipalFactory::new().create(),
        &builtin::violation_type(),
        Some(GroupingPeriod::Month),
    );

    let rows = InMemoryStore::new(dataset).execute(&query).unwrap();

    assert_eq!(
        rows,
        vec![ResultRow::grouped(GroupId::month(2021, 3), "killing", 1)]
    );
}

#[test]
fn group_and_user_scopes_restrict_rows() {
    let store = InMemoryStore::new(two_incidents());
    let definition = builtin::violation_type();

    let by_group = PrincipalFactory::new()
        .with_groups(&["unhcr"])
        .with_scope(AccessScope::Group)
        .create();
    let rows = store
        .execute(&assemble(&by_group, &definition, None))
        .unwrap();
    assert_eq!(
        rows,
        vec![
            ResultRow::new("incomplete_data", 1),
            ResultRow::new("killing", 1),
        ]
    );

    let by_user = PrincipalFactory::new().with_scope(AccessScope::User).create();
    let rows = store
        .execute(&assemble(&by_user, &definition, None))
        .unwrap();
    assert_eq!(
        rows,
        vec![ResultRow::new("abduction", 1), ResultRow::new("killing", 1)]
    );

    let no_groups = PrincipalFactory::new()
        .with_groups(&[])
        .with_scope(AccessScope::Group)
        .create();
    assert!(
        store
            .execute(&assemble(&no_groups, &definition, None))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn missing_table_is_an_execution_error() {
    let mut dataset = Dataset::new();
    dataset.ensure_table("violations");
    let query = assemble(
        &PrincipalFactory::new().create(),
        &builtin::violation_type(),
        None,
    );

    let err = InMemoryStore::new(dataset).execute(&query).unwrap_err();

    assert!(matches!(err, QueryExecutionError::UnknownTable(t) if t == "incidents"));
}

#[test]
fn columns_must_reference_joined_aliases() {
    let definition = IndicatorDefinition::new(
        "orphans",
        "violation_type",
        RecordSource::table("violations"),
        "incidents",
        ColumnRef::new("violations", "ctfmr_verified_date"),
        crate::engine::indicator::Dimension::Column(ColumnRef::new("violations", "type")),
    );
    let query = assemble(
        &PrincipalFactory::new().with_scope(AccessScope::User).create(),
        &definition,
        None,
    );

    let err = InMemoryStore::new(two_incidents())
        .execute(&query)
        .unwrap_err();

    assert!(matches!(err, QueryExecutionError::UnknownAlias(a) if a == "incidents"));
}

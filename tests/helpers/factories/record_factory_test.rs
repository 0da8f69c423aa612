use crate::engine::types::CellValue;
use crate::test_helpers::factories::RecordFactory;
use chrono::NaiveDate;

#[test]
fn incident_defaults_are_typed() {
    let record = RecordFactory::incident(7).create();

    assert_eq!(record.get("id"), Some(&CellValue::Int64(7)));
    assert_eq!(
        record.get("incident_date"),
        Some(&CellValue::Date(NaiveDate::from_ymd_opt(2021, 3, 10).unwrap()))
    );
    assert_eq!(
        record.get("associated_user_groups"),
        Some(&CellValue::List(vec![CellValue::text("unicef")]))
    );
}

#[test]
fn with_and_without_override_fields() {
    let record = RecordFactory::victim(1, 2)
        .with("individual_sex", "male")
        .without("individual_age")
        .create();

    assert_eq!(record.get("individual_sex"), Some(&CellValue::text("male")));
    assert!(record.get("individual_age").is_none());
    assert_eq!(record.get("violation_id"), Some(&CellValue::Int64(2)));
}

use crate::engine::filter::FilterValue;
use crate::test_helpers::factories::FilterSpecFactory;

#[test]
fn all_absent_lists_bundled_filters() {
    let spec = FilterSpecFactory::all_absent().create();

    assert_eq!(spec.len(), 5);
    assert!(spec.iter().all(|(_, v)| v.is_absent()));
}

#[test]
fn keeps_insertion_order() {
    let spec = FilterSpecFactory::new()
        .with_flag("ctfmr_verified", true)
        .with_date_range("incident_date", "2021-01-01", "2021-12-31")
        .create();

    let names: Vec<&str> = spec.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["ctfmr_verified", "incident_date"]);
    assert_eq!(spec.get("ctfmr_verified"), Some(&FilterValue::Flag(true)));
}

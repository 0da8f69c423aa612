use crate::engine::indicator::builtin::{INCIDENTS, INDIVIDUAL_VICTIMS, VIOLATIONS};
use crate::test_helpers::factories::{DatasetFactory, RecordFactory};

#[test]
fn new_registers_empty_tables() {
    let dataset = DatasetFactory::new().create();

    for table in [INCIDENTS, VIOLATIONS, INDIVIDUAL_VICTIMS] {
        assert_eq!(dataset.table(table).map(|t| t.len()), Some(0));
    }
}

#[test]
fn detention_scenario_links_victims_to_one_incident() {
    let dataset = DatasetFactory::detention_scenario()
        .with_incident(RecordFactory::incident(2))
        .create();

    assert_eq!(dataset.len(INCIDENTS), 2);
    assert_eq!(dataset.len(VIOLATIONS), 1);
    assert_eq!(dataset.len(INDIVIDUAL_VICTIMS), 2);
}

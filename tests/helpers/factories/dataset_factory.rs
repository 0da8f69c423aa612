use crate::engine::indicator::builtin::{INCIDENTS, INDIVIDUAL_VICTIMS, VIOLATIONS};
use crate::engine::store::{Dataset, Record};
use crate::test_helpers::factories::RecordFactory;

pub struct DatasetFactory {
    dataset: Dataset,
}

impl DatasetFactory {
    /// Empty `incidents`, `violations` and `individual_victims` tables.
    pub fn new() -> Self {
        let mut dataset = Dataset::new();
        for table in [INCIDENTS, VIOLATIONS, INDIVIDUAL_VICTIMS] {
            dataset.ensure_table(table);
        }
        Self { dataset }
    }

    pub fn with_record(mut self, table: &str, record: Record) -> Self {
        self.dataset.insert(table, record);
        self
    }

    pub fn with_incident(self, incident: RecordFactory) -> Self {
        self.with_record(INCIDENTS, incident.create())
    }

    pub fn with_violation(self, violation: RecordFactory) -> Self {
        self.with_record(VIOLATIONS, violation.create())
    }

    pub fn with_victim(self, victim: RecordFactory) -> Self {
        self.with_record(INDIVIDUAL_VICTIMS, victim.create())
    }

    /// One incident, one detention violation and two detained victims: one
    /// released on 2023-06-30, one still held.
    pub fn detention_scenario() -> Self {
        Self::new()
            .with_incident(RecordFactory::incident(1))
            .with_violation(RecordFactory::violation(10, 1).with("type", "deprivation_liberty"))
            .with_victim(
                RecordFactory::victim(100, 10)
                    .with("length_of_deprivation_liberty", 30)
                    .with("victim_deprived_liberty_security_reasons", true)
                    .with("deprivation_liberty_end", "2023-06-30"),
            )
            .with_victim(
                RecordFactory::victim(101, 10)
                    .with("length_of_deprivation_liberty", 90)
                    .with("victim_deprived_liberty_security_reasons", true),
            )
    }

    pub fn create(self) -> Dataset {
        self.dataset
    }
}

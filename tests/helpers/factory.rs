pub use super::factories::{
    DatasetFactory, FilterSpecFactory, PrincipalFactory, RecordFactory, ResultRowFactory,
};

pub struct Factory;

impl Factory {
    pub fn record() -> RecordFactory {
        RecordFactory::new()
    }

    pub fn incident(id: i64) -> RecordFactory {
        RecordFactory::incident(id)
    }

    pub fn violation(id: i64, incident_id: i64) -> RecordFactory {
        RecordFactory::violation(id, incident_id)
    }

    pub fn victim(id: i64, violation_id: i64) -> RecordFactory {
        RecordFactory::victim(id, violation_id)
    }

    pub fn dataset() -> DatasetFactory {
        DatasetFactory::new()
    }

    pub fn principal() -> PrincipalFactory {
        PrincipalFactory::new()
    }

    pub fn filter_spec() -> FilterSpecFactory {
        FilterSpecFactory::new()
    }

    pub fn result_rows() -> ResultRowFactory {
        ResultRowFactory::new()
    }
}

use crate::engine::types::{GroupId, ResultRow};

pub struct ResultRowFactory {
    rows: Vec<ResultRow>,
}

impl ResultRowFactory {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add(mut self, lookup_value: &str, total: u64) -> Self {
        self.rows.push(ResultRow::new(lookup_value, total));
        self
    }

    pub fn add_year(mut self, year: i32, lookup_value: &str, total: u64) -> Self {
        self.rows
            .push(ResultRow::grouped(GroupId::year(year), lookup_value, total));
        self
    }

    pub fn add_quarter(mut self, year: i32, quarter: u8, lookup_value: &str, total: u64) -> Self {
        self.rows.push(ResultRow::grouped(
            GroupId::quarter(year, quarter),
            lookup_value,
            total,
        ));
        self
    }

    pub fn add_month(mut self, year: i32, month: u8, lookup_value: &str, total: u64) -> Self {
        self.rows
            .push(ResultRow::grouped(GroupId::month(year, month), lookup_value, total));
        self
    }

    pub fn create(self) -> Vec<ResultRow> {
        self.rows
    }
}

use serde::Serialize;

use crate::engine::filter::FilterSpec;
use crate::engine::indicator::GroupingPeriod;
use crate::engine::shaping::{ChartData, GroupedTable};

/// One indicator run: which indicator, with which filters, grouped how.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub indicator: String,
    pub filters: FilterSpec,
    pub grouped_by: Option<GroupingPeriod>,
}

impl ReportRequest {
    pub fn new(indicator: &str) -> Self {
        Self {
            indicator: indicator.to_string(),
            filters: FilterSpec::new(),
            grouped_by: None,
        }
    }

    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    pub fn grouped_by(mut self, period: GroupingPeriod) -> Self {
        self.grouped_by = Some(period);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    pub indicator: String,
    pub lookup_key: String,
    pub table: GroupedTable,
}

impl IndicatorReport {
    pub fn chart(&self) -> ChartData {
        ChartData::from_table(&self.table)
    }
}

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::engine::errors::{ReportError, ValidationError};
use crate::engine::filter::{FilterSpec, Principal, RecordOwnershipScope, ScopeProvider};
use crate::engine::indicator::{AggregateQuery, GroupingPeriod, IndicatorRegistry, QueryAssembler};
use crate::engine::lookup::LookupResolver;
use crate::engine::report::managed::ReportCatalog;
use crate::engine::report::request::{IndicatorReport, ReportRequest};
use crate::engine::shaping::TableBuilder;
use crate::engine::store::StoreExecutor;
use crate::shared::config::{CONFIG, ReportConfig};
use crate::shared::datetime::{Clock, SystemClock};

/// Runs indicators end to end: assemble, execute, shape.
pub struct ReportService {
    registry: IndicatorRegistry,
    catalog: ReportCatalog,
    assembler: QueryAssembler,
    executor: Arc<dyn StoreExecutor>,
    resolver: Arc<dyn LookupResolver>,
    config: ReportConfig,
}

impl ReportService {
    pub fn new(
        registry: IndicatorRegistry,
        executor: Arc<dyn StoreExecutor>,
        scope: Arc<dyn ScopeProvider>,
        resolver: Arc<dyn LookupResolver>,
        clock: Arc<dyn Clock>,
        config: ReportConfig,
    ) -> Self {
        Self {
            registry,
            catalog: ReportCatalog::with_defaults(),
            assembler: QueryAssembler::new(scope, clock, &config.incomplete_data_key),
            executor,
            resolver,
            config,
        }
    }

    /// Bundled indicators and reports, ownership scoping and the system clock.
    pub fn from_app_config(
        executor: Arc<dyn StoreExecutor>,
        resolver: Arc<dyn LookupResolver>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(
            IndicatorRegistry::from_app_config()?,
            executor,
            Arc::new(RecordOwnershipScope::default()),
            resolver,
            Arc::new(SystemClock),
            CONFIG.reports.clone(),
        ))
    }

    pub fn with_catalog(mut self, catalog: ReportCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    pub fn assemble(
        &self,
        principal: &Principal,
        request: &ReportRequest,
    ) -> Result<AggregateQuery, ValidationError> {
        let definition = self.registry.get(&request.indicator)?;
        self.assembler
            .assemble(principal, definition, &request.filters, request.grouped_by)
    }

    pub fn run(
        &self,
        principal: &Principal,
        request: &ReportRequest,
    ) -> Result<IndicatorReport, ReportError> {
        let query = self.assemble(principal, request).inspect_err(|e| {
            warn!(target: "indicator_engine::report", indicator = %request.indicator, error = %e, "Rejected report request");
        })?;
        self.execute(&query)
    }

    /// Runs every indicator of a managed report. Every query is assembled
    /// before any is executed, and the first failure fails the whole report.
    pub fn build_report(
        &self,
        principal: &Principal,
        report_id: &str,
        filters: &FilterSpec,
        grouped_by: Option<GroupingPeriod>,
    ) -> Result<Vec<IndicatorReport>, ReportError> {
        let report = self.catalog.get(report_id)?;
        let queries = report
            .indicators
            .iter()
            .map(|indicator| {
                let request = ReportRequest {
                    indicator: indicator.clone(),
                    filters: filters.clone(),
                    grouped_by,
                };
                self.assemble(principal, &request)
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                warn!(target: "indicator_engine::report", report = %report_id, error = %e, "Rejected managed report");
            })?;

        let results = queries
            .iter()
            .map(|query| self.execute(query))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            target: "indicator_engine::report",
            report = %report_id,
            indicators = results.len(),
            "Managed report built"
        );
        Ok(results)
    }

    fn execute(&self, query: &AggregateQuery) -> Result<IndicatorReport, ReportError> {
        let rows = self.executor.execute(query).map_err(|e| {
            error!(target: "indicator_engine::report", indicator = %query.indicator, "Indicator execution failed");
            e.log_error();
            e
        })?;

        let table = TableBuilder::new(&query.lookup_key, self.resolver.as_ref())
            .grouped(query.is_grouped())
            .age_lookup_key(&self.config.age_lookup_key)
            .build(&rows);

        info!(
            target: "indicator_engine::report",
            indicator = %query.indicator,
            rows = table.rows.len(),
            "Indicator report ready"
        );
        Ok(IndicatorReport {
            indicator: query.indicator.clone(),
            lookup_key: query.lookup_key.clone(),
            table,
        })
    }
}

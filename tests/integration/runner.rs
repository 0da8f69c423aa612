use crate::integration::scenarios::{Expectation, TestScenario};
use indicator_engine::engine::errors::ReportError;
use indicator_engine::engine::filter::{FilterSpec, RecordOwnershipScope};
use indicator_engine::engine::indicator::IndicatorRegistry;
use indicator_engine::engine::lookup::StaticLookups;
use indicator_engine::engine::report::{IndicatorReport, ReportRequest, ReportService};
use indicator_engine::engine::store::{Dataset, InMemoryStore};
use indicator_engine::shared::config::ReportConfig;
use indicator_engine::shared::datetime::{DateParser, FixedClock};
use std::sync::Arc;
use tracing::info;

pub fn run_scenario(scenario: &TestScenario) {
    info!("▶ Running scenario: {}", scenario.name);

    let dataset = Dataset::from_json(&scenario.dataset).expect("Invalid scenario dataset");
    let lookups = match &scenario.lookups {
        Some(value) => StaticLookups::from_json(value).expect("Invalid scenario lookups"),
        None => StaticLookups::new(),
    };
    let as_of = DateParser::parse(&scenario.as_of).expect("Invalid scenario as_of");
    let config = ReportConfig::default();
    let service = ReportService::new(
        IndicatorRegistry::with_defaults(&config).unwrap(),
        Arc::new(InMemoryStore::new(dataset)),
        Arc::new(RecordOwnershipScope::default()),
        Arc::new(lookups),
        Arc::new(FixedClock(as_of)),
        config,
    );

    let outcome = FilterSpec::from_json(
        scenario
            .filters
            .as_ref()
            .unwrap_or(&serde_json::Value::Object(Default::default())),
    )
    .map_err(ReportError::from)
    .and_then(|filters| match (&scenario.indicator, &scenario.report) {
        (Some(indicator), _) => {
            let request = ReportRequest {
                indicator: indicator.clone(),
                filters,
                grouped_by: scenario.grouped_by,
            };
            service
                .run(&scenario.principal, &request)
                .map(|report| vec![report])
        }
        (None, Some(report)) => {
            service.build_report(&scenario.principal, report, &filters, scenario.grouped_by)
        }
        (None, None) => panic!("Scenario '{}' names no indicator or report", scenario.name),
    });

    check(&scenario.name, &scenario.expect, outcome);
}

fn check(name: &str, expect: &Expectation, outcome: Result<Vec<IndicatorReport>, ReportError>) {
    let reports = match (outcome, &expect.error) {
        (Err(err), Some(fragment)) => {
            assert!(
                err.to_string().contains(fragment.as_str()),
                "[{name}] expected error containing '{fragment}', got '{err}'"
            );
            return;
        }
        (Err(err), None) => panic!("[{name}] unexpected error: {err}"),
        (Ok(_), Some(fragment)) => panic!("[{name}] expected error containing '{fragment}'"),
        (Ok(reports), None) => reports,
    };

    if let Some(indicators) = &expect.indicators {
        let actual: Vec<&str> = reports.iter().map(|r| r.indicator.as_str()).collect();
        assert_eq!(actual, *indicators, "[{name}] indicators");
    }

    let table = &reports[0].table;
    if let Some(columns) = &expect.columns {
        let actual: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(actual, *columns, "[{name}] columns");
    }
    if let Some(rows) = &expect.rows {
        let actual: Vec<(&str, &[u64])> = table
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.values.as_slice()))
            .collect();
        let expected: Vec<(&str, &[u64])> = rows
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
            .collect();
        assert_eq!(actual, expected, "[{name}] rows");
    }
    info!("✔ Scenario passed: {}", name);
}

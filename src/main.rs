use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, ValueEnum};
use indicator_engine::engine::filter::{AccessScope, FilterSpec, Principal, RecordOwnershipScope};
use indicator_engine::engine::indicator::builtin::LOCATION_LOOKUP_KEY;
use indicator_engine::engine::indicator::{GroupingPeriod, IndicatorRegistry};
use indicator_engine::engine::lookup::{
    InMemoryLocations, LocationCache, LocationLookup, LookupRegistry, LookupResolver,
    StaticLookups,
};
use indicator_engine::engine::render::SqlRenderer;
use indicator_engine::engine::report::{IndicatorReport, ReportRequest, ReportService};
use indicator_engine::engine::store::{Dataset, InMemoryStore};
use indicator_engine::logging;
use indicator_engine::shared::config::CONFIG;
use indicator_engine::shared::datetime::{Clock, DateParser, FixedClock, SystemClock};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "indicator_engine")]
#[command(about = "Run report indicators against a JSON dataset", long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["indicator", "report"])))]
struct Args {
    /// JSON file of tables: {"incidents": [...], "violations": [...]}
    #[arg(long)]
    dataset: PathBuf,

    /// Indicator to run
    #[arg(long)]
    indicator: Option<String>,

    /// Managed report to run
    #[arg(long)]
    report: Option<String>,

    /// Filters as a JSON object, e.g. '{"incident_date": {"from": "2021-01-01"}}'
    #[arg(long)]
    filters: Option<String>,

    #[arg(long, value_enum)]
    grouped_by: Option<Period>,

    #[arg(long, default_value = "cli")]
    user: String,

    /// Comma-separated user groups
    #[arg(long, value_delimiter = ',')]
    groups: Vec<String>,

    #[arg(long, value_enum, default_value = "all")]
    scope: Scope,

    /// JSON file of static labels: {"violation_type": {"killing": "Killing"}}
    #[arg(long)]
    lookups: Option<PathBuf>,

    /// JSON export of the location table, resolved for the `location` lookup key
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Reference date for date classifications (defaults to today)
    #[arg(long)]
    as_of: Option<String>,

    /// Print the rendered SQL instead of running the query
    #[arg(long)]
    sql: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Period {
    Year,
    Quarter,
    Month,
}

impl From<Period> for GroupingPeriod {
    fn from(period: Period) -> Self {
        match period {
            Period::Year => GroupingPeriod::Year,
            Period::Quarter => GroupingPeriod::Quarter,
            Period::Month => GroupingPeriod::Month,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Scope {
    All,
    Group,
    User,
    None,
}

impl From<Scope> for AccessScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => AccessScope::All,
            Scope::Group => AccessScope::Group,
            Scope::User => AccessScope::User,
            Scope::None => AccessScope::None,
        }
    }
}

fn clock(as_of: Option<&str>) -> anyhow::Result<Arc<dyn Clock>> {
    match as_of {
        None => Ok(Arc::new(SystemClock)),
        Some(raw) => {
            let date: NaiveDate = DateParser::parse(raw)
                .with_context(|| format!("invalid --as-of date: {raw}"))?;
            Ok(Arc::new(FixedClock(date)))
        }
    }
}

fn resolver(args: &Args) -> anyhow::Result<Arc<dyn LookupResolver>> {
    let fallback: Arc<dyn LookupResolver> = match &args.lookups {
        Some(path) => Arc::new(
            StaticLookups::load(path)
                .with_context(|| format!("failed to load lookups from {}", path.display()))?,
        ),
        None => Arc::new(StaticLookups::new()),
    };
    let mut registry = LookupRegistry::new(fallback);
    if let Some(path) = &args.locations {
        let source = InMemoryLocations::load(path)
            .with_context(|| format!("failed to load locations from {}", path.display()))?;
        let cache = Arc::new(LocationCache::from_app_config(source));
        registry = registry.register(LOCATION_LOOKUP_KEY, Arc::new(LocationLookup::new(cache)));
    }
    Ok(Arc::new(registry))
}

fn report_json(report: &IndicatorReport) -> Value {
    json!({
        "indicator": report.indicator,
        "lookup_key": report.lookup_key,
        "table": report.table,
        "chart": report.chart(),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let filters = match &args.filters {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("--filters is not valid JSON")?;
            FilterSpec::from_json(&value)?
        }
        None => FilterSpec::new(),
    };
    let grouped_by = args.grouped_by.map(GroupingPeriod::from);
    let principal = Principal {
        user_name: args.user.clone(),
        user_groups: args.groups.clone(),
        scope: args.scope.into(),
    };

    let dataset = Dataset::load(&args.dataset)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;
    let service = ReportService::new(
        IndicatorRegistry::from_app_config()?,
        Arc::new(InMemoryStore::new(dataset)),
        Arc::new(RecordOwnershipScope::default()),
        resolver(&args)?,
        clock(args.as_of.as_deref())?,
        CONFIG.reports.clone(),
    );

    let indicators: Vec<String> = match (&args.indicator, &args.report) {
        (Some(indicator), _) => vec![indicator.clone()],
        (None, Some(report)) => match service.catalog().get(report) {
            Ok(managed) => managed.indicators.clone(),
            Err(e) => {
                let known: Vec<&str> = service.catalog().ids().collect();
                bail!("{e}; known reports: {}", known.join(", "))
            }
        },
        (None, None) => bail!("either --indicator or --report is required"),
    };
    info!(
        target: "indicator_engine::cli",
        indicators = indicators.len(),
        user = %principal.user_name,
        "Running indicators"
    );

    let output = if args.sql {
        let mut rendered = Vec::with_capacity(indicators.len());
        for indicator in &indicators {
            let request = ReportRequest {
                indicator: indicator.clone(),
                filters: filters.clone(),
                grouped_by,
            };
            let query = service.assemble(&principal, &request)?;
            rendered.push(json!({
                "indicator": indicator,
                "sql": SqlRenderer::render(&query),
            }));
        }
        Value::Array(rendered)
    } else if let Some(report) = &args.report {
        let reports = service.build_report(&principal, report, &filters, grouped_by)?;
        Value::Array(reports.iter().map(report_json).collect())
    } else {
        let request = ReportRequest {
            indicator: indicators[0].clone(),
            filters,
            grouped_by,
        };
        report_json(&service.run(&principal, &request)?)
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

use indexmap::IndexMap;
use indicator_engine::engine::filter::Principal;
use indicator_engine::engine::indicator::GroupingPeriod;
use serde::Deserialize;
use serde_json::Value;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    /// Tables in the same shape the CLI `--dataset` file uses
    pub dataset: Value,
    pub principal: Principal,
    pub indicator: Option<String>,
    pub report: Option<String>,
    #[serde(default)]
    pub filters: Option<Value>,
    #[serde(default)]
    pub grouped_by: Option<GroupingPeriod>,
    pub as_of: String,
    #[serde(default)]
    pub lookups: Option<Value>,
    pub expect: Expectation,
}

#[derive(Debug, Deserialize)]
pub struct Expectation {
    /// Column labels, in order
    pub columns: Option<Vec<String>>,
    /// Row label to cell values, in row order
    pub rows: Option<IndexMap<String, Vec<u64>>>,
    /// Indicators a managed report produced, in order
    pub indicators: Option<Vec<String>>,
    /// Substring of the expected error message
    pub error: Option<String>,
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}

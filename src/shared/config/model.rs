use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub reports: ReportConfig,
    pub lookups: LookupConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Lookup key whose rows are ordered by numeric age bound instead of label
    #[serde(default = "default_age_lookup_key")]
    pub age_lookup_key: String,
    /// Lookup value assigned to rows whose dimension column is empty
    #[serde(default = "default_incomplete_data_key")]
    pub incomplete_data_key: String,
    /// Age buckets in `"min-max"` or `"min+"` form
    #[serde(default = "default_age_ranges")]
    pub age_ranges: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            age_lookup_key: default_age_lookup_key(),
            incomplete_data_key: default_incomplete_data_key(),
            age_ranges: default_age_ranges(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_location_cache_ttl_hours")]
    pub location_cache_ttl_hours: u64,
    #[serde(default = "default_location_cache_capacity")]
    pub location_cache_capacity: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            location_cache_ttl_hours: default_location_cache_ttl_hours(),
            location_cache_capacity: default_location_cache_capacity(),
        }
    }
}

fn default_age_lookup_key() -> String {
    "age".to_string()
}

fn default_incomplete_data_key() -> String {
    "incomplete_data".to_string()
}

fn default_age_ranges() -> Vec<String> {
    ["0-4", "5-11", "12-17", "18+"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_location_cache_ttl_hours() -> u64 {
    48
}

fn default_location_cache_capacity() -> usize {
    4
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path =
        env::var("INDICATOR_ENGINE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}

use indexmap::IndexMap;

use crate::engine::errors::ValidationError;
use crate::engine::indicator::builtin;
use crate::engine::indicator::definition::IndicatorDefinition;
use crate::engine::indicator::dimension::AgeRange;
use crate::shared::config::{CONFIG, ReportConfig};

/// Named indicator definitions, in registration order.
#[derive(Debug, Clone, Default)]
pub struct IndicatorRegistry {
    indicators: IndexMap<String, IndicatorDefinition>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every bundled indicator.
    pub fn with_defaults(config: &ReportConfig) -> Result<Self, ValidationError> {
        let ranges = AgeRange::parse_all(&config.age_ranges)?;
        let mut registry = Self::new();
        registry.register(builtin::violation_type());
        registry.register(builtin::verified_violations());
        registry.register(builtin::detention_status());
        registry.register(builtin::individual_age(&config.age_lookup_key, ranges));
        registry.register(builtin::individual_sex());
        registry.register(builtin::incident_location());
        Ok(registry)
    }

    pub fn from_app_config() -> Result<Self, ValidationError> {
        Self::with_defaults(&CONFIG.reports)
    }

    /// Adds or replaces a definition.
    pub fn register(&mut self, definition: IndicatorDefinition) {
        self.indicators.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Result<&IndicatorDefinition, ValidationError> {
        self.indicators
            .get(name)
            .ok_or_else(|| ValidationError::UnknownIndicator(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.indicators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

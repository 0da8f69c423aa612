use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::engine::errors::LookupError;

/// Maps a coded lookup value to its display label.
pub trait LookupResolver: Send + Sync {
    /// Unknown values resolve to themselves.
    fn resolve(&self, lookup_key: &str, raw_value: &str) -> String;
}

/// Leaves every value as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl LookupResolver for IdentityResolver {
    fn resolve(&self, _lookup_key: &str, raw_value: &str) -> String {
        raw_value.to_string()
    }
}

/// Fixed label tables keyed by lookup key, e.g. translated option lists.
#[derive(Debug, Clone, Default)]
pub struct StaticLookups {
    labels: HashMap<String, HashMap<String, String>>,
}

impl StaticLookups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, lookup_key: &str, raw_value: &str, label: &str) -> Self {
        self.insert(lookup_key, raw_value, label);
        self
    }

    pub fn insert(&mut self, lookup_key: &str, raw_value: &str, label: &str) {
        self.labels
            .entry(lookup_key.to_string())
            .or_default()
            .insert(raw_value.to_string(), label.to_string());
    }

    /// Parses `{"violation_type": {"killing": "Killing of children"}}`.
    pub fn from_json(value: &JsonValue) -> Result<Self, LookupError> {
        let labels: HashMap<String, HashMap<String, String>> =
            serde_json::from_value(value.clone())?;
        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&serde_json::from_str(&raw)?)
    }
}

impl LookupResolver for StaticLookups {
    fn resolve(&self, lookup_key: &str, raw_value: &str) -> String {
        self.labels
            .get(lookup_key)
            .and_then(|values| values.get(raw_value))
            .cloned()
            .unwrap_or_else(|| raw_value.to_string())
    }
}

/// Dispatches each lookup key to the resolver for its data source.
#[derive(Clone)]
pub struct LookupRegistry {
    fallback: Arc<dyn LookupResolver>,
    by_key: HashMap<String, Arc<dyn LookupResolver>>,
}

impl LookupRegistry {
    pub fn new(fallback: Arc<dyn LookupResolver>) -> Self {
        Self {
            fallback,
            by_key: HashMap::new(),
        }
    }

    pub fn register(mut self, lookup_key: &str, resolver: Arc<dyn LookupResolver>) -> Self {
        self.by_key.insert(lookup_key.to_string(), resolver);
        self
    }
}

impl Default for LookupRegistry {
    fn default() -> Self {
        Self::new(Arc::new(IdentityResolver))
    }
}

impl LookupResolver for LookupRegistry {
    fn resolve(&self, lookup_key: &str, raw_value: &str) -> String {
        self.by_key
            .get(lookup_key)
            .unwrap_or(&self.fallback)
            .resolve(lookup_key, raw_value)
    }
}

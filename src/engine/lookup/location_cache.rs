use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::engine::errors::LookupError;
use crate::engine::lookup::resolver::LookupResolver;
use crate::shared::config::{CONFIG, LookupConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub location_code: String,
    pub name: String,
    #[serde(default)]
    pub admin_level: u8,
}

/// The location lookup table.
pub trait LocationSource: Send + Sync {
    /// Largest identifier in the table; `None` when it is empty.
    fn max_id(&self) -> Result<Option<i64>, LookupError>;
    fn load_all(&self) -> Result<Vec<Location>, LookupError>;
}

/// Location table held in memory, e.g. loaded from a JSON export.
#[derive(Debug, Default)]
pub struct InMemoryLocations {
    rows: RwLock<Vec<Location>>,
}

impl InMemoryLocations {
    pub fn new(rows: Vec<Location>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }

    pub fn push(&self, location: Location) {
        self.rows.write().push(location);
    }

    /// Renames a location in place; the max identifier does not change.
    pub fn rename(&self, location_code: &str, name: &str) {
        for row in self.rows.write().iter_mut() {
            if row.location_code == location_code {
                row.name = name.to_string();
            }
        }
    }
}

impl LocationSource for InMemoryLocations {
    fn max_id(&self) -> Result<Option<i64>, LookupError> {
        Ok(self.rows.read().iter().map(|l| l.id).max())
    }

    fn load_all(&self) -> Result<Vec<Location>, LookupError> {
        Ok(self.rows.read().clone())
    }
}

/// Version-stamped cache key: `locations/<max_id>`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct LocationCacheKey {
    pub max_id: Option<i64>,
}

impl fmt::Display for LocationCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_id {
            Some(id) => write!(f, "locations/{id}"),
            None => f.write_str("locations/empty"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub reloads: u64,
}

pub type LocationIndex = Arc<HashMap<String, Location>>;

struct CachedLocations {
    loaded_at: Instant,
    by_code: LocationIndex,
}

/// Read-through cache of the full location table.
///
/// Entries are keyed by the table's max identifier, so adding a location
/// switches to a fresh key. Renames and deletions that leave the max id
/// unchanged stay invisible until the entry outlives `ttl`.
pub struct LocationCache<S> {
    source: S,
    ttl: Duration,
    inner: Mutex<LruCache<LocationCacheKey, CachedLocations>>,
    hits: AtomicU64,
    misses: AtomicU64,
    reloads: AtomicU64,
}

impl<S: LocationSource> LocationCache<S> {
    pub fn new(source: S, ttl: Duration, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            ttl,
            inner: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            reloads: AtomicU64::new(0),
        }
    }

    pub fn with_config(source: S, config: &LookupConfig) -> Self {
        Self::new(
            source,
            Duration::from_secs(config.location_cache_ttl_hours * 3600),
            config.location_cache_capacity,
        )
    }

    pub fn from_app_config(source: S) -> Self {
        Self::with_config(source, &CONFIG.lookups)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn get(&self) -> Result<LocationIndex, LookupError> {
        self.get_at(Instant::now()).map(|(index, _)| index)
    }

    /// Cache lookup as of `now`.
    pub fn get_at(&self, now: Instant) -> Result<(LocationIndex, CacheOutcome), LookupError> {
        let key = LocationCacheKey {
            max_id: self.source.max_id()?,
        };

        let outcome = {
            let mut guard = self.inner.lock();
            match guard.get(&key) {
                Some(entry) if now.saturating_duration_since(entry.loaded_at) < self.ttl => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok((Arc::clone(&entry.by_code), CacheOutcome::Hit));
                }
                Some(_) => CacheOutcome::Reload,
                None => CacheOutcome::Miss,
            }
        };

        let locations = self.source.load_all()?;
        let by_code: LocationIndex = Arc::new(
            locations
                .into_iter()
                .map(|l| (l.location_code.clone(), l))
                .collect(),
        );
        match outcome {
            CacheOutcome::Reload => self.reloads.fetch_add(1, Ordering::Relaxed),
            _ => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        info!(
            target: "indicator_engine::lookup",
            key = %key,
            locations = by_code.len(),
            outcome = ?outcome,
            "Location cache loaded"
        );

        self.inner.lock().put(
            key,
            CachedLocations {
                loaded_at: now,
                by_code: Arc::clone(&by_code),
            },
        );
        Ok((by_code, outcome))
    }

    pub fn stats(&self) -> LocationCacheStats {
        LocationCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reloads: self.reloads.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
        debug!(target: "indicator_engine::lookup", "Location cache cleared");
    }
}

/// Resolves location codes to names through a shared `LocationCache`.
pub struct LocationLookup<S> {
    cache: Arc<LocationCache<S>>,
}

impl<S: LocationSource> LocationLookup<S> {
    pub fn new(cache: Arc<LocationCache<S>>) -> Self {
        Self { cache }
    }
}

impl<S: LocationSource> LookupResolver for LocationLookup<S> {
    fn resolve(&self, lookup_key: &str, raw_value: &str) -> String {
        match self.cache.get() {
            Ok(index) => index
                .get(raw_value)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| raw_value.to_string()),
            Err(e) => {
                warn!(
                    target: "indicator_engine::lookup",
                    lookup_key,
                    error = %e,
                    "Location lookup failed, using raw value"
                );
                raw_value.to_string()
            }
        }
    }
}

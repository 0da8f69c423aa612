pub mod location_cache;
pub mod resolver;

pub use location_cache::{
    CacheOutcome, InMemoryLocations, Location, LocationCache, LocationCacheKey, LocationCacheStats,
    LocationIndex, LocationLookup, LocationSource,
};
pub use resolver::{IdentityResolver, LookupRegistry, LookupResolver, StaticLookups};

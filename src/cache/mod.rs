/// In-memory caching
///
/// - `config`: TTL and capacity settings
/// - `single_flight`: single-entry cache coalescing concurrent loads
/// - `stats`: hit/miss and load metrics
pub mod config;
pub mod single_flight;
pub mod stats;

pub use config::CacheConfig;
pub use single_flight::SingleFlightCache;
pub use stats::{CacheStats, CacheStatsSnapshot};

use crate::dashboard::GlobalResponse;

/// Cache holding the one dashboard snapshot
pub type DashboardCache = SingleFlightCache<GlobalResponse>;

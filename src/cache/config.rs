/// Cache configuration
///
/// The snapshot entry lives for the poll interval minus a safety buffer, so a
/// broadcast tick never lands on a snapshot that is still valid but about to
/// expire. The window never drops below [`MIN_TTL`].
use crate::config::DashboardConfig;
use std::time::Duration;

pub const MIN_TTL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Time-to-live of a filled entry
    pub ttl: Duration,

    /// Maximum number of entries (the dashboard uses a single one)
    pub capacity: usize,
}

impl CacheConfig {
    /// Dashboard snapshot cache, derived from the `[dashboard]` section
    pub fn dashboard(config: &DashboardConfig) -> Self {
        Self::from_poll_interval(
            config.polling_interval_ms(),
            config.cache_validity_buffer_ms,
            config.cache_max_items,
        )
    }

    pub fn from_poll_interval(poll_ms: u64, buffer_ms: u64, capacity: usize) -> Self {
        let ttl = Duration::from_millis(poll_ms.saturating_sub(buffer_ms)).max(MIN_TTL);
        Self { ttl, capacity }
    }
}

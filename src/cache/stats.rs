/// Cache metrics for monitoring
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    load_successes: AtomicU64,
    load_failures: AtomicU64,
    total_load_time_ns: AtomicU64,
    invalidations: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    /// Callers that attached to a fetch already in flight
    pub coalesced: u64,
    pub load_successes: u64,
    pub load_failures: u64,
    pub total_load_time_ms: f64,
    pub average_load_penalty_ms: f64,
    pub invalidations: u64,
    pub hit_rate: f64,
    pub ttl_ms: u64,
    pub max_items: usize,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_coalesced(&self) {
        self.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load(&self, elapsed: Duration, success: bool) {
        if success {
            self.load_successes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.load_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.total_load_time_ns
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, ttl: Duration, max_items: usize) -> CacheStatsSnapshot {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let coalesced = self.coalesced.load(Ordering::Relaxed);
        let load_successes = self.load_successes.load(Ordering::Relaxed);
        let load_failures = self.load_failures.load(Ordering::Relaxed);
        let total_load_time_ms =
            self.total_load_time_ns.load(Ordering::Relaxed) as f64 / 1_000_000.0;

        let loads = load_successes + load_failures;
        let requests = hits + misses + coalesced;

        CacheStatsSnapshot {
            hits,
            misses,
            coalesced,
            load_successes,
            load_failures,
            total_load_time_ms,
            average_load_penalty_ms: if loads == 0 {
                0.0
            } else {
                total_load_time_ms / loads as f64
            },
            invalidations: self.invalidations.load(Ordering::Relaxed),
            hit_rate: if requests == 0 {
                0.0
            } else {
                hits as f64 / requests as f64
            },
            ttl_ms: ttl.as_millis() as u64,
            max_items,
        }
    }
}

//! Single-entry cache with single-flight loading
//!
//! Slot lifecycle: `Empty -> Pending -> Filled -> (expired) -> Pending -> ...`
//!
//! - A caller finding a valid `Filled` entry returns immediately.
//! - A caller finding `Pending` attaches to the fetch in flight.
//! - Otherwise the caller starts the supplier on its own task, so the fetch
//!   completes (and fills the slot) even when every waiting caller goes away.
//! - A failed fetch is released to every attached caller and leaves the slot
//!   `Empty`.
//! - `invalidate_all` bumps the generation; a fetch that completes for an old
//!   generation does not write back.
use super::config::CacheConfig;
use super::stats::{CacheStats, CacheStatsSnapshot};
use crate::errors::CacheError;
use crate::logger::{self, LogTag};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, CacheError>>>;

enum Slot<V> {
    Empty,
    Pending {
        generation: u64,
        fetch: SharedFetch<V>,
    },
    Filled {
        value: V,
        created_at: Instant,
    },
}

struct State<V> {
    slot: Slot<V>,
    generation: u64,
}

struct Inner<V> {
    state: Mutex<State<V>>,
    stats: CacheStats,
    config: CacheConfig,
}

impl<V: Clone> Inner<V> {
    /// Settle the fetch started for `generation`
    fn complete(&self, generation: u64, result: &Result<V, CacheError>, elapsed: Duration) {
        self.stats.record_load(elapsed, result.is_ok());

        let mut state = self.state.lock();
        let current = matches!(
            &state.slot,
            Slot::Pending { generation: g, .. } if *g == generation
        );
        if !current {
            logger::debug(
                LogTag::Cache,
                "Discarding fetch result invalidated while in flight",
            );
            return;
        }

        state.slot = match result {
            Ok(value) => Slot::Filled {
                value: value.clone(),
                created_at: Instant::now(),
            },
            Err(_) => Slot::Empty,
        };
    }
}

pub struct SingleFlightCache<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for SingleFlightCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SingleFlightCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    slot: Slot::Empty,
                    generation: 0,
                }),
                stats: CacheStats::default(),
                config,
            }),
        }
    }

    /// Return the cached value, or the result of the one fetch in flight,
    /// starting it with `supplier` when there is none.
    pub async fn get_or_fetch<F, Fut, E>(&self, supplier: F) -> Result<V, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let fetch = {
            let mut guard = self.inner.state.lock();
            let state = &mut *guard;
            match &state.slot {
                Slot::Filled { value, created_at }
                    if created_at.elapsed() < self.inner.config.ttl =>
                {
                    self.inner.stats.record_hit();
                    logger::debug(LogTag::Cache, "Cache hit");
                    return Ok(value.clone());
                }
                Slot::Pending { fetch, .. } => {
                    self.inner.stats.record_coalesced();
                    logger::debug(LogTag::Cache, "Joining fetch already in flight");
                    fetch.clone()
                }
                _ => {
                    self.inner.stats.record_miss();
                    logger::debug(LogTag::Cache, "Cache miss, starting fetch");

                    state.generation += 1;
                    let generation = state.generation;
                    let fetch = self.start_fetch(generation, supplier());
                    state.slot = Slot::Pending {
                        generation,
                        fetch: fetch.clone(),
                    };
                    fetch
                }
            }
        };

        fetch.await
    }

    fn start_fetch<Fut, E>(&self, generation: u64, supplied: Fut) -> SharedFetch<V>
    where
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let task_inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let result = supplied
                .await
                .map_err(|e| CacheError::FetchFailed(e.to_string()));
            task_inner.complete(generation, &result, start.elapsed());
            result
        });

        let inner = Arc::clone(&self.inner);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    // The task never reached `complete`
                    let error = CacheError::FetchAborted(e.to_string());
                    inner.complete(generation, &Err(error.clone()), Duration::ZERO);
                    logger::error(LogTag::Cache, &format!("Fetch task died: {}", e));
                    Err(error)
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Drop the entry unconditionally; the next caller always fetches
    pub fn invalidate_all(&self) {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        state.slot = Slot::Empty;
        self.inner.stats.record_invalidation();
        logger::debug(LogTag::Cache, "Cache invalidated");
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.inner
            .stats
            .snapshot(self.inner.config.ttl, self.inner.config.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache<V: Clone + Send + Sync + 'static>() -> SingleFlightCache<V> {
        SingleFlightCache::new(CacheConfig::from_poll_interval(5000, 100, 1))
    }

    /// Supplier counting its invocations, answering `value` after `delay`
    fn counted(
        calls: &Arc<AtomicUsize>,
        value: u64,
        delay: Duration,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<u64, String>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(delay).await;
                Ok(value)
            }
            .boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = cache::<u64>();
        let calls = Arc::new(AtomicUsize::new(0));

        let results = futures::future::join_all(
            (0..5).map(|i| cache.get_or_fetch(counted(&calls, 42 + i, Duration::from_millis(100)))),
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for result in results {
            assert_eq!(result, Ok(42));
        }

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.coalesced, 4);
        assert_eq!(stats.load_successes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiry_triggers_one_refetch() {
        let cache = cache::<u64>();
        let calls = Arc::new(AtomicUsize::new(0));

        assert_eq!(cache.get_or_fetch(counted(&calls, 1, Duration::ZERO)).await, Ok(1));

        tokio::time::advance(Duration::from_millis(4800)).await;
        assert_eq!(cache.get_or_fetch(counted(&calls, 2, Duration::ZERO)).await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(cache.get_or_fetch(counted(&calls, 3, Duration::ZERO)).await, Ok(3));
        assert_eq!(cache.get_or_fetch(counted(&calls, 4, Duration::ZERO)).await, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_shared_and_not_cached() {
        let cache = cache::<u64>();
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = |calls: &Arc<AtomicUsize>| {
            let calls = Arc::clone(calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Err::<u64, _>("node unreachable")
                }
            }
        };

        let (a, b) = tokio::join!(
            cache.get_or_fetch(failing(&calls)),
            cache.get_or_fetch(failing(&calls)),
        );
        let expected = Err(CacheError::FetchFailed("node unreachable".to_string()));
        assert_eq!(a, expected);
        assert_eq!(b, expected);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(cache.get_or_fetch(counted(&calls, 7, Duration::ZERO)).await, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().load_failures, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_none_value_is_cached() {
        let cache = cache::<Option<u64>>();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            let value = cache
                .get_or_fetch(move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok::<_, String>(None) }
                })
                .await;
            assert_eq!(value, Ok(None));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_all_forces_refetch() {
        let cache = cache::<u64>();
        let calls = Arc::new(AtomicUsize::new(0));

        assert_eq!(cache.get_or_fetch(counted(&calls, 1, Duration::ZERO)).await, Ok(1));
        cache.invalidate_all();
        assert_eq!(cache.get_or_fetch(counted(&calls, 2, Duration::ZERO)).await, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_during_fetch_discards_result() {
        let cache = cache::<u64>();
        let calls = Arc::new(AtomicUsize::new(0));

        let in_flight = {
            let cache = cache.clone();
            let supplier = counted(&calls, 1, Duration::from_millis(100));
            tokio::spawn(async move { cache.get_or_fetch(supplier).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.invalidate_all();

        // The attached caller still gets its value
        assert_eq!(in_flight.await.unwrap(), Ok(1));

        assert_eq!(cache.get_or_fetch(counted(&calls, 2, Duration::ZERO)).await, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_survives_dropped_callers() {
        let cache = cache::<u64>();
        let calls = Arc::new(AtomicUsize::new(0));

        let caller = {
            let cache = cache.clone();
            let supplier = counted(&calls, 9, Duration::from_millis(100));
            tokio::spawn(async move { cache.get_or_fetch(supplier).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        caller.abort();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get_or_fetch(counted(&calls, 10, Duration::ZERO)).await, Ok(9));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panicking_supplier_resets_slot() {
        let cache = cache::<u64>();

        let result = cache
            .get_or_fetch(|| async {
                if true {
                    panic!("supplier blew up");
                }
                Ok::<u64, String>(0)
            })
            .await;
        assert!(matches!(result, Err(CacheError::FetchAborted(_))));

        let result = cache.get_or_fetch(|| async { Ok::<u64, String>(5) }).await;
        assert_eq!(result, Ok(5));
    }
}

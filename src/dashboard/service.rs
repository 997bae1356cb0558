//! Cached access to the dashboard snapshot
//!
//! Every reader (broadcast ticks, HTTP, newly joined sockets) goes through
//! here, so all of them share the cache's single in-flight fetch.
use super::aggregator::Aggregator;
use super::models::GlobalResponse;
use crate::cache::{CacheConfig, CacheStatsSnapshot, DashboardCache};
use crate::errors::CacheError;
use std::convert::Infallible;

#[derive(Clone)]
pub struct DashboardService {
    aggregator: Aggregator,
    cache: DashboardCache,
}

impl DashboardService {
    pub fn new(aggregator: Aggregator, cache_config: CacheConfig) -> Self {
        Self {
            aggregator,
            cache: DashboardCache::new(cache_config),
        }
    }

    pub async fn snapshot(&self) -> Result<GlobalResponse, CacheError> {
        let aggregator = self.aggregator.clone();
        self.cache
            .get_or_fetch(move || async move { Ok::<_, Infallible>(aggregator.fetch().await) })
            .await
    }

    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.cache.stats()
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::testing::MockNode;
    use crate::rpc::types::GET_PEER_INFO;
    use crate::rpc::RpcGateway;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_readers_issue_one_round_of_calls() {
        let node = MockNode::healthy();
        node.delay(GET_PEER_INFO, Duration::from_millis(100));
        let gateway = RpcGateway::new(node.clone(), Duration::from_secs(1));
        let service = DashboardService::new(
            Aggregator::new(gateway, false),
            CacheConfig::from_poll_interval(5000, 100, 1),
        );

        let results = futures::future::join_all((0..5).map(|_| service.snapshot())).await;

        assert_eq!(node.calls_for(GET_PEER_INFO), 1);
        assert_eq!(node.total_calls(), 7);
        let first = results[0].clone().unwrap();
        for result in results {
            assert_eq!(result.unwrap(), first);
        }

        service.invalidate();
        service.snapshot().await.unwrap();
        assert_eq!(node.calls_for(GET_PEER_INFO), 2);
    }
}

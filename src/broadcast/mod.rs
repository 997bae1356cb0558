/// Periodic push of the dashboard snapshot to live subscribers
///
/// Structure:
/// - `hub`: the subscriber registry
/// - `payload`: serialized snapshot / degraded messages
///
/// One task ticks at the poll interval, reads the snapshot through the cache
/// and pushes it, serialized once, to every subscriber.
pub mod hub;
pub mod payload;

pub use hub::{BroadcastReport, Payload, SubscriberId, SubscriberRegistry};

use crate::dashboard::DashboardService;
use crate::logger::{self, LogTag};
use crate::shutdown::ShutdownHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub struct BroadcastLoop {
    service: DashboardService,
    registry: Arc<SubscriberRegistry>,
    period: Duration,
}

impl BroadcastLoop {
    pub fn new(service: DashboardService, registry: Arc<SubscriberRegistry>, period: Duration) -> Self {
        Self {
            service,
            registry,
            period,
        }
    }

    /// Current message for subscribers, read through the cache
    pub async fn current_payload(service: &DashboardService) -> Payload {
        payload::render(&service.snapshot().await)
    }

    /// One cycle. Skipped entirely (no fetch) while nobody is subscribed.
    pub async fn tick(&self) -> Option<BroadcastReport> {
        let subscribers = self.registry.active_subscribers().await;
        if subscribers == 0 {
            logger::verbose(LogTag::Broadcast, "No subscribers, skipping tick");
            return None;
        }

        let payload = Self::current_payload(&self.service).await;
        let report = self.registry.broadcast(payload).await;

        logger::debug(
            LogTag::Broadcast,
            &format!(
                "Broadcast to {} subscribers (sent={}, dropped={}, removed={})",
                subscribers, report.sent, report.dropped, report.removed
            ),
        );
        Some(report)
    }

    /// Tick until `shutdown` fires
    pub async fn run(self, shutdown: ShutdownHandle) {
        logger::info(
            LogTag::Broadcast,
            &format!("Broadcast loop started (every {} ms)", self.period.as_millis()),
        );

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        logger::info(LogTag::Broadcast, "Broadcast loop stopped");
    }

    pub fn spawn(self, shutdown: ShutdownHandle) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::dashboard::Aggregator;
    use crate::rpc::testing::MockNode;
    use crate::rpc::types::GET_PEER_INFO;
    use crate::rpc::RpcGateway;
    use serde_json::Value;

    const POLL: Duration = Duration::from_millis(1000);

    fn service(node: &Arc<MockNode>) -> DashboardService {
        let gateway = RpcGateway::new(node.clone(), Duration::from_millis(500));
        DashboardService::new(
            Aggregator::new(gateway, false),
            CacheConfig::from_poll_interval(POLL.as_millis() as u64, 100, 1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_without_subscribers_does_not_fetch() {
        let node = MockNode::healthy();
        let registry = SubscriberRegistry::new(10, 4);
        let broadcast = BroadcastLoop::new(service(&node), registry, POLL);

        assert_eq!(broadcast.tick().await, None);
        assert_eq!(node.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_pushes_snapshot() {
        let node = MockNode::healthy();
        let registry = SubscriberRegistry::new(10, 4);
        let (_id, mut rx) = registry.join().await.unwrap();
        let broadcast = BroadcastLoop::new(service(&node), registry, POLL);

        let report = broadcast.tick().await.unwrap();
        assert_eq!(report.sent, 1);

        let value: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(value["rpcConnected"], true);
        assert_eq!(value["generalStats"]["totalPeers"], 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_node_pushes_degraded_payload() {
        let node = MockNode::unreachable();
        let registry = SubscriberRegistry::new(10, 4);
        let (_id, mut rx) = registry.join().await.unwrap();
        let broadcast = BroadcastLoop::new(service(&node), registry, POLL);

        broadcast.tick().await.unwrap();

        let value: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(value["rpcConnected"], false);
        assert!(value["errorMessage"]
            .as_str()
            .unwrap()
            .starts_with("Failed to fetch data: "));
        assert!(value.get("generalStats").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_and_stops_on_shutdown() {
        let node = MockNode::healthy();
        let registry = SubscriberRegistry::new(10, 16);
        let (_id, mut rx) = registry.join().await.unwrap();
        let shutdown = ShutdownHandle::new();

        let handle = BroadcastLoop::new(service(&node), registry, POLL).spawn(shutdown.clone());

        // First tick fires immediately, then one per poll interval
        rx.recv().await.unwrap();
        rx.recv().await.unwrap();
        rx.recv().await.unwrap();
        // TTL (900 ms) is shorter than the period, so every tick refetches
        assert_eq!(node.calls_for(GET_PEER_INFO), 3);

        shutdown.trigger();
        handle.await.unwrap();
    }
}

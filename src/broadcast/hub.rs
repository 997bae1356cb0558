/// Live subscriber registry
///
/// Each subscriber owns a bounded queue of serialized payloads. A broadcast
/// hands the same `Arc<str>` to every queue; a full queue drops that one
/// message, a closed queue removes the subscriber.
use crate::errors::SubscriberError;
use crate::logger::{self, LogTag};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Subscriber ID (unique per live connection)
pub type SubscriberId = u64;

/// One complete serialized message
pub type Payload = Arc<str>;

pub const DEFAULT_BUFFER_SIZE: usize = 8;

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub sent: usize,
    /// Queue full, message skipped for this subscriber
    pub dropped: usize,
    /// Subscriber gone, removed from the registry
    pub removed: usize,
}

pub struct SubscriberRegistry {
    connections: RwLock<HashMap<SubscriberId, mpsc::Sender<Payload>>>,
    next_id: AtomicU64,
    max_sessions: usize,
    buffer_size: usize,
}

impl SubscriberRegistry {
    pub fn new(max_sessions: usize, buffer_size: usize) -> Arc<Self> {
        Arc::new(Self {
            connections: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            max_sessions,
            buffer_size: buffer_size.max(1),
        })
    }

    /// Whether a `join` would currently be accepted; registers nothing
    pub async fn check_capacity(&self) -> Result<(), SubscriberError> {
        let live = self.connections.read().await.len();
        self.ensure_room(live)
    }

    /// Register a new subscriber, refused once `max_sessions` are live
    pub async fn join(&self) -> Result<(SubscriberId, mpsc::Receiver<Payload>), SubscriberError> {
        let mut connections = self.connections.write().await;
        self.ensure_room(connections.len())?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.buffer_size);
        connections.insert(id, tx);

        logger::debug(
            LogTag::Broadcast,
            &format!("Subscriber {} joined (active={})", id, connections.len()),
        );
        Ok((id, rx))
    }

    fn ensure_room(&self, live: usize) -> Result<(), SubscriberError> {
        if live >= self.max_sessions {
            logger::warning(
                LogTag::Broadcast,
                &format!("Subscriber refused: {} sessions live", live),
            );
            return Err(SubscriberError::SessionLimit(self.max_sessions));
        }
        Ok(())
    }

    pub async fn leave(&self, id: SubscriberId) {
        let mut connections = self.connections.write().await;
        if connections.remove(&id).is_some() {
            logger::debug(
                LogTag::Broadcast,
                &format!("Subscriber {} left (active={})", id, connections.len()),
            );
        }
    }

    pub async fn broadcast(&self, payload: Payload) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let mut closed = Vec::new();

        {
            let connections = self.connections.read().await;
            for (id, sender) in connections.iter() {
                match sender.try_send(Arc::clone(&payload)) {
                    Ok(()) => report.sent += 1,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        report.dropped += 1;
                        logger::debug(
                            LogTag::Broadcast,
                            &format!("Message dropped for subscriber {} (queue full)", id),
                        );
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*id),
                }
            }
        }

        if !closed.is_empty() {
            let mut connections = self.connections.write().await;
            for id in &closed {
                connections.remove(id);
            }
            report.removed = closed.len();
        }

        report
    }

    pub async fn active_subscribers(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_and_leave() {
        let registry = SubscriberRegistry::new(10, 4);

        let (a, _rx_a) = registry.join().await.unwrap();
        let (b, _rx_b) = registry.join().await.unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.active_subscribers().await, 2);

        registry.leave(a).await;
        registry.leave(a).await;
        assert_eq!(registry.active_subscribers().await, 1);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let registry = SubscriberRegistry::new(1, 4);
        assert_eq!(registry.check_capacity().await, Ok(()));
        assert_eq!(registry.active_subscribers().await, 0);

        let (id, _rx) = registry.join().await.unwrap();
        assert_eq!(
            registry.check_capacity().await,
            Err(SubscriberError::SessionLimit(1))
        );
        assert_eq!(
            registry.join().await.unwrap_err(),
            SubscriberError::SessionLimit(1)
        );

        registry.leave(id).await;
        assert_eq!(registry.check_capacity().await, Ok(()));
    }

    #[tokio::test]
    async fn test_broadcast_delivers_whole_payload() {
        let registry = SubscriberRegistry::new(10, 4);
        let (_a, mut rx_a) = registry.join().await.unwrap();
        let (_b, mut rx_b) = registry.join().await.unwrap();

        let report = registry.broadcast(Arc::from(r#"{"rpcConnected":true}"#)).await;
        assert_eq!(report.sent, 2);

        assert_eq!(&*rx_a.recv().await.unwrap(), r#"{"rpcConnected":true}"#);
        assert_eq!(&*rx_b.recv().await.unwrap(), r#"{"rpcConnected":true}"#);
    }

    #[tokio::test]
    async fn test_full_queue_drops_and_closed_queue_is_removed() {
        let registry = SubscriberRegistry::new(10, 1);
        let (_slow, _rx_slow) = registry.join().await.unwrap();
        let (_gone, rx_gone) = registry.join().await.unwrap();
        drop(rx_gone);

        let first = registry.broadcast(Arc::from("1")).await;
        assert_eq!(first.sent, 1);
        assert_eq!(first.removed, 1);
        assert_eq!(registry.active_subscribers().await, 1);

        let second = registry.broadcast(Arc::from("2")).await;
        assert_eq!(second.dropped, 1);
    }
}

//! RPC gateway: method name + positional params in, decoded result or typed failure out
//!
//! The gateway never retries. Every call is bounded by the configured
//! timeout; a call that runs out of time fails like any other connection
//! failure.
use super::stats::RpcStats;
use super::transport::{HttpTransport, RpcTransport, TransportError};
use super::types::*;
use crate::config::RpcConfig;
use crate::errors::{RpcFailure, RpcResult};
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct RpcGateway {
    transport: Arc<dyn RpcTransport>,
    timeout: Duration,
    stats: Arc<RpcStats>,
}

impl RpcGateway {
    pub fn new(transport: Arc<dyn RpcTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            stats: Arc::new(RpcStats::new()),
        }
    }

    /// Gateway over HTTP with Basic-Auth, built from the `[rpc]` section
    pub fn from_config(config: &RpcConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        logger::info(
            LogTag::Rpc,
            &format!("RPC gateway targeting {}", transport.endpoint()),
        );
        Ok(Self::new(
            Arc::new(transport),
            Duration::from_millis(config.timeout_ms),
        ))
    }

    pub fn stats(&self) -> Arc<RpcStats> {
        Arc::clone(&self.stats)
    }

    /// Issue one call and return its raw, non-null result
    pub async fn invoke(&self, method: &str, params: Vec<Value>) -> RpcResult<Value> {
        let request = RpcRequest::new(method, params);
        let start = Instant::now();

        let outcome = self.invoke_inner(&request).await;

        let elapsed = start.elapsed();
        self.stats.record(method, elapsed, outcome.is_ok());
        if logger::is_debug_enabled(LogTag::Rpc) {
            match &outcome {
                Ok(_) => logger::debug(
                    LogTag::Rpc,
                    &format!("RPC '{}' executed in {} ms", method, elapsed.as_millis()),
                ),
                Err(e) => logger::debug(
                    LogTag::Rpc,
                    &format!("RPC '{}' failed after {} ms: {}", method, elapsed.as_millis(), e),
                ),
            }
        }

        outcome
    }

    async fn invoke_inner(&self, request: &RpcRequest) -> RpcResult<Value> {
        let method = request.method.as_str();

        let body = match tokio::time::timeout(self.timeout, self.transport.invoke(request)).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                return Err(RpcFailure::ConnectionFailure {
                    method: method.to_string(),
                    cause: e.to_string(),
                })
            }
            Err(_) => {
                return Err(RpcFailure::ConnectionFailure {
                    method: method.to_string(),
                    cause: format!("timed out after {} ms", self.timeout.as_millis()),
                })
            }
        };

        logger::verbose(LogTag::Rpc, &format!("RPC '{}' raw response: {}", method, body));

        let envelope: RpcResponse =
            serde_json::from_str(&body).map_err(|e| RpcFailure::ParseFailure {
                method: method.to_string(),
                detail: format!("invalid response envelope: {}", e),
            })?;

        if let Some(error) = envelope.error {
            return Err(node_error(method, error));
        }

        match envelope.result {
            Some(result) => Ok(result),
            None => Err(RpcFailure::EmptyResult {
                method: method.to_string(),
            }),
        }
    }

    /// Issue one call and decode its result into `T`
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> RpcResult<T> {
        let value = self.invoke(method, params).await?;
        serde_json::from_value(value).map_err(|e| RpcFailure::ParseFailure {
            method: method.to_string(),
            detail: e.to_string(),
        })
    }

    pub async fn get_peer_info(&self) -> RpcResult<Vec<PeerInfoResponse>> {
        self.call(GET_PEER_INFO, Vec::new()).await
    }

    pub async fn get_blockchain_info(&self) -> RpcResult<BlockchainInfoResponse> {
        self.call(GET_BLOCKCHAIN_INFO, Vec::new()).await
    }

    pub async fn get_network_info(&self) -> RpcResult<NetworkInfoResponse> {
        self.call(GET_NETWORK_INFO, Vec::new()).await
    }

    /// Node uptime in seconds
    pub async fn uptime(&self) -> RpcResult<u64> {
        self.call(UPTIME, Vec::new()).await
    }

    pub async fn get_best_block_hash(&self) -> RpcResult<String> {
        self.call(GET_BEST_BLOCK_HASH, Vec::new()).await
    }

    /// Block header-level detail (verbosity 1)
    pub async fn get_block(&self, hash: &str) -> RpcResult<BlockInfoResponse> {
        self.call(GET_BLOCK, vec![json!(hash), json!(1)]).await
    }

    pub async fn get_mempool_info(&self) -> RpcResult<MempoolInfoResponse> {
        self.call(GET_MEMPOOL_INFO, Vec::new()).await
    }
}

fn node_error(method: &str, error: Value) -> RpcFailure {
    match serde_json::from_value::<RpcErrorObject>(error.clone()) {
        Ok(obj) => RpcFailure::NodeError {
            method: method.to_string(),
            code: obj.code,
            message: obj.message,
        },
        Err(_) => RpcFailure::NodeError {
            method: method.to_string(),
            code: 0,
            message: match error {
                Value::String(s) => s,
                other => other.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::testing::MockNode;

    fn gateway(node: &Arc<MockNode>) -> RpcGateway {
        RpcGateway::new(node.clone(), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_decodes_successful_result() {
        let node = MockNode::healthy();
        let uptime = gateway(&node).uptime().await.unwrap();
        assert_eq!(uptime, 93784);
        assert_eq!(node.calls_for(UPTIME), 1);
    }

    #[tokio::test]
    async fn test_node_error_is_typed() {
        let node = MockNode::healthy();
        node.respond_raw(
            GET_BLOCKCHAIN_INFO,
            r#"{"result":null,"error":{"code":-28,"message":"Loading block index..."},"id":"x"}"#,
        );

        let err = gateway(&node).get_blockchain_info().await.unwrap_err();
        assert_eq!(
            err,
            RpcFailure::NodeError {
                method: GET_BLOCKCHAIN_INFO.to_string(),
                code: -28,
                message: "Loading block index...".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_null_result_is_empty_result() {
        let node = MockNode::healthy();
        node.respond_raw(UPTIME, r#"{"result":null,"error":null,"id":"x"}"#);

        let err = gateway(&node).uptime().await.unwrap_err();
        assert!(matches!(err, RpcFailure::EmptyResult { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_failure() {
        let node = MockNode::healthy();
        node.respond_raw(GET_NETWORK_INFO, "<html>502 Bad Gateway</html>");

        let err = gateway(&node).get_network_info().await.unwrap_err();
        assert!(matches!(err, RpcFailure::ParseFailure { .. }));
    }

    #[tokio::test]
    async fn test_wrong_result_shape_is_parse_failure() {
        let node = MockNode::healthy();
        node.respond_raw(UPTIME, r#"{"result":"soon","error":null,"id":"x"}"#);

        let err = gateway(&node).uptime().await.unwrap_err();
        assert!(matches!(err, RpcFailure::ParseFailure { ref method, .. } if method == UPTIME));
    }

    #[tokio::test]
    async fn test_transport_fault_is_connection_failure() {
        let node = MockNode::healthy();
        node.fail_transport(GET_PEER_INFO, "connection refused");

        let err = gateway(&node).get_peer_info().await.unwrap_err();
        assert_eq!(
            err,
            RpcFailure::ConnectionFailure {
                method: GET_PEER_INFO.to_string(),
                cause: "connection refused".to_string(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_connection_failure_without_retry() {
        let node = MockNode::healthy();
        node.delay(UPTIME, Duration::from_secs(5));

        let err = gateway(&node).uptime().await.unwrap_err();
        assert!(err.is_connection_failure());
        assert!(err.to_string().contains("timed out"));
        assert_eq!(node.calls_for(UPTIME), 1);
    }

    #[tokio::test]
    async fn test_get_block_sends_hash_and_verbosity() {
        let node = MockNode::healthy();
        let block = gateway(&node).get_block(crate::rpc::testing::BEST_HASH).await.unwrap();
        assert_eq!(block.n_tx, 2500);

        let request = node.last_request(GET_BLOCK).unwrap();
        assert_eq!(request.params, vec![json!(crate::rpc::testing::BEST_HASH), json!(1)]);
        assert_eq!(request.id, "nodepulse-getblock");
    }

    #[tokio::test]
    async fn test_stats_count_failures() {
        let node = MockNode::healthy();
        node.fail_transport(UPTIME, "reset");
        let gateway = gateway(&node);

        let _ = gateway.uptime().await;
        let _ = gateway.get_best_block_hash().await;

        let snapshot = gateway.stats().snapshot();
        assert_eq!(snapshot.total_calls, 2);
        assert_eq!(snapshot.total_errors, 1);
        assert_eq!(snapshot.errors_per_method[UPTIME], 1);
    }
}

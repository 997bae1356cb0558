//! In-memory node for tests
//!
//! Answers every method the dashboard uses with fixed fixtures; individual
//! methods can be overridden with raw bodies, transport faults or delays.
use super::transport::{RpcTransport, TransportError};
use super::types::*;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const BEST_HASH: &str = "00000000000000000002a7c4c1e48d76c5a37902165a270156b7a8d72728a054";
pub const UPTIME_SECS: u64 = 93784;

#[derive(Clone)]
enum Reply {
    Body(String),
    Fault(String),
}

#[derive(Default)]
pub struct MockNode {
    replies: Mutex<HashMap<String, Reply>>,
    delays: Mutex<HashMap<String, Duration>>,
    requests: Mutex<Vec<RpcRequest>>,
}

impl MockNode {
    /// Node answering every dashboard method successfully
    pub fn healthy() -> Arc<Self> {
        let node = Arc::new(Self::default());
        node.respond(GET_PEER_INFO, json!(default_peers()));
        node.respond(GET_BLOCKCHAIN_INFO, blockchain_info());
        node.respond(GET_NETWORK_INFO, network_info());
        node.respond(UPTIME, json!(UPTIME_SECS));
        node.respond(GET_BEST_BLOCK_HASH, json!(BEST_HASH));
        node.respond(GET_BLOCK, json!({"hash": BEST_HASH, "time": 1700000000, "nTx": 2500, "height": 820000}));
        node.respond(GET_MEMPOOL_INFO, mempool_info());
        node
    }

    /// Node whose every call fails at the transport level
    pub fn unreachable() -> Arc<Self> {
        let node = Arc::new(Self::default());
        for method in [
            GET_PEER_INFO,
            GET_BLOCKCHAIN_INFO,
            GET_NETWORK_INFO,
            UPTIME,
            GET_BEST_BLOCK_HASH,
            GET_BLOCK,
            GET_MEMPOOL_INFO,
        ] {
            node.fail_transport(method, "connection refused");
        }
        node
    }

    pub fn respond(&self, method: &str, result: Value) {
        let body = json!({"result": result, "error": null, "id": format!("{}{}", REQUEST_ID_PREFIX, method)});
        self.respond_raw(method, &body.to_string());
    }

    pub fn respond_raw(&self, method: &str, body: &str) {
        self.replies
            .lock()
            .insert(method.to_string(), Reply::Body(body.to_string()));
    }

    pub fn respond_error(&self, method: &str, code: i64, message: &str) {
        let body = json!({"result": null, "error": {"code": code, "message": message}, "id": null});
        self.respond_raw(method, &body.to_string());
    }

    pub fn fail_transport(&self, method: &str, cause: &str) {
        self.replies
            .lock()
            .insert(method.to_string(), Reply::Fault(cause.to_string()));
    }

    pub fn delay(&self, method: &str, delay: Duration) {
        self.delays.lock().insert(method.to_string(), delay);
    }

    pub fn calls_for(&self, method: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self, method: &str) -> Option<RpcRequest> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == method)
            .cloned()
    }
}

#[async_trait]
impl RpcTransport for MockNode {
    async fn invoke(&self, request: &RpcRequest) -> Result<String, TransportError> {
        self.requests.lock().push(request.clone());

        let delay = self.delays.lock().get(&request.method).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().get(&request.method).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fault(cause)) => Err(TransportError(cause)),
            None => Ok(json!({
                "result": null,
                "error": {"code": -32601, "message": "Method not found"},
                "id": request.id,
            })
            .to_string()),
        }
    }
}

pub fn peer(id: i64, inbound: bool, subver: Option<&str>) -> Value {
    let mut peer = json!({
        "id": id,
        "addr": format!("203.0.113.{}:8333", id),
        "conntime": 1700000000 + id,
        "bytesrecv": 1024 * (id as u64 + 1),
        "bytessent": 2048 * (id as u64 + 1),
        "minping": 0.042,
        "timeoffset": 0,
        "version": 70016,
        "inbound": inbound,
        "connection_type": if inbound { "inbound" } else { "outbound-full-relay" },
        "network": "ipv4",
        "services": "0000000000000409",
    });
    if let Some(subver) = subver {
        peer["subver"] = json!(subver);
    }
    peer
}

/// Three outbound peers (two on 27.0, one on 26.0) and one inbound on 27.0
pub fn default_peers() -> Vec<Value> {
    vec![
        peer(0, false, Some("/Satoshi:27.0.0/")),
        peer(1, false, Some("/Satoshi:27.0.0/")),
        peer(2, false, Some("/Satoshi:26.0.0/")),
        peer(3, true, Some("/Satoshi:27.0.0/")),
    ]
}

pub fn blockchain_info() -> Value {
    json!({
        "chain": "main",
        "blocks": 820000,
        "headers": 820000,
        "bestblockhash": BEST_HASH,
        "difficulty": 67957790298897.88,
        "time": 1700000000,
        "mediantime": 1699998000,
        "verificationprogress": 0.9999987,
        "initialblockdownload": false,
        "chainwork": "000000000000000000000000000000000000000058b8e6b8a2b0b3c8b6d60000",
        "size_on_disk": 600000000000u64,
        "pruned": false,
        "warnings": ""
    })
}

pub fn network_info() -> Value {
    json!({
        "version": 270000,
        "subversion": "/Satoshi:27.0.0/",
        "protocolversion": 70016,
        "localservices": "0000000000000c09",
        "networks": [
            {"name": "ipv4", "limited": false, "reachable": true, "proxy": "", "proxy_randomize_credentials": false},
            {"name": "onion", "limited": true, "reachable": false, "proxy": "", "proxy_randomize_credentials": false}
        ],
        "localaddresses": [
            {"address": "198.51.100.7", "port": 8333, "score": 4}
        ],
        "warnings": ""
    })
}

pub fn mempool_info() -> Value {
    json!({
        "loaded": true,
        "size": 4200,
        "bytes": 2100000,
        "usage": 9000000,
        "total_fee": 0.31,
        "maxmempool": 300000000,
        "mempoolminfee": 0.00001,
        "minrelaytxfee": 0.00001,
        "unbroadcastcount": 0
    })
}

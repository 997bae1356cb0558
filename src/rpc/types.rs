//! JSON-RPC envelopes and the typed results of the node methods we call
//!
//! Unknown fields are ignored; missing required fields fail decoding.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version spoken by Bitcoin Core's legacy interface
pub const JSON_RPC_VERSION: &str = "1.0";

/// Prefix of every request id
pub const REQUEST_ID_PREFIX: &str = "nodepulse-";

// Method names
pub const GET_PEER_INFO: &str = "getpeerinfo";
pub const GET_BLOCKCHAIN_INFO: &str = "getblockchaininfo";
pub const GET_NETWORK_INFO: &str = "getnetworkinfo";
pub const UPTIME: &str = "uptime";
pub const GET_BEST_BLOCK_HASH: &str = "getbestblockhash";
pub const GET_BLOCK: &str = "getblock";
pub const GET_MEMPOOL_INFO: &str = "getmempoolinfo";

// =============================================================================
// ENVELOPES
// =============================================================================

/// Outgoing request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(method: &str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION.to_string(),
            id: format!("{}{}", REQUEST_ID_PREFIX, method),
            method: method.to_string(),
            params,
        }
    }
}

/// Incoming response envelope
///
/// `error` is kept loosely typed: Bitcoin Core sends `{code, message}` but a
/// proxy in front of it may send anything.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Structured error object reported by the node
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

// =============================================================================
// METHOD RESULTS
// =============================================================================

/// One entry of `getpeerinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerInfoResponse {
    pub id: i64,
    pub addr: String,
    pub conntime: i64,
    pub bytesrecv: u64,
    pub bytessent: u64,
    /// Absent until the first pong arrives
    #[serde(default)]
    pub minping: Option<f64>,
    #[serde(default)]
    pub timeoffset: i64,
    pub version: i64,
    /// Null for peers that never completed the version handshake
    #[serde(default)]
    pub subver: Option<String>,
    pub inbound: bool,
    #[serde(default)]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

/// `getblockchaininfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockchainInfoResponse {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    pub difficulty: f64,
    /// Tip time; nodes before v23 omit it and it reads as 0
    #[serde(default)]
    pub time: i64,
    pub mediantime: i64,
    pub verificationprogress: f64,
    pub initialblockdownload: bool,
    pub chainwork: String,
    pub size_on_disk: u64,
}

/// Reachability of one network family in `getnetworkinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub limited: bool,
    pub reachable: bool,
    #[serde(default)]
    pub proxy: String,
    #[serde(default)]
    pub proxy_randomize_credentials: bool,
}

/// Advertised local address in `getnetworkinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAddress {
    pub address: String,
    pub port: u16,
    pub score: i64,
}

/// `getnetworkinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfoResponse {
    pub version: i64,
    pub subversion: String,
    pub protocolversion: i64,
    pub networks: Vec<Network>,
    pub localaddresses: Vec<LocalAddress>,
}

/// `getblock <hash> 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInfoResponse {
    pub time: i64,
    #[serde(rename = "nTx")]
    pub n_tx: u64,
}

/// `getmempoolinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolInfoResponse {
    pub size: u64,
    pub bytes: u64,
    pub usage: u64,
    pub maxmempool: u64,
    pub mempoolminfee: f64,
    pub minrelaytxfee: f64,
    // Added in later node versions
    #[serde(default)]
    pub unbroadcastcount: u64,
    #[serde(default)]
    pub total_fee: f64,
}

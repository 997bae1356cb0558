//! Snapshot types pushed to the dashboard frontend
//!
//! Field names follow the frontend's JSON contract (camelCase at the top level,
//! node field names inside the embedded views).
use crate::rpc::types::{
    BlockInfoResponse, BlockchainInfoResponse, MempoolInfoResponse, NetworkInfoResponse,
    PeerInfoResponse,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only projections of node records. Unknown node fields are already
/// dropped at decode time, so the decoded types double as views.
pub type PeerView = PeerInfoResponse;
pub type BlockchainView = BlockchainInfoResponse;
pub type NetworkView = NetworkInfoResponse;
pub type BlockView = BlockInfoResponse;
pub type MempoolView = MempoolInfoResponse;

/// Keys of [`GlobalResponse::errors`]
pub mod fields {
    pub const PEER_INFO: &str = "peerInfo";
    pub const BLOCKCHAIN_INFO: &str = "blockchainInfo";
    pub const NETWORK_INFO: &str = "networkInfo";
    pub const UPTIME: &str = "uptime";
    pub const BEST_BLOCK_HASH: &str = "bestBlockHash";
    pub const BLOCK_INFO: &str = "blockInfo";
    pub const MEMPOOL_INFO: &str = "mempoolInfo";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStats {
    pub inbound_count: usize,
    pub outbound_count: usize,
    pub total_peers: usize,
}

impl GeneralStats {
    pub fn new(inbound_count: usize, outbound_count: usize) -> Self {
        Self {
            inbound_count,
            outbound_count,
            total_peers: inbound_count + outbound_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubverStat {
    /// Client version string, e.g. `/Satoshi:27.0.0/`
    pub server: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubverDistribution {
    pub inbound: Vec<SubverStat>,
    pub outbound: Vec<SubverStat>,
}

/// One immutable dashboard snapshot
///
/// A field is `None` because its call failed, and `errors` holds the reason
/// under the matching key. `mempool_info` has one more level: the outer
/// `None` means collection is disabled and the key is left out of the JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalResponse {
    pub general_stats: Option<GeneralStats>,
    pub subver_distribution: Option<SubverDistribution>,
    pub inbound_peer: Option<Vec<PeerView>>,
    pub outbound_peer: Option<Vec<PeerView>>,
    pub blockchain_info_response: Option<BlockchainView>,
    pub node_info: Option<NetworkView>,
    /// Seconds since node start
    pub up_time: Option<u64>,
    pub block: Option<BlockView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mempool_info: Option<Option<MempoolView>>,
    pub rpc_connected: bool,
    pub errors: BTreeMap<String, String>,
}

impl GlobalResponse {
    /// True when no call of the cycle reached the node successfully
    pub fn is_disconnected(&self) -> bool {
        !self.rpc_connected
    }

    /// First recorded error, used as the reason in the degraded payload
    pub fn first_error(&self) -> Option<&str> {
        self.errors.values().next().map(String::as_str)
    }
}

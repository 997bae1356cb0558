/// API response type definitions
use serde::{Deserialize, Serialize};

/// Error body for failed API requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    /// Machine-readable kind, e.g. `node_error`, `invalid_hash`
    pub code: String,
    /// Error code reported by the node, when there is one
    #[serde(rename = "rpcCode", skip_serializing_if = "Option::is_none")]
    pub rpc_code: Option<i64>,
}

/// Settings the frontend needs to render the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendConfigResponse {
    pub min_outbound_peers: u32,
    pub disable_mempool_info: bool,
}

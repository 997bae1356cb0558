/// Uncached pass-through calls to the node
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    rpc::types::GET_BLOCK,
    utils::is_hex_hash,
    webserver::{
        state::AppState,
        utils::{error_response, rpc_error_response, success_response},
    },
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getnetworkinfo", get(get_network_info))
        .route("/getblock/:hash", get(get_block))
        .route("/getbestblockhash", get(get_best_block_hash))
        .route("/getBlockchainInfo", get(get_blockchain_info))
        .route("/getmempoolinfo", get(get_mempool_info))
}

/// GET /api/getnetworkinfo
async fn get_network_info(State(state): State<Arc<AppState>>) -> Response {
    match state.gateway().get_network_info().await {
        Ok(info) => success_response(info),
        Err(e) => rpc_error_response(&e),
    }
}

/// GET /api/getblock/:hash
///
/// Full verbosity-1 block as returned by the node
async fn get_block(State(state): State<Arc<AppState>>, Path(hash): Path<String>) -> Response {
    if !is_hex_hash(&hash) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_hash",
            "Block hash must be 64 hexadecimal characters",
        );
    }

    match state
        .gateway()
        .invoke(GET_BLOCK, vec![json!(hash), json!(1)])
        .await
    {
        Ok(block) => success_response(block),
        Err(e) => rpc_error_response(&e),
    }
}

/// GET /api/getbestblockhash (text/plain)
async fn get_best_block_hash(State(state): State<Arc<AppState>>) -> Response {
    match state.gateway().get_best_block_hash().await {
        Ok(hash) => hash.into_response(),
        Err(e) => rpc_error_response(&e),
    }
}

/// GET /api/getBlockchainInfo
async fn get_blockchain_info(State(state): State<Arc<AppState>>) -> Response {
    match state.gateway().get_blockchain_info().await {
        Ok(info) => success_response(info),
        Err(e) => rpc_error_response(&e),
    }
}

/// GET /api/getmempoolinfo
async fn get_mempool_info(State(state): State<Arc<AppState>>) -> Response {
    match state.gateway().get_mempool_info().await {
        Ok(info) => success_response(info),
        Err(e) => rpc_error_response(&e),
    }
}

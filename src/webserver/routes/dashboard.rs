use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use std::sync::Arc;

use crate::{
    broadcast::payload,
    logger::{self, LogTag},
    webserver::{
        models::FrontendConfigResponse,
        state::AppState,
        utils::{payload_response, success_response},
    },
};

/// Create dashboard routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/config", get(get_frontend_config))
        .route("/cache/stats", get(get_cache_stats))
        .route("/rpc/stats", get(get_rpc_stats))
}

/// GET /api/dashboard
///
/// Latest snapshot through the cache. Per-call failures are reported inside
/// the snapshot; only a failed fetch turns into a 503.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard.snapshot().await {
        Ok(snapshot) => success_response(snapshot),
        Err(e) => {
            logger::error(
                LogTag::Webserver,
                &format!("Dashboard fetch failed: {}", e),
            );
            payload_response(
                StatusCode::SERVICE_UNAVAILABLE,
                payload::disconnected(e.reason()),
            )
        }
    }
}

/// GET /api/config
async fn get_frontend_config(State(state): State<Arc<AppState>>) -> Response {
    success_response(FrontendConfigResponse {
        min_outbound_peers: state.dashboard_config.min_outbound_peers,
        disable_mempool_info: state.dashboard_config.mempool_disabled,
    })
}

/// GET /api/cache/stats
async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Response {
    success_response(state.dashboard.cache_stats())
}

/// GET /api/rpc/stats
async fn get_rpc_stats(State(state): State<Arc<AppState>>) -> Response {
    success_response(state.gateway().stats().snapshot())
}

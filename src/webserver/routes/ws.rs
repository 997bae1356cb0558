/// Live dashboard WebSocket endpoint
///
/// A full registry is refused with a plain HTTP error before the handshake.
/// The subscriber itself is only registered once the socket is open, so an
/// upgrade that never completes holds no session.
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use std::sync::Arc;

use crate::webserver::{state::AppState, utils::error_response, ws::connection};

/// GET /ws/dashboard
pub async fn dashboard_ws(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if let Err(e) = state.registry.check_capacity().await {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "session_limit",
            &e.to_string(),
        );
    }

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    ws.on_upgrade(move |socket| {
        let (ws_tx, ws_rx) = socket.split();
        connection::handle_connection(ws_tx, ws_rx, state)
    })
}

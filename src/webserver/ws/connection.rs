/// WebSocket connection handler
///
/// Joins the subscriber registry, sends the current snapshot right away (read
/// through the cache, so it never starts a fetch of its own while one is in
/// flight), then forwards every broadcast until either side goes away.
use axum::extract::ws::{close_code, CloseFrame, Message};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;

use crate::{
    broadcast::BroadcastLoop,
    logger::{self, LogTag},
    webserver::state::AppState,
};

/// Handle one subscriber connection over the two halves of its socket
pub async fn handle_connection<Tx, Rx, E>(mut ws_tx: Tx, mut ws_rx: Rx, state: Arc<AppState>)
where
    Tx: Sink<Message> + Unpin,
    Tx::Error: Display,
    Rx: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let (id, mut rx) = match state.registry.join().await {
        Ok(joined) => joined,
        Err(e) => {
            // Another socket took the last slot during the handshake
            let frame = CloseFrame {
                code: close_code::AGAIN,
                reason: e.to_string().into(),
            };
            let _ = ws_tx.send(Message::Close(Some(frame))).await;
            return;
        }
    };

    logger::debug(LogTag::Webserver, &format!("Connection {} started", id));

    let initial = BroadcastLoop::current_payload(&state.dashboard).await;
    if ws_tx.send(Message::Text(initial.to_string())).await.is_err() {
        state.registry.leave(id).await;
        return;
    }

    loop {
        tokio::select! {
            biased;

            payload = rx.recv() => {
                let Some(payload) = payload else {
                    // Removed from the registry
                    break;
                };
                if let Err(e) = ws_tx.send(Message::Text(payload.to_string())).await {
                    logger::debug(
                        LogTag::Webserver,
                        &format!("Connection {}: failed to send message: {}", id, e),
                    );
                    break;
                }
            }

            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        logger::debug(
                            LogTag::Webserver,
                            &format!("Connection {}: websocket error: {}", id, e),
                        );
                        break;
                    }
                    // Client messages carry nothing we act on
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.registry.leave(id).await;
    logger::debug(LogTag::Webserver, &format!("Connection {} closed", id));
}

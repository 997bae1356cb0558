//! Serialized messages pushed to subscribers
use super::hub::Payload;
use crate::dashboard::GlobalResponse;
use crate::errors::CacheError;
use crate::logger::{self, LogTag};
use serde_json::json;

/// Minimal message telling subscribers the node could not be reached
pub fn disconnected(reason: &str) -> Payload {
    json!({
        "rpcConnected": false,
        "errorMessage": format!("Failed to fetch data: {}", reason),
    })
    .to_string()
    .into()
}

/// Message for one fetch outcome
///
/// A snapshot where every call failed is replaced by the degraded message,
/// as is a failed fetch.
pub fn render(outcome: &Result<GlobalResponse, CacheError>) -> Payload {
    match outcome {
        Ok(snapshot) if snapshot.is_disconnected() => {
            disconnected(snapshot.first_error().unwrap_or("node unreachable"))
        }
        Ok(snapshot) => match serde_json::to_string(snapshot) {
            Ok(text) => text.into(),
            Err(e) => {
                logger::error(
                    LogTag::Broadcast,
                    &format!("Failed to serialize snapshot: {}", e),
                );
                disconnected(&e.to_string())
            }
        },
        Err(e) => disconnected(e.reason()),
    }
}

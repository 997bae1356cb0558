/// Response helpers shared by route handlers
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    broadcast::Payload,
    errors::RpcFailure,
    logger::{self, LogTag},
    webserver::models::ErrorResponse,
};

pub fn success_response<T: Serialize>(data: T) -> Response {
    Json(data).into_response()
}

pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorResponse {
        message: message.to_string(),
        code: code.to_string(),
        rpc_code: None,
    };
    (status, Json(body)).into_response()
}

/// 502 for a failed pass-through call
pub fn rpc_error_response(failure: &RpcFailure) -> Response {
    logger::warning(
        LogTag::Webserver,
        &format!("Pass-through call failed: {}", failure),
    );

    let rpc_code = match failure {
        RpcFailure::NodeError { code, .. } => Some(*code),
        _ => None,
    };
    let body = ErrorResponse {
        message: failure.to_string(),
        code: failure.kind().to_string(),
        rpc_code,
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

/// Already-serialized JSON
pub fn payload_response(status: StatusCode, payload: Payload) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        payload.to_string(),
    )
        .into_response()
}

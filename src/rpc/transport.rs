//! Raw transport to the node: one HTTP POST per JSON-RPC request
//!
//! The gateway only depends on the [`RpcTransport`] trait, so tests swap in
//! an in-memory node.
use super::types::RpcRequest;
use crate::config::RpcConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// The request never produced a JSON-RPC envelope
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send one request and return the raw response body
    async fn invoke(&self, request: &RpcRequest) -> Result<String, TransportError>;
}

/// HTTP transport with Basic-Auth, as spoken by Bitcoin Core
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    user: String,
    password: String,
}

impl HttpTransport {
    pub fn new(config: &RpcConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TransportError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn invoke(&self, request: &RpcRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError(format!("Request timeout: {}", e))
                } else {
                    TransportError(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response body: {}", e)))?;

        // The node reports RPC errors with HTTP 500/404 and a JSON envelope;
        // only a status without such a body is a transport fault (e.g. 401).
        if !status.is_success() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            return Err(TransportError(format!("HTTP status: {}", status)));
        }

        Ok(body)
    }
}

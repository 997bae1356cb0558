/// Error types for nodepulse
///
/// Per-call RPC failures are values, not panics: the aggregator records them
/// in the snapshot's error map. Only the cache layer and configuration
/// loading surface errors to their callers.
use thiserror::Error;

// =============================================================================
// RPC FAILURES
// =============================================================================

/// Failure of a single JSON-RPC call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RpcFailure {
    /// Transport could not complete (refused, timed out, bad HTTP)
    #[error("Connection failed for method {method}: {cause}")]
    ConnectionFailure { method: String, cause: String },

    /// The node answered with a structured error object
    #[error("RPC error for method {method}: code={code}, message='{message}'")]
    NodeError {
        method: String,
        code: i64,
        message: String,
    },

    /// Success envelope without the required payload
    #[error("Empty result for method {method}")]
    EmptyResult { method: String },

    /// Envelope or result had an unexpected JSON shape
    #[error("Malformed response for method {method}: {detail}")]
    ParseFailure { method: String, detail: String },
}

impl RpcFailure {
    pub fn method(&self) -> &str {
        match self {
            RpcFailure::ConnectionFailure { method, .. }
            | RpcFailure::NodeError { method, .. }
            | RpcFailure::EmptyResult { method }
            | RpcFailure::ParseFailure { method, .. } => method,
        }
    }

    /// Short machine-readable kind, used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            RpcFailure::ConnectionFailure { .. } => "connection_failure",
            RpcFailure::NodeError { .. } => "node_error",
            RpcFailure::EmptyResult { .. } => "empty_result",
            RpcFailure::ParseFailure { .. } => "parse_failure",
        }
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self, RpcFailure::ConnectionFailure { .. })
    }
}

pub type RpcResult<T> = Result<T, RpcFailure>;

// =============================================================================
// CACHE ERRORS
// =============================================================================

/// Failure released by the single-flight cache to every attached caller
///
/// Cloneable because one failed fetch is handed to all waiters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    #[error("Failed to fetch data: {0}")]
    FetchFailed(String),

    #[error("Fetch task aborted: {0}")]
    FetchAborted(String),
}

impl CacheError {
    /// Underlying cause without the variant prefix
    pub fn reason(&self) -> &str {
        match self {
            CacheError::FetchFailed(reason) | CacheError::FetchAborted(reason) => reason,
        }
    }
}

// =============================================================================
// SUBSCRIBER ERRORS
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubscriberError {
    #[error("Session limit reached ({0} live subscribers)")]
    SessionLimit(usize),
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

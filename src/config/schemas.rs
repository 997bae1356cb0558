/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides
/// embedded defaults and serde support.
use crate::config_struct;

// ============================================================================
// NODE RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// Connection to the node's JSON-RPC endpoint
    pub struct RpcConfig {
        /// "http" or "https"
        scheme: String = "http".to_string(),
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8332,
        user: String = String::new(),
        password: String = String::new(),
        /// Per-call timeout; a timed-out call fails as a connection failure
        timeout_ms: u64 = 5_000,
    }
}

impl RpcConfig {
    /// Base URL of the RPC endpoint, without credentials
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

// ============================================================================
// DASHBOARD CONFIGURATION
// ============================================================================

config_struct! {
    /// Polling, caching and push behaviour of the dashboard
    pub struct DashboardConfig {
        /// Broadcast cadence, also the base of the cache TTL (1-300)
        polling_interval_secs: u64 = 5,
        /// Subtracted from the poll interval to get the cache TTL
        cache_validity_buffer_ms: u64 = 100,
        /// Reserved for multi-key caches; the snapshot cache holds one entry
        cache_max_items: usize = 50,
        /// Skip getmempoolinfo entirely
        mempool_disabled: bool = false,
        /// Health threshold shown by the frontend
        min_outbound_peers: u32 = 8,
        /// Cap on simultaneous live subscribers
        max_sessions: usize = 1000,
    }
}

impl DashboardConfig {
    pub fn polling_interval_ms(&self) -> u64 {
        self.polling_interval_secs.saturating_mul(1000)
    }
}

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// HTTP/WebSocket listener
    pub struct WebserverConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    /// Root configuration, one TOML table per section
    pub struct Config {
        rpc: RpcConfig = RpcConfig::default(),
        dashboard: DashboardConfig = DashboardConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

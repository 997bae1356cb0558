//! In-memory per-method call statistics for the RPC gateway
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct MethodStats {
    calls: u64,
    errors: u64,
    total_time_ms: f64,
}

/// Call counters, shared by every clone of a gateway
#[derive(Debug)]
pub struct RpcStats {
    methods: Mutex<HashMap<String, MethodStats>>,
    startup_time: DateTime<Utc>,
}

/// Serializable view of [`RpcStats`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcStatsSnapshot {
    pub total_calls: u64,
    pub total_errors: u64,
    /// 0.0 - 100.0, 100.0 before any call
    pub success_rate: f64,
    pub average_response_time_ms: f64,
    pub calls_per_method: HashMap<String, u64>,
    pub errors_per_method: HashMap<String, u64>,
    pub average_ms_per_method: HashMap<String, f64>,
    pub uptime_seconds: i64,
}

impl RpcStats {
    pub fn new() -> Self {
        Self {
            methods: Mutex::new(HashMap::new()),
            startup_time: Utc::now(),
        }
    }

    pub fn record(&self, method: &str, elapsed: Duration, success: bool) {
        let mut methods = self.methods.lock();
        let entry = methods.entry(method.to_string()).or_default();
        entry.calls += 1;
        entry.total_time_ms += elapsed.as_secs_f64() * 1000.0;
        if !success {
            entry.errors += 1;
        }
    }

    pub fn snapshot(&self) -> RpcStatsSnapshot {
        let methods = self.methods.lock();

        let total_calls: u64 = methods.values().map(|m| m.calls).sum();
        let total_errors: u64 = methods.values().map(|m| m.errors).sum();
        let total_time_ms: f64 = methods.values().map(|m| m.total_time_ms).sum();

        let success_rate = if total_calls == 0 {
            100.0
        } else {
            ((total_calls - total_errors) as f64 / total_calls as f64) * 100.0
        };
        let average_response_time_ms = if total_calls == 0 {
            0.0
        } else {
            total_time_ms / total_calls as f64
        };

        RpcStatsSnapshot {
            total_calls,
            total_errors,
            success_rate,
            average_response_time_ms,
            calls_per_method: methods.iter().map(|(k, v)| (k.clone(), v.calls)).collect(),
            errors_per_method: methods.iter().map(|(k, v)| (k.clone(), v.errors)).collect(),
            average_ms_per_method: methods
                .iter()
                .filter(|(_, v)| v.calls > 0)
                .map(|(k, v)| (k.clone(), v.total_time_ms / v.calls as f64))
                .collect(),
            uptime_seconds: Utc::now()
                .signed_duration_since(self.startup_time)
                .num_seconds(),
        }
    }
}

impl Default for RpcStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Bitcoin Core JSON-RPC access
///
/// Structure:
/// - `types`: request/response envelopes and typed method results
/// - `transport`: the raw POST, behind a trait so tests can swap it out
/// - `client`: the gateway (timeouts, failure classification, typed calls)
/// - `stats`: per-method call counters
pub mod client;
pub mod stats;
pub mod transport;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::RpcGateway;
pub use stats::{RpcStats, RpcStatsSnapshot};
pub use transport::{HttpTransport, RpcTransport, TransportError};
pub use types::*;

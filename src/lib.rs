//! nodepulse: live dashboard backend for a Bitcoin Core full node
//!
//! The node is polled through a fixed fan-out of JSON-RPC calls, the merged
//! snapshot is cached behind a single in-flight fetch, and a broadcast loop
//! pushes it to live WebSocket subscribers.

pub mod arguments;
pub mod broadcast;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod logger;
pub mod rpc;
pub mod shutdown;
pub mod utils;

#[cfg(feature = "web")]
pub mod webserver;

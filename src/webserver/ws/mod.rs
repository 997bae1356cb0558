/// WebSocket connection handling for live dashboard subscribers
pub mod connection;

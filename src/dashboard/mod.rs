/// Dashboard snapshot assembly
///
/// - `models`: the snapshot and its views, as serialized to the frontend
/// - `subver`: peer partitioning and client version shares
/// - `aggregator`: the RPC fan-out producing one snapshot
/// - `service`: cached access shared by every reader
pub mod aggregator;
pub mod models;
pub mod service;
pub mod subver;

pub use aggregator::Aggregator;
pub use service::DashboardService;
pub use models::{
    fields, BlockView, BlockchainView, GeneralStats, GlobalResponse, MempoolView, NetworkView,
    PeerView, SubverDistribution, SubverStat,
};

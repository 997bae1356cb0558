//! Peer partitioning and client version distribution
use super::models::{GeneralStats, PeerView, SubverDistribution, SubverStat};
use std::collections::HashMap;

/// Split peers by direction, keeping node order inside each side
pub fn partition(peers: Vec<PeerView>) -> (Vec<PeerView>, Vec<PeerView>) {
    peers.into_iter().partition(|p| p.inbound)
}

pub fn general_stats(inbound: &[PeerView], outbound: &[PeerView]) -> GeneralStats {
    GeneralStats::new(inbound.len(), outbound.len())
}

pub fn distribution(inbound: &[PeerView], outbound: &[PeerView]) -> SubverDistribution {
    SubverDistribution {
        inbound: subver_stats(inbound),
        outbound: subver_stats(outbound),
    }
}

/// Share of each client version within one partition
///
/// Versions keep the order they are first seen in. Peers without a version
/// string are not grouped but still count towards the divisor.
pub fn subver_stats(peers: &[PeerView]) -> Vec<SubverStat> {
    if peers.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for subver in peers.iter().filter_map(|p| p.subver.as_deref()) {
        let count = counts.entry(subver).or_insert_with(|| {
            order.push(subver);
            0
        });
        *count += 1;
    }

    let total = peers.len() as f64;
    order
        .into_iter()
        .map(|subver| SubverStat {
            server: subver.to_string(),
            percentage: round2(counts[subver] as f64 * 100.0 / total),
        })
        .collect()
}

/// Round half-up at the second decimal
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

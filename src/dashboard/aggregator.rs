//! One dashboard snapshot from a parallel fan-out of node calls
//!
//! Every call settles on its own; a failed call leaves its field unset and
//! records the failure under the field's key. `fetch` itself never fails.
use super::models::{fields, GlobalResponse};
use super::subver;
use crate::errors::{RpcFailure, RpcResult};
use crate::logger::{self, LogTag};
use crate::rpc::types::BlockInfoResponse;
use crate::rpc::RpcGateway;
use std::collections::BTreeMap;
use std::time::Instant;

#[derive(Clone)]
pub struct Aggregator {
    gateway: RpcGateway,
    mempool_disabled: bool,
}

impl Aggregator {
    pub fn new(gateway: RpcGateway, mempool_disabled: bool) -> Self {
        Self {
            gateway,
            mempool_disabled,
        }
    }

    pub fn gateway(&self) -> &RpcGateway {
        &self.gateway
    }

    pub async fn fetch(&self) -> GlobalResponse {
        let start = Instant::now();

        let mempool = async {
            if self.mempool_disabled {
                None
            } else {
                Some(self.gateway.get_mempool_info().await)
            }
        };

        let (peers, blockchain, network, uptime, (best_hash, block), mempool) = tokio::join!(
            self.gateway.get_peer_info(),
            self.gateway.get_blockchain_info(),
            self.gateway.get_network_info(),
            self.gateway.uptime(),
            self.best_block(),
            mempool,
        );

        let mut outcomes = Outcomes::default();
        let mut snapshot = GlobalResponse::default();

        if let Some(peers) = outcomes.take(fields::PEER_INFO, peers) {
            let (inbound, outbound) = subver::partition(peers);
            snapshot.general_stats = Some(subver::general_stats(&inbound, &outbound));
            snapshot.subver_distribution = Some(subver::distribution(&inbound, &outbound));
            snapshot.inbound_peer = Some(inbound);
            snapshot.outbound_peer = Some(outbound);
        }
        snapshot.blockchain_info_response = outcomes.take(fields::BLOCKCHAIN_INFO, blockchain);
        snapshot.node_info = outcomes.take(fields::NETWORK_INFO, network);
        snapshot.up_time = outcomes.take(fields::UPTIME, uptime);
        if outcomes.take(fields::BEST_BLOCK_HASH, best_hash).is_some() {
            if let Some(block) = block {
                snapshot.block = outcomes.take(fields::BLOCK_INFO, block);
            }
        }
        if let Some(mempool) = mempool {
            snapshot.mempool_info = Some(outcomes.take(fields::MEMPOOL_INFO, mempool));
        }

        snapshot.rpc_connected = outcomes.failed < outcomes.issued;
        let failed = outcomes.failed;
        let issued = outcomes.issued;
        snapshot.errors = outcomes.errors;

        logger::debug(
            LogTag::Aggregator,
            &format!(
                "Snapshot assembled in {} ms ({}/{} calls failed)",
                start.elapsed().as_millis(),
                failed,
                issued
            ),
        );

        snapshot
    }

    /// Best block hash, then the block it names. The block call is only
    /// issued when the hash is known.
    async fn best_block(&self) -> (RpcResult<()>, Option<RpcResult<BlockInfoResponse>>) {
        match self.gateway.get_best_block_hash().await {
            Ok(hash) => (Ok(()), Some(self.gateway.get_block(&hash).await)),
            Err(e) => (Err(e), None),
        }
    }
}

/// Tally of one fan-out cycle
#[derive(Default)]
struct Outcomes {
    errors: BTreeMap<String, String>,
    issued: usize,
    failed: usize,
}

impl Outcomes {
    fn take<T>(&mut self, field: &str, result: RpcResult<T>) -> Option<T> {
        self.issued += 1;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.record_failure(field, &e);
                None
            }
        }
    }

    fn record_failure(&mut self, field: &str, failure: &RpcFailure) {
        self.failed += 1;
        logger::warning(
            LogTag::Aggregator,
            &format!("Failed to fetch {}: {}", field, failure),
        );
        self.errors.insert(field.to_string(), failure.to_string());
    }
}

//! Host-side persistence for the ledger node: the mining audit trail and a
//! per-address balance cache. The chain itself lives only in memory; the
//! ledger remains the source of truth for balances.

pub mod sled_store;

use anyhow::Result;
use ledger_core::Block;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One successful mine, written by the host after the block is appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiningRecord {
    pub miner: String,
    pub block_index: u64,
    pub block_hash: String,
    pub difficulty: u32,
    pub nonce: u64,
    pub reward: f64,
    /// Seconds since the Unix epoch.
    pub recorded_at: u64,
}

impl MiningRecord {
    pub fn from_block(miner: &str, block: &Block, difficulty: u32, reward: f64) -> Self {
        Self {
            miner: miner.to_string(),
            block_index: block.index,
            block_hash: block.hash.clone(),
            difficulty,
            nonce: block.nonce,
            reward,
            recorded_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        }
    }
}

pub trait AuditStore: Send + Sync {
    fn record_mining(&self, record: &MiningRecord) -> Result<()>;
    /// Newest first, at most `limit` entries.
    fn recent_mining(&self, limit: usize) -> Result<Vec<MiningRecord>>;
    /// Newest first.
    fn mining_by_miner(&self, miner: &str) -> Result<Vec<MiningRecord>>;
    fn mining_count(&self) -> Result<usize>;
    fn put_balance(&self, address: &str, balance: f64) -> Result<()>;
    fn cached_balance(&self, address: &str) -> Result<Option<f64>>;
}

//! Read-only snapshots handed to presentation callers. They own their data and
//! never borrow from the ledger.

use crate::error::ChainViolation;
use crate::format_timestamp;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockView {
    pub index: u64,
    pub hash: String,
    pub previous_hash: String,
    pub timestamp: String,
    pub nonce: u64,
    pub transaction_count: usize,
    pub transactions: Vec<TransactionView>,
}

/// A transaction touching an address, tagged with its containing block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub block_index: u64,
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(block_index: u64, tx: &Transaction) -> Self {
        Self {
            block_index,
            id: tx.id().to_string(),
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            amount: tx.amount,
            timestamp: format_timestamp(tx.timestamp),
        }
    }
}

/// Dashboard-level overview of the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub length: usize,
    pub total_transactions: usize,
    pub pending_transactions: usize,
    pub difficulty: u32,
    pub mining_reward: f64,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<ChainViolation>,
    pub latest_block: BlockView,
}

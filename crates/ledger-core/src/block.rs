use crate::error::Result;
use crate::mine::{MiningControl, MiningOutcome};
use crate::transaction::{CanonicalTransaction, Transaction};
use crate::view::BlockView;
use crate::{canonical, constants::MINING_CHECK_INTERVAL, format_timestamp, now_timestamp, pow, sha256_hex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: f64,
    pub previous_hash: String,
    pub nonce: u64,
    /// Digest of the other fields as of the last `recompute_hash`. Mutating a
    /// hashed field without recomputing leaves this stale, which is what
    /// chain validation detects.
    pub hash: String,
}

/// Hashed form of a block. Field order is the sorted key order, so identical
/// content always encodes to identical bytes.
#[derive(Serialize)]
struct CanonicalBlock<'a> {
    index: u64,
    nonce: u64,
    previous_hash: &'a str,
    timestamp: f64,
    transactions: Vec<CanonicalTransaction<'a>>,
}

impl Block {
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: impl Into<String>) -> Self {
        Self::with_timestamp(index, transactions, previous_hash, now_timestamp())
    }

    pub fn with_timestamp(
        index: u64,
        transactions: Vec<Transaction>,
        previous_hash: impl Into<String>,
        timestamp: f64,
    ) -> Self {
        let mut block = Self {
            index,
            transactions,
            timestamp,
            previous_hash: previous_hash.into(),
            nonce: 0,
            hash: String::new(),
        };
        block.recompute_hash();
        block
    }

    /// Sorted-key JSON over index, nonce, previous_hash, timestamp and the
    /// transactions in list order, laid out as Python's
    /// `json.dumps(..., sort_keys=True)` does.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let canonical = CanonicalBlock {
            index: self.index,
            nonce: self.nonce,
            previous_hash: &self.previous_hash,
            timestamp: self.timestamp,
            transactions: self.transactions.iter().map(Transaction::canonical).collect(),
        };
        // Only strings and numbers; serde_json cannot fail on these.
        canonical::to_vec(&canonical).expect("canonical block encoding is infallible")
    }

    pub fn calculate_hash(&self) -> String {
        sha256_hex(&self.canonical_bytes())
    }

    pub fn recompute_hash(&mut self) {
        self.hash = self.calculate_hash();
    }

    /// Stored hash still matches the block's current fields.
    pub fn has_valid_hash(&self) -> bool {
        self.hash == self.calculate_hash()
    }

    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        pow::hash_meets_difficulty(&self.hash, difficulty)
    }

    /// Sequential nonce search with no bound on attempts.
    ///
    /// A difficulty above the digest length can never be met and this will
    /// not return; use [`Block::mine_with`] when that matters.
    pub fn mine(&mut self, difficulty: u32) -> MiningOutcome {
        match self.mine_with(difficulty, &MiningControl::unbounded()) {
            Ok(outcome) => outcome,
            Err(e) => unreachable!("unbounded mining was interrupted: {e}"),
        }
    }

    /// Increments the nonce until the hash has `difficulty` leading hex
    /// zeros, checking `control` every [`MINING_CHECK_INTERVAL`] attempts.
    ///
    /// On error the block is left with an arbitrary non-qualifying nonce and
    /// should be discarded.
    pub fn mine_with(&mut self, difficulty: u32, control: &MiningControl) -> Result<MiningOutcome> {
        let started = Instant::now();
        let mut attempts = 0u64;
        debug!(index = self.index, difficulty, "mining block");

        while !self.meets_difficulty(difficulty) {
            if attempts % MINING_CHECK_INTERVAL == 0 {
                control.check(attempts)?;
            }
            self.nonce = self.nonce.wrapping_add(1);
            self.recompute_hash();
            attempts += 1;
        }

        let outcome = MiningOutcome {
            nonce: self.nonce,
            attempts,
            elapsed: started.elapsed(),
        };
        info!(
            index = self.index,
            nonce = self.nonce,
            hash = %self.hash,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "block mined"
        );
        Ok(outcome)
    }

    pub fn view(&self) -> BlockView {
        BlockView {
            index: self.index,
            hash: self.hash.clone(),
            previous_hash: self.previous_hash.clone(),
            timestamp: format_timestamp(self.timestamp),
            nonce: self.nonce,
            transaction_count: self.transactions.len(),
            transactions: self.transactions.iter().map(Transaction::view).collect(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.hash.get(..16).unwrap_or(&self.hash);
        write!(
            f,
            "Block #{} [{}...] - {} transactions",
            self.index,
            short,
            self.transactions.len()
        )
    }
}

//! Append-only, tamper-evident transaction ledger secured by SHA-256 hash
//! chaining and a leading-zero proof-of-work rule.

pub mod block;
pub mod canonical;
pub mod config;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod mine;
pub mod shared;
pub mod transaction;
pub mod view;

pub use block::Block;
pub use config::LedgerConfig;
pub use error::{ChainViolation, LedgerError, Result, ViolationKind};
pub use ledger::{BlockTemplate, Ledger};
pub use mine::{CancelToken, MiningControl, MiningOutcome};
pub use shared::SharedLedger;
pub use transaction::Transaction;
pub use view::{BlockView, ChainSummary, HistoryEntry, TransactionView};

use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, with sub-second precision.
pub fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Renders an epoch timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(timestamp: f64) -> String {
    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract().abs() * 1e9) as u32;
    match chrono::DateTime::from_timestamp(secs, nanos) {
        Some(dt) => dt.format(constants::TIMESTAMP_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub mod pow {
    /// Number of leading `'0'` characters in a hex digest.
    pub fn leading_hex_zeros(hash: &str) -> u32 {
        hash.chars().take_while(|c| *c == '0').count() as u32
    }

    /// A hash qualifies at `difficulty` iff its first `difficulty` hex
    /// characters are all `'0'`.
    pub fn hash_meets_difficulty(hash: &str, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
    }

    /// The target prefix for `difficulty`, e.g. `"00"` for 2.
    pub fn target(difficulty: u32) -> String {
        "0".repeat(difficulty as usize)
    }
}

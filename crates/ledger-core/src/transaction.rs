use crate::canonical::float_text;
use crate::constants::{GENESIS_RECEIVER, MINT_ADDRESS, TX_ID_HEX_SIZE};
use crate::view::TransactionView;
use crate::{format_timestamp, now_timestamp, sha256_hex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A transfer of `amount` from `sender` to `receiver`.
///
/// No validation happens here; the ledger checks amounts on submission so it
/// can synthesize mint-origin transactions (genesis marker, rewards) freely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
    pub timestamp: f64,
    id: String,
}

/// Hashed form of a transaction. Field order is the sorted key order.
#[derive(Serialize)]
pub(crate) struct CanonicalTransaction<'a> {
    amount: f64,
    id: &'a str,
    receiver: &'a str,
    sender: &'a str,
    timestamp: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: f64) -> Self {
        Self::with_timestamp(sender, receiver, amount, now_timestamp())
    }

    pub fn with_timestamp(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: f64,
        timestamp: f64,
    ) -> Self {
        let sender = sender.into();
        let receiver = receiver.into();
        let id = transaction_id(&sender, &receiver, amount, timestamp);
        Self {
            sender,
            receiver,
            amount,
            timestamp,
            id,
        }
    }

    /// Mining reward paid from the mint to `miner`.
    pub fn reward(miner: impl Into<String>, amount: f64) -> Self {
        Self::new(MINT_ADDRESS, miner, amount)
    }

    /// Zero-value marker carried by the genesis block.
    pub fn genesis() -> Self {
        Self::new(MINT_ADDRESS, GENESIS_RECEIVER, 0.0)
    }

    /// 16 hex characters derived from sender, receiver, amount and timestamp.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_mint(&self) -> bool {
        self.sender == MINT_ADDRESS
    }

    pub fn involves(&self, address: &str) -> bool {
        self.sender == address || self.receiver == address
    }

    pub fn view(&self) -> TransactionView {
        TransactionView {
            id: self.id.clone(),
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            amount: self.amount,
            timestamp: format_timestamp(self.timestamp),
        }
    }

    pub(crate) fn canonical(&self) -> CanonicalTransaction<'_> {
        CanonicalTransaction {
            amount: self.amount,
            id: &self.id,
            receiver: &self.receiver,
            sender: &self.sender,
            timestamp: self.timestamp,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TX_{}: {} → {}: {}",
            self.id,
            self.sender,
            self.receiver,
            float_text(self.amount)
        )
    }
}

fn transaction_id(sender: &str, receiver: &str, amount: f64, timestamp: f64) -> String {
    let amount = float_text(amount);
    let timestamp = float_text(timestamp);
    let mut digest = sha256_hex(format!("{sender}{receiver}{amount}{timestamp}").as_bytes());
    digest.truncate(TX_ID_HEX_SIZE);
    digest
}

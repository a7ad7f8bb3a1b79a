use crate::block::Block;
use crate::config::LedgerConfig;
use crate::error::{ChainViolation, Result};
use crate::ledger::Ledger;
use crate::mine::MiningControl;
use crate::view::{BlockView, ChainSummary, HistoryEntry, TransactionView};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::debug;

/// Cloneable handle to one ledger shared between request handlers.
///
/// Submissions and commits take the write lock; queries take the read lock
/// and therefore see the state either before or after a block is appended.
/// Mining holds a separate mutex for its whole duration so only one search
/// runs at a time, but the nonce search itself runs without any ledger lock:
/// readers and submitters are not blocked while a block is being mined, and
/// transactions submitted meanwhile stay queued for the next block.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    ledger: Arc<RwLock<Ledger>>,
    mining: Arc<Mutex<()>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            mining: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::new(Ledger::with_config(config))
    }

    pub fn try_with_config(config: LedgerConfig) -> Result<Self> {
        Ledger::try_with_config(config).map(Self::new)
    }

    /// Runs `f` against a consistent view of the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.ledger.read())
    }

    pub fn add_transaction(&self, sender: &str, receiver: &str, amount: f64) -> Result<String> {
        self.ledger.write().add_transaction(sender, receiver, amount)
    }

    /// Mines the pending queue as of the moment mining starts.
    ///
    /// On cancellation or timeout nothing is appended and the queue is kept.
    pub fn mine_pending_transactions(
        &self,
        miner: &str,
        control: &MiningControl,
    ) -> Result<Option<Block>> {
        let _mining = self.mining.lock();

        let Some(mut template) = self.ledger.read().prepare_block(miner) else {
            return Ok(None);
        };
        debug!(index = template.block().index, "searching nonce without ledger lock");
        template.mine(control)?;

        let block = self.ledger.write().commit_block(template)?;
        Ok(Some(block))
    }

    pub fn validate_chain(&self) -> std::result::Result<(), ChainViolation> {
        self.ledger.read().validate_chain()
    }

    pub fn is_chain_valid(&self) -> bool {
        self.ledger.read().is_chain_valid()
    }

    pub fn get_wallet_balance(&self, address: &str) -> f64 {
        self.ledger.read().get_wallet_balance(address)
    }

    pub fn get_transaction_history(&self, address: &str) -> Vec<HistoryEntry> {
        self.ledger.read().get_transaction_history(address)
    }

    pub fn get_total_transactions(&self) -> usize {
        self.ledger.read().get_total_transactions()
    }

    pub fn chain_snapshot(&self) -> Vec<BlockView> {
        self.ledger.read().chain_snapshot()
    }

    pub fn pending_snapshot(&self) -> Vec<TransactionView> {
        self.ledger.read().pending_snapshot()
    }

    pub fn block_view(&self, index: u64) -> Result<BlockView> {
        self.ledger.read().block(index).map(Block::view)
    }

    pub fn summary(&self) -> ChainSummary {
        self.ledger.read().summary()
    }

    pub fn difficulty(&self) -> u32 {
        self.ledger.read().difficulty()
    }

    pub fn mining_reward(&self) -> f64 {
        self.ledger.read().mining_reward()
    }

    pub fn len(&self) -> usize {
        self.ledger.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.read().is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.ledger.read().pending_count()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}

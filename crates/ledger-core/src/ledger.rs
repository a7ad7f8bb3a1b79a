use crate::block::Block;
use crate::config::LedgerConfig;
use crate::constants::HASH_HEX_SIZE;
use crate::error::{ChainViolation, LedgerError, Result, ViolationKind};
use crate::mine::{MiningControl, MiningOutcome};
use crate::transaction::Transaction;
use crate::view::{BlockView, ChainSummary, HistoryEntry, TransactionView};
use tracing::{info, warn};

/// A block built from the pending queue, not yet appended.
///
/// Produced by [`Ledger::prepare_block`]; mine it, then hand it back to
/// [`Ledger::commit_block`].
#[derive(Clone, Debug)]
pub struct BlockTemplate {
    block: Block,
    difficulty: u32,
    /// Length of the pending prefix copied into `block`.
    drained: usize,
}

impl BlockTemplate {
    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn mine(&mut self, control: &MiningControl) -> Result<MiningOutcome> {
        self.block.mine_with(self.difficulty, control)
    }
}

/// The chain, the pending queue and the rules binding them.
///
/// Single-threaded; wrap in [`crate::SharedLedger`] to share across threads.
#[derive(Clone, Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    config: LedgerConfig,
}

impl Ledger {
    pub fn new(difficulty: u32) -> Self {
        Self::with_config(LedgerConfig::with_difficulty(difficulty))
    }

    /// Builds and mines the genesis block synchronously.
    ///
    /// # Panics
    ///
    /// If `config.difficulty` exceeds [`HASH_HEX_SIZE`]; such a target can
    /// never be met. Use [`Ledger::try_with_config`] for untrusted input.
    pub fn with_config(config: LedgerConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(ledger) => ledger,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`Ledger::with_config`], but rejects unreachable difficulties.
    pub fn try_with_config(config: LedgerConfig) -> Result<Self> {
        if config.difficulty as usize > HASH_HEX_SIZE {
            return Err(LedgerError::DifficultyTooHigh {
                difficulty: config.difficulty,
                max: HASH_HEX_SIZE,
            });
        }
        let mut genesis = Block::new(0, vec![Transaction::genesis()], "0".repeat(HASH_HEX_SIZE));
        genesis.mine(config.difficulty);
        info!(hash = %genesis.hash, difficulty = config.difficulty, "genesis block created");
        Ok(Self {
            chain: vec![genesis],
            pending: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn difficulty(&self) -> u32 {
        self.config.difficulty
    }

    pub fn mining_reward(&self) -> f64 {
        self.config.mining_reward
    }

    #[cfg(test)]
    pub(crate) fn set_difficulty(&mut self, difficulty: u32) {
        self.config.difficulty = difficulty;
    }

    /// Number of blocks, genesis included. Never zero.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn block(&self, index: u64) -> Result<&Block> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.chain.get(i))
            .ok_or(LedgerError::BlockNotFound(index))
    }

    pub fn latest_block(&self) -> &Block {
        // The chain always holds genesis.
        &self.chain[self.chain.len() - 1]
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Queues a transfer and returns its id. Only the amount is checked;
    /// overdrafts and unknown addresses are accepted.
    pub fn add_transaction(&mut self, sender: &str, receiver: &str, amount: f64) -> Result<String> {
        if !(amount.is_finite() && amount > 0.0) {
            warn!(sender, receiver, amount, "rejected transaction with non-positive amount");
            return Err(LedgerError::InvalidAmount(amount));
        }
        let tx = Transaction::new(sender, receiver, amount);
        let id = tx.id().to_string();
        info!(%tx, pending = self.pending.len() + 1, "transaction added");
        self.pending.push(tx);
        Ok(id)
    }

    /// Mines every pending transaction into a new block, with the reward to
    /// `miner` first. Returns `None` and changes nothing when the queue is
    /// empty.
    pub fn mine_pending_transactions(&mut self, miner: &str) -> Option<Block> {
        let mut template = self.prepare_block(miner)?;
        template.block.mine(template.difficulty);
        Some(self.append(template))
    }

    /// Like [`Ledger::mine_pending_transactions`] but bounded by `control`.
    /// An interrupted search leaves the chain and the queue untouched.
    pub fn mine_pending_transactions_with(
        &mut self,
        miner: &str,
        control: &MiningControl,
    ) -> Result<Option<Block>> {
        let Some(mut template) = self.prepare_block(miner) else {
            return Ok(None);
        };
        template.mine(control)?;
        Ok(Some(self.append(template)))
    }

    /// Snapshot of the pending queue as an unmined block on top of the tip.
    pub fn prepare_block(&self, miner: &str) -> Option<BlockTemplate> {
        if self.pending.is_empty() {
            info!("no pending transactions to mine");
            return None;
        }
        let mut transactions = Vec::with_capacity(self.pending.len() + 1);
        transactions.push(Transaction::reward(miner, self.config.mining_reward));
        transactions.extend(self.pending.iter().cloned());

        let block = Block::new(
            self.chain.len() as u64,
            transactions,
            self.latest_block().hash.clone(),
        );
        info!(index = block.index, pending = self.pending.len(), miner, "mining pending transactions");
        Some(BlockTemplate {
            block,
            difficulty: self.config.difficulty,
            drained: self.pending.len(),
        })
    }

    /// Appends a mined template and drops the pending entries it carried.
    /// Transactions queued after `prepare_block` stay pending.
    ///
    /// Rejects templates that no longer extend the tip or were not mined.
    pub fn commit_block(&mut self, template: BlockTemplate) -> std::result::Result<Block, ChainViolation> {
        let index = self.chain.len() as u64;
        let block = &template.block;
        let reject = |kind| -> std::result::Result<Block, ChainViolation> {
            Err(ChainViolation { index, kind })
        };

        if block.index != index
            || block.previous_hash != self.latest_block().hash
            || template.drained > self.pending.len()
        {
            return reject(ViolationKind::LinkageMismatch);
        }
        if !block.has_valid_hash() {
            return reject(ViolationKind::HashMismatch);
        }
        if !block.meets_difficulty(self.config.difficulty) {
            return reject(ViolationKind::ProofOfWorkMissing);
        }
        Ok(self.append(template))
    }

    fn append(&mut self, template: BlockTemplate) -> Block {
        let BlockTemplate { block, drained, .. } = template;
        self.chain.push(block.clone());
        self.pending.drain(..drained);
        info!(index = block.index, hash = %block.hash, "block added to chain");
        block
    }

    /// Walks the chain and stops at the first violation.
    ///
    /// Genesis is checked for self-consistency and proof of work; every later
    /// block is checked for (in order) hash mismatch, linkage and proof of
    /// work.
    pub fn validate_chain(&self) -> std::result::Result<(), ChainViolation> {
        let difficulty = self.config.difficulty;
        let mut previous: Option<&Block> = None;
        for (position, block) in self.chain.iter().enumerate() {
            let violation = |kind| ChainViolation {
                index: position as u64,
                kind,
            };
            if !block.has_valid_hash() {
                return Err(violation(ViolationKind::HashMismatch));
            }
            if previous.is_some_and(|prev| block.previous_hash != prev.hash) {
                return Err(violation(ViolationKind::LinkageMismatch));
            }
            if !block.meets_difficulty(difficulty) {
                return Err(violation(ViolationKind::ProofOfWorkMissing));
            }
            previous = Some(block);
        }
        Ok(())
    }

    pub fn is_chain_valid(&self) -> bool {
        match self.validate_chain() {
            Ok(()) => true,
            Err(violation) => {
                warn!(%violation, "chain validation failed");
                false
            }
        }
    }

    /// Received minus sent, over the whole chain. Mint-origin transactions
    /// are never debited.
    pub fn get_wallet_balance(&self, address: &str) -> f64 {
        self.chain_transactions().fold(0.0, |mut balance, (_, tx)| {
            if tx.receiver == address {
                balance += tx.amount;
            }
            if tx.sender == address && !tx.is_mint() {
                balance -= tx.amount;
            }
            balance
        })
    }

    pub fn get_transaction_history(&self, address: &str) -> Vec<HistoryEntry> {
        self.chain_transactions()
            .filter(|(_, tx)| tx.involves(address))
            .map(|(block, tx)| HistoryEntry::new(block.index, tx))
            .collect()
    }

    pub fn get_total_transactions(&self) -> usize {
        self.chain.iter().map(|b| b.transactions.len()).sum()
    }

    pub fn chain_snapshot(&self) -> Vec<BlockView> {
        self.chain.iter().map(Block::view).collect()
    }

    pub fn pending_snapshot(&self) -> Vec<TransactionView> {
        self.pending.iter().map(Transaction::view).collect()
    }

    pub fn summary(&self) -> ChainSummary {
        let violation = self.validate_chain().err();
        ChainSummary {
            length: self.chain.len(),
            total_transactions: self.get_total_transactions(),
            pending_transactions: self.pending.len(),
            difficulty: self.config.difficulty,
            mining_reward: self.config.mining_reward,
            valid: violation.is_none(),
            violation,
            latest_block: self.latest_block().view(),
        }
    }

    fn chain_transactions(&self) -> impl Iterator<Item = (&Block, &Transaction)> {
        self.chain
            .iter()
            .flat_map(|block| block.transactions.iter().map(move |tx| (block, tx)))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_config(LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GENESIS_RECEIVER, MINT_ADDRESS};
    use crate::mine::CancelToken;

    #[test]
    fn genesis_block_example() {
        let ledger = Ledger::new(2);
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.latest_block();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.previous_hash, "0".repeat(64));
        assert_eq!(genesis.transactions.len(), 1);
        assert_eq!(genesis.transactions[0].sender, MINT_ADDRESS);
        assert_eq!(genesis.transactions[0].receiver, GENESIS_RECEIVER);
        assert_eq!(genesis.transactions[0].amount, 0.0);
        assert!(genesis.hash.starts_with("00"));
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn genesis_meets_any_small_difficulty() {
        for difficulty in 0..=3 {
            let ledger = Ledger::new(difficulty);
            let hash = &ledger.latest_block().hash;
            assert!(hash[..difficulty as usize].chars().all(|c| c == '0'));
            assert!(ledger.is_chain_valid());
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let mut ledger = Ledger::new(2);
        assert_eq!(ledger.len(), 1);

        ledger.add_transaction("Alice", "Bob", 50.0).unwrap();
        assert_eq!(ledger.pending_count(), 1);

        let block = ledger.mine_pending_transactions("Miner1").unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(block.index, 1);
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0].sender, MINT_ADDRESS);
        assert_eq!(block.transactions[0].receiver, "Miner1");
        assert_eq!(block.transactions[0].amount, 6.25);
        assert_eq!(block.transactions[1].sender, "Alice");
        assert_eq!(block.transactions[1].receiver, "Bob");
        assert_eq!(block.transactions[1].amount, 50.0);
        assert!(block.hash.starts_with("00"));
        assert_eq!(ledger.pending_count(), 0);

        assert_eq!(ledger.get_wallet_balance("Bob"), 50.0);
        assert_eq!(ledger.get_wallet_balance("Miner1"), 6.25);
        assert_eq!(ledger.get_wallet_balance("Alice"), -50.0);
        assert!(ledger.is_chain_valid());

        ledger.chain[1].transactions[1].amount = 500.0;
        assert!(!ledger.is_chain_valid());
        assert_eq!(
            ledger.validate_chain(),
            Err(ChainViolation {
                index: 1,
                kind: ViolationKind::HashMismatch
            })
        );
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let mut ledger = Ledger::new(1);
        for amount in [0.0, -1.0, -0.0001, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let err = ledger.add_transaction("Alice", "Bob", amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)));
        }
        assert_eq!(ledger.pending_count(), 0);
    }

    #[test]
    fn add_transaction_returns_id_of_queued_tx() {
        let mut ledger = Ledger::new(1);
        let id = ledger.add_transaction("Alice", "Bob", 1.5).unwrap();
        assert_eq!(ledger.pending()[0].id(), id);
    }

    #[test]
    fn mine_with_empty_queue_is_noop() {
        let mut ledger = Ledger::new(1);
        let tip = ledger.latest_block().hash.clone();
        assert!(ledger.mine_pending_transactions("Miner1").is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.latest_block().hash, tip);
    }

    #[test]
    fn pending_order_is_preserved() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("A", "B", 1.0).unwrap();
        ledger.add_transaction("B", "C", 2.0).unwrap();
        ledger.add_transaction("C", "D", 3.0).unwrap();
        let block = ledger.mine_pending_transactions("M").unwrap();
        let pairs: Vec<(&str, &str)> = block
            .transactions
            .iter()
            .map(|tx| (tx.sender.as_str(), tx.receiver.as_str()))
            .collect();
        assert_eq!(pairs, vec![("0", "M"), ("A", "B"), ("B", "C"), ("C", "D")]);
    }

    #[test]
    fn linkage_holds_across_blocks() {
        let mut ledger = Ledger::new(1);
        for i in 0..4 {
            ledger.add_transaction("A", "B", 1.0 + i as f64).unwrap();
            ledger.mine_pending_transactions("M").unwrap();
        }
        let blocks = ledger.blocks();
        for pair in blocks.windows(2) {
            assert_eq!(pair[1].previous_hash, pair[0].hash);
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
        assert!(ledger.is_chain_valid());
    }

    fn mined_ledger() -> Ledger {
        let mut ledger = Ledger::new(2);
        ledger.add_transaction("Alice", "Bob", 50.0).unwrap();
        ledger.mine_pending_transactions("Miner1").unwrap();
        ledger.add_transaction("Bob", "Carol", 20.0).unwrap();
        ledger.mine_pending_transactions("Miner2").unwrap();
        ledger
    }

    #[test]
    fn detects_linkage_break() {
        let mut ledger = mined_ledger();
        // Rewire block 2 onto a fake parent and re-mine it so only the link is wrong.
        ledger.chain[2].previous_hash = "f".repeat(64);
        ledger.chain[2].recompute_hash();
        ledger.chain[2].mine(2);
        assert_eq!(
            ledger.validate_chain(),
            Err(ChainViolation {
                index: 2,
                kind: ViolationKind::LinkageMismatch
            })
        );
    }

    #[test]
    fn detects_missing_proof_of_work() {
        let mut ledger = mined_ledger();
        let block = &mut ledger.chain[2];
        // Find a nonce whose hash is self-consistent but misses the target.
        loop {
            block.nonce += 1;
            block.recompute_hash();
            if !block.meets_difficulty(2) {
                break;
            }
        }
        assert_eq!(
            ledger.validate_chain(),
            Err(ChainViolation {
                index: 2,
                kind: ViolationKind::ProofOfWorkMissing
            })
        );
    }

    #[test]
    fn validation_reports_first_violation_only() {
        let mut ledger = mined_ledger();
        ledger.chain[1].timestamp += 1.0;
        ledger.chain[2].transactions.clear();
        assert_eq!(ledger.validate_chain().unwrap_err().index, 1);
    }

    #[test]
    fn reordered_blocks_fail_validation() {
        let mut ledger = mined_ledger();
        ledger.chain.swap(1, 2);
        assert!(!ledger.is_chain_valid());
    }

    #[test]
    fn tampered_genesis_is_detected() {
        let mut ledger = mined_ledger();
        ledger.chain[0].transactions[0].receiver = "Mallory".to_string();
        assert_eq!(
            ledger.validate_chain(),
            Err(ChainViolation {
                index: 0,
                kind: ViolationKind::HashMismatch
            })
        );
    }

    #[test]
    fn balance_matches_definition() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 10.0).unwrap();
        ledger.add_transaction("Bob", "Alice", 4.0).unwrap();
        ledger.add_transaction("Bob", "Carol", 1.5).unwrap();
        ledger.mine_pending_transactions("Bob").unwrap();
        ledger.add_transaction("Carol", "Bob", 0.5).unwrap();
        ledger.mine_pending_transactions("Alice").unwrap();

        for address in ["Alice", "Bob", "Carol", "Nobody"] {
            let mut expected = 0.0;
            for block in ledger.blocks() {
                for tx in &block.transactions {
                    if tx.receiver == address {
                        expected += tx.amount;
                    }
                    if tx.sender == address && tx.sender != MINT_ADDRESS {
                        expected -= tx.amount;
                    }
                }
            }
            assert_eq!(ledger.get_wallet_balance(address), expected, "{address}");
        }
        // received: 10 + 6.25 reward + 0.5, sent: 4 + 1.5
        assert_eq!(ledger.get_wallet_balance("Bob"), 10.0 + 6.25 + 0.5 - 4.0 - 1.5);
    }

    #[test]
    fn mint_is_never_debited() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        ledger.mine_pending_transactions("M").unwrap();
        assert_eq!(ledger.get_wallet_balance(MINT_ADDRESS), 0.0);
    }

    #[test]
    fn pending_transactions_do_not_affect_balance() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 10.0).unwrap();
        assert_eq!(ledger.get_wallet_balance("Bob"), 0.0);
    }

    #[test]
    fn history_in_chain_order() {
        let ledger = mined_ledger();
        let history = ledger.get_transaction_history("Bob");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].block_index, 1);
        assert_eq!(history[0].sender, "Alice");
        assert_eq!(history[1].block_index, 2);
        assert_eq!(history[1].receiver, "Carol");

        let miner = ledger.get_transaction_history("Miner2");
        assert_eq!(miner.len(), 1);
        assert_eq!(miner[0].amount, 6.25);
        assert!(ledger.get_transaction_history("Nobody").is_empty());
    }

    #[test]
    fn totals_and_snapshot() {
        let ledger = mined_ledger();
        // genesis 1 + (reward + 1) + (reward + 1)
        assert_eq!(ledger.get_total_transactions(), 5);
        let snapshot = ledger.chain_snapshot();
        assert_eq!(snapshot.len(), 3);
        for (view, block) in snapshot.iter().zip(ledger.blocks()) {
            assert_eq!(view.index, block.index);
            assert_eq!(view.hash, block.hash);
            assert_eq!(view.transaction_count, block.transactions.len());
        }
    }

    #[test]
    fn block_lookup() {
        let ledger = mined_ledger();
        assert_eq!(ledger.block(2).unwrap().index, 2);
        assert_eq!(ledger.block(3).unwrap_err(), LedgerError::BlockNotFound(3));
        assert_eq!(
            ledger.block(u64::MAX).unwrap_err(),
            LedgerError::BlockNotFound(u64::MAX)
        );
    }

    #[test]
    fn cancelled_mining_leaves_state_unchanged() {
        // Genesis at 64 would never finish; build it cheaply and raise the bar after.
        let mut ledger = Ledger::new(0);
        ledger.config.difficulty = 64;
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();

        let token = CancelToken::new();
        token.cancel();
        let err = ledger
            .mine_pending_transactions_with("M", &MiningControl::with_cancel(token))
            .unwrap_err();
        assert!(matches!(err, LedgerError::MiningCancelled { .. }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending_count(), 1);
    }

    #[test]
    fn bounded_mining_succeeds_when_target_reachable() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        let control = MiningControl::with_timeout(std::time::Duration::from_secs(30));
        let block = ledger
            .mine_pending_transactions_with("M", &control)
            .unwrap()
            .unwrap();
        assert_eq!(block.index, 1);
        assert!(ledger
            .mine_pending_transactions_with("M", &MiningControl::unbounded())
            .unwrap()
            .is_none());
    }

    #[test]
    fn commit_keeps_transactions_queued_after_prepare() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        let mut template = ledger.prepare_block("M").unwrap();
        ledger.add_transaction("Carol", "Dave", 2.0).unwrap();
        template.mine(&MiningControl::unbounded()).unwrap();
        let block = ledger.commit_block(template).unwrap();

        assert_eq!(block.transactions.len(), 2);
        assert_eq!(ledger.pending_count(), 1);
        assert_eq!(ledger.pending()[0].sender, "Carol");
    }

    #[test]
    fn commit_rejects_stale_template() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        let mut stale = ledger.prepare_block("M").unwrap();
        ledger.mine_pending_transactions("M").unwrap();
        stale.mine(&MiningControl::unbounded()).unwrap();

        let violation = ledger.commit_block(stale).unwrap_err();
        assert_eq!(violation.kind, ViolationKind::LinkageMismatch);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn commit_rejects_template_carrying_more_than_pending() {
        let mut ledger = Ledger::new(1);
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        let mut template = ledger.prepare_block("M").unwrap();
        template.mine(&MiningControl::unbounded()).unwrap();
        ledger.pending.clear();

        let violation = ledger.commit_block(template).unwrap_err();
        assert_eq!(violation.kind, ViolationKind::LinkageMismatch);
        assert_eq!(violation.index, 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn unreachable_difficulty_is_rejected() {
        let err = Ledger::try_with_config(LedgerConfig::with_difficulty(65)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::DifficultyTooHigh {
                difficulty: 65,
                max: HASH_HEX_SIZE
            }
        );
        assert!(Ledger::try_with_config(LedgerConfig::with_difficulty(u32::MAX)).is_err());

        let ledger = Ledger::try_with_config(LedgerConfig::with_difficulty(2)).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn new_panics_on_unreachable_difficulty() {
        let _ = Ledger::new(65);
    }

    #[test]
    fn commit_rejects_unmined_template() {
        let mut ledger = Ledger::new(3);
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        let mut template = ledger.prepare_block("M").unwrap();
        // Force a non-qualifying, self-consistent hash.
        while template.block.meets_difficulty(3) {
            template.block.nonce += 1;
            template.block.recompute_hash();
        }
        let violation = ledger.commit_block(template).unwrap_err();
        assert_eq!(violation.kind, ViolationKind::ProofOfWorkMissing);
        assert_eq!(ledger.pending_count(), 1);
    }

    #[test]
    fn summary_example() {
        let mut ledger = mined_ledger();
        ledger.add_transaction("Carol", "Alice", 1.0).unwrap();
        let summary = ledger.summary();
        assert_eq!(summary.length, 3);
        assert_eq!(summary.total_transactions, 5);
        assert_eq!(summary.pending_transactions, 1);
        assert_eq!(summary.difficulty, 2);
        assert_eq!(summary.mining_reward, 6.25);
        assert!(summary.valid);
        assert!(summary.violation.is_none());
        assert_eq!(summary.latest_block.index, 2);
        assert_eq!(ledger.pending_snapshot()[0].sender, "Carol");
    }

    #[test]
    fn custom_reward() {
        let mut ledger = Ledger::with_config(LedgerConfig {
            difficulty: 1,
            mining_reward: 12.5,
        });
        ledger.add_transaction("Alice", "Bob", 1.0).unwrap();
        ledger.mine_pending_transactions("M").unwrap();
        assert_eq!(ledger.get_wallet_balance("M"), 12.5);
    }
}

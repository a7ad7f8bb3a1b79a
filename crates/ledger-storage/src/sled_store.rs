use crate::{AuditStore, MiningRecord};
use anyhow::{Context, Result};
use sled::{Db, Tree};
use std::path::Path;
use tracing::{debug, info};

const TREE_MINING: &str = "mining_records";
const TREE_BALANCES: &str = "balances";

#[derive(Clone)]
pub struct SledStore {
  db: Db,
  mining: Tree,
  balances: Tree,
}

impl SledStore {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let db = sled::open(path).with_context(|| format!("opening sled at {}", path.display()))?;
    let mining = db.open_tree(TREE_MINING)?;
    let balances = db.open_tree(TREE_BALANCES)?;
    info!(path = %path.display(), "sled store opened");
    Ok(Self { db, mining, balances })
  }

  /// Drops every record and cached balance.
  pub fn clear(&self) -> Result<()> {
    self.mining.clear()?;
    self.balances.clear()?;
    self.db.flush()?;
    Ok(())
  }

  fn decode_records<I>(iter: I) -> Result<Vec<MiningRecord>>
  where
    I: Iterator<Item = sled::Result<(sled::IVec, sled::IVec)>>,
  {
    iter
      .map(|entry| {
        let (_, bytes) = entry?;
        bincode::deserialize(&bytes).context("decoding mining record")
      })
      .collect()
  }
}

impl AuditStore for SledStore {
  fn record_mining(&self, record: &MiningRecord) -> Result<()> {
    // Monotonic across restarts, so key order is insertion order even though
    // block indices start over with each in-memory chain.
    let key = self.db.generate_id()?.to_be_bytes();
    let bytes = bincode::serialize(record)?;
    self.mining.insert(key, bytes)?;
    self.db.flush()?;
    debug!(miner = %record.miner, block_index = record.block_index, "mining record stored");
    Ok(())
  }

  fn recent_mining(&self, limit: usize) -> Result<Vec<MiningRecord>> {
    Self::decode_records(self.mining.iter().rev().take(limit))
  }

  fn mining_by_miner(&self, miner: &str) -> Result<Vec<MiningRecord>> {
    let all = Self::decode_records(self.mining.iter().rev())?;
    Ok(all.into_iter().filter(|r| r.miner == miner).collect())
  }

  fn mining_count(&self) -> Result<usize> {
    Ok(self.mining.len())
  }

  fn put_balance(&self, address: &str, balance: f64) -> Result<()> {
    self.balances.insert(address.as_bytes(), &balance.to_be_bytes())?;
    self.db.flush()?;
    Ok(())
  }

  fn cached_balance(&self, address: &str) -> Result<Option<f64>> {
    self
      .balances
      .get(address.as_bytes())?
      .map(|v| -> Result<f64> {
        let arr: [u8; 8] = v
          .as_ref()
          .try_into()
          .with_context(|| format!("corrupt cached balance for {address}"))?;
        Ok(f64::from_be_bytes(arr))
      })
      .transpose()
  }
}

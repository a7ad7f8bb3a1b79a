#![allow(dead_code)]

use std::fs;

use ledger_storage::{sled_store::SledStore, MiningRecord};
use tempfile::{tempdir, TempDir};

pub fn create_temp_store() -> (TempDir, SledStore) {
    // Create a temporary directory for the sled database
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().to_path_buf();
    (
        temp_dir,
        SledStore::open(&db_path).expect("Failed to open SledStore"),
    )
}

pub fn teardown_store(temp_dir: TempDir, store: SledStore) {
    let db_path = temp_dir.path().to_path_buf();
    store.clear().expect("Failed to clear the store");
    drop(store);
    temp_dir.close().expect("Failed to delete temp dir");
    let _ = fs::remove_dir_all(&db_path);
    assert!(!db_path.exists(), "Database directory should be removed");
}

pub fn record(miner: &str, block_index: u64) -> MiningRecord {
    MiningRecord {
        miner: miner.to_string(),
        block_index,
        block_hash: format!("00{:062x}", block_index),
        difficulty: 2,
        nonce: block_index * 17,
        reward: 6.25,
        recorded_at: 1_600_000_000 + block_index,
    }
}

pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
pub const TX_ID_HEX_SIZE: usize = 16;

/// Sender used for synthesized transactions (genesis marker, mining rewards).
pub const MINT_ADDRESS: &str = "0";
pub const GENESIS_RECEIVER: &str = "Genesis";

pub const DEFAULT_DIFFICULTY: u32 = 2;
pub const MINING_REWARD: f64 = 6.25;

/// Nonce attempts between cancellation / deadline checks.
pub const MINING_CHECK_INTERVAL: u64 = 1024;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

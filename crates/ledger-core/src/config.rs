use crate::constants::{DEFAULT_DIFFICULTY, MINING_REWARD};
use serde::{Deserialize, Serialize};

/// Parameters fixed for the lifetime of a [`crate::Ledger`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Required number of leading hex `'0'` characters in a block hash.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Amount credited to the miner of each block.
    #[serde(default = "default_mining_reward")]
    pub mining_reward: f64,
}

impl LedgerConfig {
    pub fn with_difficulty(difficulty: u32) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            mining_reward: MINING_REWARD,
        }
    }
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_mining_reward() -> f64 {
    MINING_REWARD
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("amount must be positive, got {0}")]
    InvalidAmount(f64),

    #[error("difficulty {difficulty} exceeds the {max}-character digest")]
    DifficultyTooHigh { difficulty: u32, max: usize },

    #[error("block #{0} not found")]
    BlockNotFound(u64),

    #[error("mining cancelled after {attempts} attempts")]
    MiningCancelled { attempts: u64 },

    #[error("mining timed out after {attempts} attempts")]
    MiningTimedOut { attempts: u64 },

    #[error("mined block rejected: {0}")]
    RejectedBlock(#[from] ChainViolation),
}

/// Which integrity check a block failed during chain validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Stored hash differs from the hash recomputed from the block's fields.
    HashMismatch,
    /// `previous_hash` does not match the prior block's stored hash.
    LinkageMismatch,
    /// Stored hash does not satisfy the difficulty target.
    ProofOfWorkMissing,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ViolationKind::HashMismatch => "invalid hash",
            ViolationKind::LinkageMismatch => "invalid previous hash",
            ViolationKind::ProofOfWorkMissing => "invalid proof of work",
        };
        f.write_str(s)
    }
}

/// First integrity violation found while walking the chain.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[error("block #{index}: {kind}")]
pub struct ChainViolation {
    pub index: u64,
    pub kind: ViolationKind,
}

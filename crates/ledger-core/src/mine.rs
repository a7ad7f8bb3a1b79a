use crate::error::{LedgerError, Result};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

/// Cloneable flag used to stop an in-flight nonce search from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Once set the flag stays set.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Bounds for a nonce search. The default is unbounded, which is the
/// reference behaviour and may never return for large difficulties.
#[derive(Clone, Debug, Default)]
pub struct MiningControl {
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl MiningControl {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// The deadline starts counting now, not when the search begins.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    pub fn with_cancel(token: CancelToken) -> Self {
        Self {
            deadline: None,
            cancel: Some(token),
        }
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.deadline.is_none() && self.cancel.is_none()
    }

    pub(crate) fn check(&self, attempts: u64) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(LedgerError::MiningCancelled { attempts });
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(LedgerError::MiningTimedOut { attempts });
        }
        Ok(())
    }
}

/// Result of a completed nonce search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiningOutcome {
    pub nonce: u64,
    /// Hashes computed after the initial one.
    pub attempts: u64,
    pub elapsed: Duration,
}

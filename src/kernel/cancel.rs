use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::state::StateDelta;
use crate::intent::{Intent, Special};

/// Handle another task can hold to cancel the session out of band, e.g. while
/// a device lookup is still in flight.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    generation: Arc<AtomicU64>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Tracks the cancellation epoch of one session.
///
/// Every cancel bumps the shared generation. The reactor remembers the
/// generation it last synced to; a mismatch after an await means the result
/// in hand belongs to a dialog that no longer exists.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    generation: Arc<AtomicU64>,
    observed: u64,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            generation: self.generation.clone(),
        }
    }

    /// Pure decision: does this intent cancel the dialog? Evaluated before any
    /// state-specific dispatch.
    pub fn process(&mut self, intent: &Intent) -> Vec<StateDelta> {
        if matches!(intent, Intent::Special(Special::Nevermind)) {
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.sync();
            return vec![StateDelta::Reset];
        }
        Vec::new()
    }

    /// Current epoch, to be compared with `is_stale` after an await.
    pub fn epoch(&self) -> u64 {
        self.observed
    }

    /// True when a cancel arrived since the last sync.
    pub fn is_stale(&self) -> bool {
        self.generation.load(Ordering::SeqCst) != self.observed
    }

    pub fn sync(&mut self) {
        self.observed = self.generation.load(Ordering::SeqCst);
    }
}

//! Per-character in-flight guard.
//!
//! At most one attempt per character runs between snapshot and apply. A
//! second attempt for the same character is turned away immediately rather
//! than queued; attempts for different characters never contend.
//!
//! A character's lock lives in the map only while something holds it, so
//! the map stays as small as the number of characters currently acting.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::CharacterId;

type LockMap = DashMap<CharacterId, Arc<Mutex<()>>>;

/// Held for the duration of one attempt. Dropping it releases the character.
#[derive(Debug)]
pub struct InFlight {
    id: CharacterId,
    locks: Arc<LockMap>,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        drop(self.held.take());
        // Only the map's own reference left means nobody else is waiting on it
        self.locks.remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Registry of per-character locks.
#[derive(Debug, Default)]
pub struct CharacterGuard {
    locks: Arc<LockMap>,
}

impl CharacterGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the character, or `None` if another attempt holds it.
    pub fn try_acquire(&self, id: CharacterId) -> Option<InFlight> {
        let lock = Arc::clone(self.locks.entry(id).or_default().value());
        let held = lock.try_lock_owned().ok()?;
        Some(InFlight {
            id,
            locks: Arc::clone(&self.locks),
            held: Some(held),
        })
    }

    /// Number of characters with a live lock entry.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

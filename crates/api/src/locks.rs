//! Per-user draft write locks.
//!
//! The draft wizard has one mutable slot per user, and several endpoints
//! (save, advance, submit, resume) do read-merge-write cycles on it. A
//! per-user async mutex serializes those cycles so two requests from the
//! same account cannot interleave between the read and the write.

use std::collections::HashMap;
use std::sync::Arc;

use homehni_core::types::DbId;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Registry of per-user draft locks.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct DraftLocks {
    locks: RwLock<HashMap<DbId, Arc<Mutex<()>>>>,
}

impl DraftLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Acquire the lock for one user, creating it on first use.
    ///
    /// The guard is owned so handlers can hold it across awaits; it releases
    /// on drop.
    pub async fn acquire(&self, user_id: DbId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.write().await;
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of users with a registered lock. Locks are never evicted; the
    /// map grows with the active-author population, which is bounded.
    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locks.read().await.is_empty()
    }
}

impl Default for DraftLocks {
    fn default() -> Self {
        Self::new()
    }
}

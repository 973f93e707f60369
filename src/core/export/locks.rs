//! Per-owner export serialization

use crate::domain::ids::OwnerKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per owner key
///
/// Entries nobody holds or waits on are dropped on the next acquire.
#[derive(Debug, Default)]
pub struct OwnerLocks {
    locks: Mutex<HashMap<OwnerKey, Arc<AsyncMutex<()>>>>,
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other export for `owner` is running
    pub async fn acquire(&self, owner: &OwnerKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.retain(|key, lock| key == owner || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(owner.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of owners currently tracked
    pub fn tracked(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}

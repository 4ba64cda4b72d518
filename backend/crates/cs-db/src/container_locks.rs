use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

/// Per-container move serialization.
///
/// The position updates for a move are a read-recompute-write sequence with
/// no optimistic-lock guard, so two concurrent moves on the same container
/// could interleave at the storage layer and lose an update. Holding the
/// container's mutex for the whole sequence gives single-writer-per-container
/// semantics; moves on different containers stay concurrent.
#[derive(Clone, Default)]
pub struct ContainerLocks {
    inner: Arc<RwLock<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl ContainerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a single container (a board for list moves, a list for task
    /// moves) for the duration of the returned guard.
    pub async fn acquire(&self, container_id: Uuid) -> OwnedMutexGuard<()> {
        // Fast path: the lock already exists (read lock)
        {
            let locks = self.inner.read().await;
            if let Some(lock) = locks.get(&container_id) {
                return Arc::clone(lock).lock_owned().await;
            }
        }

        // Slow path: create it under the write lock, re-checking in case
        // another task created it while we waited
        let lock = {
            let mut locks = self.inner.write().await;
            Arc::clone(
                locks
                    .entry(container_id)
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };

        lock.lock_owned().await
    }

    /// Lock both containers of a cross-container move. Acquisition is
    /// ordered by id so two movers touching the same pair cannot deadlock.
    pub async fn acquire_pair(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> (OwnedMutexGuard<()>, Option<OwnedMutexGuard<()>>) {
        if a == b {
            return (self.acquire(a).await, None);
        }

        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.acquire(first).await;
        let second_guard = self.acquire(second).await;
        (first_guard, Some(second_guard))
    }
}

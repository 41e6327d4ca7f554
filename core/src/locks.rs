//! Per-key async locks.
//!
//! Used to serialize the fetch → decide → save sequence for a single ticket
//! while leaving other tickets unblocked. Entries are removed as soon as the
//! last holder or waiter lets go, so the map only ever contains keys that are
//! currently contended.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A set of async mutexes addressed by key
#[derive(Debug)]
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Slot>>,
}

/// One key's mutex plus the number of guards holding or waiting on it
#[derive(Debug, Default)]
struct Slot {
    lock: Arc<AsyncMutex<()>>,
    users: usize,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty lock set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until the lock for `key` is free and takes it
    ///
    /// Dropping the returned future before it resolves releases the waiter's
    /// claim on the entry.
    pub async fn lock(&self, key: K) -> KeyedGuard<'_, K> {
        let lock = {
            let mut locks = self.registry();
            let slot = locks.entry(key.clone()).or_default();
            slot.users += 1;
            Arc::clone(&slot.lock)
        };

        // Registered before the first await so cancellation while waiting
        // still runs the release in `Drop`.
        let mut keyed = KeyedGuard {
            owner: self,
            key,
            guard: None,
        };
        keyed.guard = Some(lock.lock_owned().await);
        keyed
    }

    /// Number of keys currently held or waited on
    #[must_use]
    pub fn contended(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<K, Slot>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the lock for one key until dropped
#[derive(Debug)]
pub struct KeyedGuard<'a, K>
where
    K: Eq + Hash + Clone,
{
    owner: &'a KeyedLocks<K>,
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Drop for KeyedGuard<'_, K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.owner.registry();
        let idle = locks.get_mut(&self.key).is_some_and(|slot| {
            slot.users = slot.users.saturating_sub(1);
            slot.users == 0
        });
        if idle {
            locks.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_entries_removed_after_release() {
        let locks = KeyedLocks::new();
        {
            let _a = locks.lock(1).await;
            let _b = locks.lock(2).await;
            assert_eq!(locks.contended(), 2);
        }
        assert_eq!(locks.contended(), 0);
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock("ticket").await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            assert!(handle.await.is_ok());
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.contended(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_leak_entry() {
        let locks = Arc::new(KeyedLocks::new());
        let held = locks.lock(1).await;

        let waiter = tokio::spawn({
            let locks = Arc::clone(&locks);
            async move {
                let _guard = locks.lock(1).await;
            }
        });
        // Let the waiter register and park on the held lock
        tokio::task::yield_now().await;
        assert_eq!(locks.contended(), 1);

        drop(held);
        waiter.abort();
        let _ = waiter.await;

        assert_eq!(locks.contended(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_leaves_holder_entry() {
        let locks = Arc::new(KeyedLocks::new());
        let held = locks.lock(1).await;

        let waiter = tokio::spawn({
            let locks = Arc::clone(&locks);
            async move {
                let _guard = locks.lock(1).await;
            }
        });
        tokio::task::yield_now().await;
        waiter.abort();
        let _ = waiter.await;

        assert_eq!(locks.contended(), 1);
        drop(held);
        assert_eq!(locks.contended(), 0);
    }
}

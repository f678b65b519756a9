/*!
 * Per-key serialization for history writes.
 *
 * Two requests for the same natural key must not both read usage N and
 * both write N+1. Each key gets its own async mutex; different keys
 * never wait on each other.
 */

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

use crate::database::NaturalKey;

/// Lazily created async locks, one per natural key
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<NaturalKey, Arc<tokio::sync::Mutex<()>>>>,
}

/// Held while a key is being written; releases the key on drop
pub struct KeyGuard {
    _guard: OwnedMutexGuard<()>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `key` is free and take it
    pub async fn lock(&self, key: &NaturalKey) -> KeyGuard {
        let mutex = {
            let mut locks = self.locks.lock();
            // Entries nobody else holds or waits on can go
            locks.retain(|k, m| k == key || Arc::strong_count(m) > 1);
            locks.entry(key.clone()).or_default().clone()
        };

        KeyGuard {
            _guard: mutex.lock_owned().await,
        }
    }

    /// Number of keys currently tracked
    pub fn tracked(&self) -> usize {
        self.locks.lock().len()
    }
}

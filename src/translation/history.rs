/*!
 * History store adapter.
 *
 * Owns every mutation of translation records and publishes a change
 * event after each one. Read projections are exposed as `HistoryFeed`s:
 * a snapshot query plus a notification stream, so a view can re-query
 * whenever the store changes. Feeds may lag in-flight writes but never
 * block them.
 */

use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::concurrency::KeyedLocks;
use crate::database::{
    now_millis, HistoryBackend, HistoryOrder, NaturalKey, NewTranslation, TranslationRecord,
};
use crate::errors::StorageError;

/// Buffered change events per subscriber before it starts lagging
const EVENT_CAPACITY: usize = 64;

/// A committed change to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A record was created or its usage bumped
    Upserted(i64),
    /// A record's favorite flag flipped
    FavoriteToggled(i64),
    /// A single record was removed
    Deleted(i64),
    /// Every record was removed
    Cleared,
}

/// Upserts and queries persisted translation records
#[derive(Debug)]
pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
    locks: KeyedLocks,
    events: broadcast::Sender<HistoryEvent>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            locks: KeyedLocks::new(),
            events,
        }
    }

    /// Record a successful translation of (text, source, target)
    ///
    /// An existing record gets usage + 1, a fresh timestamp and the new
    /// translated text; otherwise a record is created with usage 1.
    pub async fn upsert(
        &self,
        text: &str,
        translated: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationRecord, StorageError> {
        let key = NaturalKey::new(text, source, target);
        let _guard = self.locks.lock(&key).await;

        let record = match self.backend.find_by_key(&key).await? {
            Some(mut existing) => {
                existing.usage_count += 1;
                existing.timestamp = now_millis();
                existing.translated_text = translated.to_string();
                match self.backend.update(&existing).await {
                    Ok(()) => existing,
                    // Deleted or cleared since the lookup: this use starts a new record
                    Err(StorageError::NotFound(id)) => {
                        debug!("History record {} vanished before update, re-inserting", id);
                        self.backend
                            .insert_or_replace(NewTranslation::first_use(key, translated, now_millis()))
                            .await?
                    }
                    Err(e) => return Err(e),
                }
            }
            None => {
                self.backend
                    .insert_or_replace(NewTranslation::first_use(key, translated, now_millis()))
                    .await?
            }
        };

        debug!("History record {} now at {} use(s)", record.id, record.usage_count);
        self.notify(HistoryEvent::Upserted(record.id));
        Ok(record)
    }

    /// Flip the favorite flag of record `id`, leaving usage and timestamp alone
    pub async fn toggle_favorite(&self, id: i64) -> Result<TranslationRecord, StorageError> {
        let current = self
            .backend
            .get_by_id(id)
            .await?
            .ok_or(StorageError::NotFound(id))?;

        // Re-read under the key lock so a concurrent upsert cannot overwrite the flag
        let _guard = self.locks.lock(&current.key()).await;
        let mut record = self
            .backend
            .get_by_id(id)
            .await?
            .ok_or(StorageError::NotFound(id))?;

        record.is_favorite = !record.is_favorite;
        self.backend.update(&record).await?;

        self.notify(HistoryEvent::FavoriteToggled(id));
        Ok(record)
    }

    /// Remove one record; `false` when it did not exist
    pub async fn delete_one(&self, id: i64) -> Result<bool, StorageError> {
        let deleted = self.backend.delete_by_id(id).await?;
        if deleted {
            self.notify(HistoryEvent::Deleted(id));
        }
        Ok(deleted)
    }

    /// Remove every record, returning how many were dropped
    pub async fn clear_all(&self) -> Result<u64, StorageError> {
        let count = self.backend.delete_all().await?;
        self.notify(HistoryEvent::Cleared);
        Ok(count)
    }

    /// One-shot ordered read
    pub async fn list(&self, order: HistoryOrder) -> Result<Vec<TranslationRecord>, StorageError> {
        self.backend.list(order).await
    }

    /// Live view over one ordered projection
    pub fn subscribe(&self, order: HistoryOrder) -> HistoryFeed {
        HistoryFeed {
            backend: self.backend.clone(),
            order,
            events: self.events.subscribe(),
        }
    }

    fn notify(&self, event: HistoryEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

/// Live ordered view of the history
///
/// `snapshot` returns the projection as of now; `changed` waits until the
/// store is mutated again. Dropping the feed unsubscribes.
#[derive(Debug)]
pub struct HistoryFeed {
    backend: Arc<dyn HistoryBackend>,
    order: HistoryOrder,
    events: broadcast::Receiver<HistoryEvent>,
}

impl HistoryFeed {
    pub fn order(&self) -> HistoryOrder {
        self.order
    }

    /// Current contents of the projection
    pub async fn snapshot(&self) -> Result<Vec<TranslationRecord>, StorageError> {
        self.backend.list(self.order).await
    }

    /// Wait for the next change; `None` once the store is gone
    ///
    /// A lagging subscriber skips the overwritten events and wakes on the
    /// oldest one still buffered.
    pub async fn changed(&mut self) -> Option<HistoryEvent> {
        loop {
            match self.events.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("{} feed skipped {} change event(s)", self.order, skipped);
                    // Next recv yields the oldest retained event
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next change and return the refreshed projection
    pub async fn next_snapshot(&mut self) -> Option<Result<Vec<TranslationRecord>, StorageError>> {
        self.changed().await?;
        Some(self.snapshot().await)
    }
}

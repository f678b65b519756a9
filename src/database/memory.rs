/*!
 * In-process implementation of the history storage contract.
 */

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::models::{HistoryOrder, NaturalKey, NewTranslation, TranslationRecord};
use super::HistoryBackend;
use crate::errors::StorageError;

#[derive(Debug, Default)]
struct MemoryState {
    records: BTreeMap<i64, TranslationRecord>,
    next_id: i64,
}

/// History store kept entirely in memory; clones share the same records
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }
}

/// Sort records the same way the SQL projections do
pub(crate) fn apply_order(mut records: Vec<TranslationRecord>, order: HistoryOrder) -> Vec<TranslationRecord> {
    match order {
        HistoryOrder::Recency => {
            records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        }
        HistoryOrder::Usage => {
            records.sort_by(|a, b| {
                b.usage_count
                    .cmp(&a.usage_count)
                    .then(b.timestamp.cmp(&a.timestamp))
                    .then(b.id.cmp(&a.id))
            });
        }
        HistoryOrder::Favorites => {
            records.retain(|r| r.is_favorite);
            records.sort_by(|a, b| a.original_text.cmp(&b.original_text).then(a.id.cmp(&b.id)));
        }
    }
    records
}

#[async_trait]
impl HistoryBackend for MemoryStore {
    async fn find_by_key(&self, key: &NaturalKey) -> Result<Option<TranslationRecord>, StorageError> {
        let state = self.state.read();
        Ok(state.records.values().find(|r| r.key() == *key).cloned())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<TranslationRecord>, StorageError> {
        Ok(self.state.read().records.get(&id).cloned())
    }

    async fn insert_or_replace(&self, new: NewTranslation) -> Result<TranslationRecord, StorageError> {
        let mut state = self.state.write();

        state.records.retain(|_, r| r.key() != new.key);
        state.next_id += 1;

        let record = TranslationRecord {
            id: state.next_id,
            original_text: new.key.original_text,
            translated_text: new.translated_text,
            source_language: new.key.source_language,
            target_language: new.key.target_language,
            timestamp: new.timestamp,
            usage_count: new.usage_count,
            is_favorite: new.is_favorite,
        };
        state.records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn update(&self, record: &TranslationRecord) -> Result<(), StorageError> {
        let mut state = self.state.write();
        match state.records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(record.id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError> {
        Ok(self.state.write().records.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, StorageError> {
        let mut state = self.state.write();
        let count = state.records.len() as u64;
        state.records.clear();
        Ok(count)
    }

    async fn list(&self, order: HistoryOrder) -> Result<Vec<TranslationRecord>, StorageError> {
        let records: Vec<TranslationRecord> = self.state.read().records.values().cloned().collect();
        Ok(apply_order(records, order))
    }
}

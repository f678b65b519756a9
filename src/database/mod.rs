/*!
 * Persistence for the translation history.
 *
 * `HistoryBackend` is the storage contract the history adapter depends on:
 * lookup by natural key, insert-or-replace, update, delete by id, delete
 * all, and three ordered read queries. Two engines implement it:
 * - `Repository`: SQLite via rusqlite
 * - `MemoryStore`: in-process map, for tests and ephemeral sessions
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::StorageError;

pub mod connection;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;

pub use connection::{DatabaseConnection, DatabaseStats};
pub use memory::MemoryStore;
pub use models::{now_millis, HistoryOrder, NaturalKey, NewTranslation, TranslationRecord};
pub use repository::Repository;

/// Structured-storage contract for history records
#[async_trait]
pub trait HistoryBackend: Send + Sync + Debug {
    /// Look up the record for a natural key
    async fn find_by_key(&self, key: &NaturalKey) -> Result<Option<TranslationRecord>, StorageError>;

    /// Look up a record by surrogate id
    async fn get_by_id(&self, id: i64) -> Result<Option<TranslationRecord>, StorageError>;

    /// Insert a record, replacing any record with the same natural key
    async fn insert_or_replace(&self, new: NewTranslation) -> Result<TranslationRecord, StorageError>;

    /// Overwrite the stored record with the same id
    async fn update(&self, record: &TranslationRecord) -> Result<(), StorageError>;

    /// Delete one record; `false` when no record had this id
    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError>;

    /// Delete every record, returning how many were removed
    async fn delete_all(&self) -> Result<u64, StorageError>;

    /// Read all records in the given order
    async fn list(&self, order: HistoryOrder) -> Result<Vec<TranslationRecord>, StorageError>;
}

/*!
 * SQLite implementation of the history storage contract.
 */

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::connection::DatabaseConnection;
use super::models::{HistoryOrder, NaturalKey, NewTranslation, TranslationRecord};
use super::HistoryBackend;
use crate::errors::StorageError;

const SELECT_COLUMNS: &str = "SELECT id, original_text, translated_text, source_language, target_language,
       timestamp, usage_count, is_favorite
FROM translation_history";

/// Repository for history records stored in SQLite
#[derive(Clone, Debug)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<TranslationRecord> {
        Ok(TranslationRecord {
            id: row.get(0)?,
            original_text: row.get(1)?,
            translated_text: row.get(2)?,
            source_language: row.get(3)?,
            target_language: row.get(4)?,
            timestamp: row.get(5)?,
            usage_count: row.get(6)?,
            is_favorite: row.get::<_, i64>(7)? != 0,
        })
    }

    fn get_by_id_sync(conn: &Connection, id: i64) -> anyhow::Result<Option<TranslationRecord>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        Ok(conn.query_row(&sql, [id], Self::map_row).optional()?)
    }

    fn order_clause(order: HistoryOrder) -> &'static str {
        match order {
            HistoryOrder::Recency => "ORDER BY timestamp DESC, id DESC",
            HistoryOrder::Usage => "ORDER BY usage_count DESC, timestamp DESC, id DESC",
            HistoryOrder::Favorites => "WHERE is_favorite = 1 ORDER BY original_text ASC, id ASC",
        }
    }
}

#[async_trait]
impl HistoryBackend for Repository {
    async fn find_by_key(&self, key: &NaturalKey) -> Result<Option<TranslationRecord>, StorageError> {
        let key = key.clone();

        let record = self
            .db
            .execute_async(move |conn| {
                let sql = format!(
                    "{} WHERE original_text = ?1 AND source_language = ?2 AND target_language = ?3",
                    SELECT_COLUMNS
                );
                Ok(conn
                    .query_row(
                        &sql,
                        params![key.original_text, key.source_language, key.target_language],
                        Self::map_row,
                    )
                    .optional()?)
            })
            .await?;

        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<TranslationRecord>, StorageError> {
        Ok(self
            .db
            .execute_async(move |conn| Self::get_by_id_sync(conn, id))
            .await?)
    }

    async fn insert_or_replace(&self, new: NewTranslation) -> Result<TranslationRecord, StorageError> {
        let record = self
            .db
            .transaction_async(move |tx| {
                tx.execute(
                    r#"
                    INSERT OR REPLACE INTO translation_history (
                        original_text, translated_text, source_language, target_language,
                        timestamp, usage_count, is_favorite
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![
                        new.key.original_text,
                        new.translated_text,
                        new.key.source_language,
                        new.key.target_language,
                        new.timestamp,
                        new.usage_count,
                        new.is_favorite as i64,
                    ],
                )?;
                let id = tx.last_insert_rowid();
                Self::get_by_id_sync(tx, id)?
                    .ok_or_else(|| anyhow::anyhow!("Inserted record {} not readable", id))
            })
            .await?;

        debug!("Inserted history record {}", record.id);
        Ok(record)
    }

    async fn update(&self, record: &TranslationRecord) -> Result<(), StorageError> {
        let record = record.clone();
        let id = record.id;

        let changed = self
            .db
            .execute_async(move |conn| {
                let changed = conn.execute(
                    r#"
                    UPDATE translation_history
                    SET original_text = ?2, translated_text = ?3, source_language = ?4,
                        target_language = ?5, timestamp = ?6, usage_count = ?7, is_favorite = ?8
                    WHERE id = ?1
                    "#,
                    params![
                        record.id,
                        record.original_text,
                        record.translated_text,
                        record.source_language,
                        record.target_language,
                        record.timestamp,
                        record.usage_count,
                        record.is_favorite as i64,
                    ],
                )?;
                Ok(changed)
            })
            .await?;

        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError> {
        let deleted = self
            .db
            .execute_async(move |conn| {
                Ok(conn.execute("DELETE FROM translation_history WHERE id = ?1", [id])?)
            })
            .await?;

        Ok(deleted > 0)
    }

    async fn delete_all(&self) -> Result<u64, StorageError> {
        let deleted = self
            .db
            .execute_async(|conn| Ok(conn.execute("DELETE FROM translation_history", [])?))
            .await?;

        debug!("Cleared {} history records", deleted);
        Ok(deleted as u64)
    }

    async fn list(&self, order: HistoryOrder) -> Result<Vec<TranslationRecord>, StorageError> {
        let records = self
            .db
            .execute_async(move |conn| {
                let sql = format!("{} {}", SELECT_COLUMNS, Self::order_clause(order));
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map([], Self::map_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await?;

        Ok(records)
    }
}

/*!
 * Database schema definitions and migrations.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    // WAL lets other processes read the file during a write; in-process access is serialized by the connection mutex
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translation_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            original_text TEXT NOT NULL,
            translated_text TEXT NOT NULL,
            source_language TEXT NOT NULL,
            target_language TEXT NOT NULL,
            timestamp INTEGER NOT NULL,
            usage_count INTEGER NOT NULL DEFAULT 1 CHECK (usage_count >= 1),
            is_favorite INTEGER NOT NULL DEFAULT 0,
            UNIQUE(original_text, source_language, target_language)
        );

        CREATE INDEX IF NOT EXISTS idx_history_timestamp ON translation_history(timestamp);
        CREATE INDEX IF NOT EXISTS idx_history_usage ON translation_history(usage_count);
        CREATE INDEX IF NOT EXISTS idx_history_favorite ON translation_history(is_favorite, original_text);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Migrate the schema from one version to another
///
/// v1 is the first schema, so there is no migration path yet.
fn migrate_schema(_conn: &Connection, from_version: i32) -> Result<()> {
    Err(anyhow::anyhow!(
        "Unknown schema version: {}. Cannot migrate.",
        from_version
    ))
}

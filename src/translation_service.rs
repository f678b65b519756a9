/*!
 * Public entry point for presentation code.
 *
 * `TranslationService` wires the provider chain, the orchestrator and
 * the history store together and exposes the operations a UI needs:
 * translate, favorite, delete, clear and three live history views.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::app_config::Config;
use crate::database::{
    DatabaseConnection, DatabaseStats, HistoryBackend, HistoryOrder, MemoryStore, Repository,
    TranslationRecord,
};
use crate::errors::{StorageError, TranslationError};
use crate::language_utils::{self, Language, LanguagePair};
use crate::providers::{self, ProviderChain};
use crate::translation::{HistoryFeed, HistoryStore, Orchestrator, Translation};

/// Cheap to clone; clones share providers and storage
#[derive(Debug, Clone)]
pub struct TranslationService {
    orchestrator: Arc<Orchestrator>,
    /// Present when history lives in SQLite
    database: Option<DatabaseConnection>,
    default_pair: LanguagePair,
}

impl TranslationService {
    /// Service over an explicit provider chain and storage backend
    pub fn new(chain: ProviderChain, backend: Arc<dyn HistoryBackend>) -> Self {
        let history = Arc::new(HistoryStore::new(backend));
        Self {
            orchestrator: Arc::new(Orchestrator::new(chain, history)),
            database: None,
            default_pair: LanguagePair::default(),
        }
    }

    /// Build the service described by `config`
    ///
    /// `ephemeral` keeps history in memory instead of the SQLite database.
    pub fn from_config(config: &Config, ephemeral: bool) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let chain = providers::build_chain(&config.providers);
        info!(
            "Provider chain: {}",
            chain.iter().map(|p| p.name()).collect::<Vec<_>>().join(" -> ")
        );

        let (backend, database): (Arc<dyn HistoryBackend>, Option<DatabaseConnection>) = if ephemeral {
            debug!("Using in-memory history");
            (Arc::new(MemoryStore::new()), None)
        } else {
            let path = config.resolved_database_path()?;
            let db = DatabaseConnection::new(&path)?;
            (Arc::new(Repository::new(db.clone())), Some(db))
        };

        let history = Arc::new(HistoryStore::new(backend));
        let orchestrator =
            Orchestrator::new(chain, history).with_max_input_chars(config.max_input_chars);

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            database,
            default_pair: LanguagePair::new(
                config.source_language.as_str(),
                config.target_language.as_str(),
            ),
        })
    }

    pub fn with_max_input_chars(self, max_input_chars: usize) -> Self {
        let orchestrator = Orchestrator::new(
            self.orchestrator.chain().to_vec(),
            self.orchestrator.history().clone(),
        )
        .with_max_input_chars(max_input_chars);

        Self {
            orchestrator: Arc::new(orchestrator),
            ..self
        }
    }

    /// Language pair used when the caller does not pick one
    pub fn default_pair(&self) -> &LanguagePair {
        &self.default_pair
    }

    /// Translate `text` and record it in the history
    ///
    /// The work runs in its own task: dropping the returned future stops
    /// delivery of the result but not the provider call or the history write.
    pub async fn translate_text(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, TranslationError> {
        let orchestrator = self.orchestrator.clone();
        let (text, source, target) = (text.to_string(), source.to_string(), target.to_string());

        tokio::spawn(async move { orchestrator.translate(&text, &source, &target).await })
            .await
            .map_err(|e| TranslationError::TaskFailed(e.to_string()))?
    }

    pub async fn toggle_favorite(&self, id: i64) -> Result<TranslationRecord, StorageError> {
        self.history().toggle_favorite(id).await
    }

    /// Delete one record; `false` when the id was unknown
    pub async fn delete_translation(&self, id: i64) -> Result<bool, StorageError> {
        self.history().delete_one(id).await
    }

    pub async fn clear_all_data(&self) -> Result<u64, StorageError> {
        self.history().clear_all().await
    }

    /// Most recently used first
    pub fn get_history(&self) -> HistoryFeed {
        self.history().subscribe(HistoryOrder::Recency)
    }

    /// Favorites only, alphabetical
    pub fn get_favorites(&self) -> HistoryFeed {
        self.history().subscribe(HistoryOrder::Favorites)
    }

    /// Most used first
    pub fn get_history_by_usage(&self) -> HistoryFeed {
        self.history().subscribe(HistoryOrder::Usage)
    }

    pub fn languages(&self) -> &'static [Language] {
        language_utils::supported_languages()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.orchestrator.provider_names()
    }

    /// Summary counts over the stored history
    pub async fn stats(&self) -> Result<DatabaseStats, StorageError> {
        if let Some(db) = self.database.clone() {
            return tokio::task::spawn_blocking(move || db.stats())
                .await
                .map_err(|e| StorageError::TaskFailed(e.to_string()))?
                .map_err(StorageError::from);
        }

        let records = self.history().list(HistoryOrder::Recency).await?;
        Ok(DatabaseStats {
            record_count: records.len() as i64,
            favorite_count: records.iter().filter(|r| r.is_favorite).count() as i64,
            total_uses: records.iter().map(|r| r.usage_count).sum(),
            file_size_bytes: 0,
        })
    }

    fn history(&self) -> &Arc<HistoryStore> {
        self.orchestrator.history()
    }
}

/*!
 * History record types.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a history record: (original text, source language, target language)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NaturalKey {
    pub original_text: String,
    pub source_language: String,
    pub target_language: String,
}

impl NaturalKey {
    pub fn new(original_text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            original_text: original_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// One persisted translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Surrogate id assigned by the store
    pub id: i64,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    /// Last use, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Number of successful translations of this key, at least 1
    pub usage_count: i64,
    pub is_favorite: bool,
}

impl TranslationRecord {
    pub fn key(&self) -> NaturalKey {
        NaturalKey::new(&self.original_text, &self.source_language, &self.target_language)
    }
}

/// A record that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub key: NaturalKey,
    pub translated_text: String,
    pub timestamp: i64,
    pub usage_count: i64,
    pub is_favorite: bool,
}

impl NewTranslation {
    /// First translation of a key: usage 1, not a favorite
    pub fn first_use(key: NaturalKey, translated_text: &str, timestamp: i64) -> Self {
        Self {
            key,
            translated_text: translated_text.to_string(),
            timestamp,
            usage_count: 1,
            is_favorite: false,
        }
    }
}

/// Ordered read projections over the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
    /// Most recently used first
    Recency,
    /// Most used first
    Usage,
    /// Favorites only, alphabetical by original text
    Favorites,
}

impl fmt::Display for HistoryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryOrder::Recency => write!(f, "recency"),
            HistoryOrder::Usage => write!(f, "usage"),
            HistoryOrder::Favorites => write!(f, "favorites"),
        }
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

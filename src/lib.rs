/*!
 * # babelcache - translation with provider fallback and a history cache
 *
 * A Rust library that translates short texts through a chain of free
 * remote providers and keeps a deduplicated, usage-ranked history.
 *
 * ## Features
 *
 * - Sequential provider chain (MyMemory, LibreTranslate) with fallback
 * - Validation of provider output (blank, echoed input, error messages)
 * - Whitespace normalization and punctuation repair
 * - History keyed by (text, source language, target language) with usage
 *   counts, favorites and live ordered views
 * - SQLite or in-memory storage
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `providers`: Client implementations for the translation backends:
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::libretranslate`: LibreTranslate API client
 *   - `providers::mock`: Scripted provider for tests
 * - `validation`: Acceptance checks for provider output
 * - `translation`: Orchestration and history:
 *   - `translation::orchestrator`: Provider chain with fallback
 *   - `translation::history`: History store and live feeds
 *   - `translation::formatting`: Normalization and post-processing
 * - `database`: Storage contract plus SQLite and in-memory engines
 * - `translation_service`: Public facade for presentation code
 * - `language_utils`: Language table and ISO 639-1 helpers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;
pub mod translation_service;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, StorageError, TranslationError};
pub use language_utils::{get_language_name, Language, LanguagePair};
pub use translation::{HistoryFeed, Translation};
pub use translation_service::TranslationService;

/*!
 * Translation orchestration and history caching.
 *
 * - `formatting`: input normalization and output post-processing
 * - `orchestrator`: sequential provider chain with validation and fallback
 * - `history`: history store adapter and live ordered feeds
 * - `concurrency`: per-key locks serializing history writes
 */

// Re-export main types for easier usage
pub use self::formatting::TextNormalizer;
pub use self::history::{HistoryEvent, HistoryFeed, HistoryStore};
pub use self::orchestrator::{Orchestrator, Translation};

// Submodules
pub mod concurrency;
pub mod formatting;
pub mod history;
pub mod orchestrator;

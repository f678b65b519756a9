/*!
 * Provider implementations for remote translation services.
 *
 * Every backend is exposed through the same `TranslationProvider`
 * capability and maps its own response schema into a `ProviderOutcome`.
 * Transport errors, non-2xx statuses, empty bodies and schema mismatches
 * all become `ProviderOutcome::Failure`; nothing escapes a client.
 *
 * - `mymemory`: MyMemory API
 * - `libretranslate`: LibreTranslate API
 * - `mock`: scripted provider for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;

/// Result of one provider call
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// Raw translated text as returned by the provider
    Success(String),
    /// The call failed before yielding usable text
    Failure(ProviderError),
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Translated text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            Self::Failure(_) => None,
        }
    }
}

impl From<Result<String, ProviderError>> for ProviderOutcome {
    fn from(result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(e) => Self::Failure(e),
        }
    }
}

/// Common capability for all translation backends
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target` (ISO 639-1 codes)
    async fn translate(&self, text: &str, source: &str, target: &str) -> ProviderOutcome;
}

/// Ordered provider chain shared between requests
pub type ProviderChain = Vec<Arc<dyn TranslationProvider>>;

/// Build the provider chain from configuration, keeping configured order
pub fn build_chain<'a>(configs: impl IntoIterator<Item = &'a ProviderConfig>) -> ProviderChain {
    configs
        .into_iter()
        .filter(|c| c.enabled)
        .map(|c| -> Arc<dyn TranslationProvider> {
            match c.kind {
                ProviderKind::MyMemory => Arc::new(mymemory::MyMemory::from_config(c)),
                ProviderKind::LibreTranslate => {
                    Arc::new(libretranslate::LibreTranslate::from_config(c))
                }
            }
        })
        .collect()
}

pub mod http;
pub mod libretranslate;
pub mod mock;
pub mod mymemory;

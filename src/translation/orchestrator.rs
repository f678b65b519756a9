/*!
 * Provider chain orchestration.
 *
 * Providers are tried one at a time in configured order. Transport
 * failures and rejected output are logged and the chain moves on; the
 * first accepted output is post-processed, written to history and
 * returned. Per-provider diagnostics never reach the caller: an
 * exhausted chain is a single `AllProvidersFailed`.
 */

use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::formatting::TextNormalizer;
use super::history::HistoryStore;
use crate::database::TranslationRecord;
use crate::errors::{Rejection, StorageError, TranslationError};
use crate::providers::{ProviderChain, ProviderOutcome};
use crate::validation::ResultValidator;

/// Default maximum input length in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 500;

/// An accepted, post-processed translation
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Final text returned to the caller
    pub text: String,
    /// Name of the provider whose output was accepted
    pub provider: String,
    /// History record after the upsert, when it succeeded
    pub record: Option<TranslationRecord>,
    /// Set when the translation succeeded but the history write did not
    pub history_error: Option<StorageError>,
}

impl Translation {
    pub fn is_recorded(&self) -> bool {
        self.history_error.is_none()
    }
}

/// Sequences providers, validates their output and records the winner
#[derive(Debug)]
pub struct Orchestrator {
    chain: ProviderChain,
    validator: ResultValidator,
    history: Arc<HistoryStore>,
    max_input_chars: usize,
}

impl Orchestrator {
    pub fn new(chain: ProviderChain, history: Arc<HistoryStore>) -> Self {
        Self {
            chain,
            validator: ResultValidator::new(),
            history,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Provider names in chain order
    pub fn provider_names(&self) -> Vec<String> {
        self.chain.iter().map(|p| p.name().to_string()).collect()
    }

    /// Translate `text` from `source` to `target`
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        let normalized = TextNormalizer::normalize(text);
        let len = normalized.chars().count();
        if len > self.max_input_chars {
            return Err(TranslationError::InputTooLong {
                len,
                max: self.max_input_chars,
            });
        }

        let (final_text, provider) = self.run_chain(&normalized, source, target).await?;

        let (record, history_error) = match self
            .history
            .upsert(&normalized, &final_text, source, target)
            .await
        {
            Ok(record) => (Some(record), None),
            Err(e) => {
                error!("Translation succeeded but history write failed: {}", e);
                (None, Some(e))
            }
        };

        Ok(Translation {
            text: final_text,
            provider,
            record,
            history_error,
        })
    }

    /// First accepted, post-processed output and the name of the provider that produced it
    async fn run_chain(
        &self,
        normalized: &str,
        source: &str,
        target: &str,
    ) -> Result<(String, String), TranslationError> {
        let mut attempts = 0;

        for provider in &self.chain {
            attempts += 1;
            let started = Instant::now();
            debug!("Trying provider {} ({}->{})", provider.name(), source, target);

            match provider.translate(normalized, source, target).await {
                ProviderOutcome::Success(raw) => match self.validator.check(&raw, normalized) {
                    Ok(()) => {
                        let final_text = TextNormalizer::postprocess(&raw, normalized);
                        if final_text.trim().is_empty() {
                            warn!(
                                "Provider {} output rejected: {} after post-processing",
                                provider.name(),
                                Rejection::Blank
                            );
                            continue;
                        }
                        info!(
                            "Provider {} accepted in {:.2?}",
                            provider.name(),
                            started.elapsed()
                        );
                        return Ok((final_text, provider.name().to_string()));
                    }
                    Err(rejection) => {
                        warn!("Provider {} output rejected: {}", provider.name(), rejection);
                    }
                },
                ProviderOutcome::Failure(e) => {
                    warn!("Provider {} failed: {}", provider.name(), e);
                }
            }
        }

        Err(TranslationError::AllProvidersFailed { attempts })
    }
}

/*!
 * Acceptance checks for provider output.
 *
 * A structurally valid response can still be useless: blank, a copy of
 * the input, or an error message. Any single failing check rejects it and
 * the orchestrator moves on to the next provider.
 */

use log::debug;

use super::markers::find_error_marker;
use crate::errors::Rejection;
use crate::providers::ProviderOutcome;

/// Judges whether a provider's output is usable
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultValidator;

impl ResultValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check translated text against the text that was sent
    pub fn check(&self, translated: &str, original: &str) -> Result<(), Rejection> {
        if translated.trim().is_empty() {
            return Err(Rejection::Blank);
        }

        // Case-insensitive echo detection. This also rejects legitimate
        // same-spelled translations such as proper nouns.
        if translated.trim().to_lowercase() == original.trim().to_lowercase() {
            return Err(Rejection::EchoesInput);
        }

        if let Some(marker) = find_error_marker(translated) {
            return Err(Rejection::ErrorMarker(marker));
        }

        Ok(())
    }

    /// Whether `outcome` is a success whose text passes every check
    pub fn is_acceptable(&self, outcome: &ProviderOutcome, original: &str) -> bool {
        match outcome {
            ProviderOutcome::Success(text) => match self.check(text, original) {
                Ok(()) => true,
                Err(rejection) => {
                    debug!("Rejected provider output: {}", rejection);
                    false
                }
            },
            ProviderOutcome::Failure(_) => false,
        }
    }
}

/*!
 * Scripted provider for tests and offline runs.
 *
 * - `MockProvider::working()` - always answers with a tagged translation
 * - `MockProvider::echo()` - returns the input unchanged
 * - `MockProvider::failing()` - always fails at the transport level
 * - `MockProvider::replying(..)` - always answers with a fixed text
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{ProviderOutcome, TranslationProvider};
use crate::errors::ProviderError;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with `[target] text`
    Working,
    /// Always succeeds with the given reply
    Reply(String),
    /// Returns the input text unchanged
    Echo,
    /// Fails every Nth request, works otherwise
    Intermittent { fail_every: usize },
    /// Always fails with a transport error
    Failing,
    /// Returns an empty string
    Empty,
    /// Sleeps before answering like `Working`
    Slow { delay_ms: u64 },
}

/// Mock provider with a shared call counter
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: String,
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            name: "mock".to_string(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(reply.into()))
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Rename the provider (shows up in logs and `name()`)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of `translate` calls received so far
    pub fn calls(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn tagged(text: &str, target: &str) -> String {
        format!("[{}] {}", target, text)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(&self, text: &str, _source: &str, target: &str) -> ProviderOutcome {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => ProviderOutcome::Success(Self::tagged(text, target)),

            MockBehavior::Reply(reply) => ProviderOutcome::Success(reply.clone()),

            MockBehavior::Echo => ProviderOutcome::Success(text.to_string()),

            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == fail_every - 1 {
                    ProviderOutcome::Failure(ProviderError::HttpStatus { status: 503 })
                } else {
                    ProviderOutcome::Success(Self::tagged(text, target))
                }
            }

            MockBehavior::Failing => ProviderOutcome::Failure(ProviderError::RequestFailed(
                "Simulated provider failure".to_string(),
            )),

            MockBehavior::Empty => ProviderOutcome::Success(String::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                ProviderOutcome::Success(Self::tagged(text, target))
            }
        }
    }
}

/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scripted backend that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a numbered response
 * - `MockProvider::failing()` - Always fails with a backend error
 * - `MockProvider::fail_first(n)` - Fails the first n calls, then succeeds
 * - `MockProvider::wrong_count()` - Responds with one entry too few
 * - `MockProvider::blank_entry()` - Responds with a blank translation
 * - `MockProvider::unnumbered()` - Responds with plain lines (decoder fallback format)
 */

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{BatchItem, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a properly numbered response
    Working,
    /// Always fails with a backend error
    Failing,
    /// Fails the first n calls, succeeds afterwards
    FailFirst {
        /// Number of leading calls that fail
        failures: usize,
    },
    /// Succeeds but returns one entry fewer than requested
    WrongCount,
    /// Succeeds but leaves one entry blank
    BlankEntry,
    /// Succeeds with plain lines and no `#N:` markers
    Unnumbered,
}

/// Mock provider for testing orchestration behavior
///
/// Records every dispatched batch (its item texts, in order) and the total
/// call count, so tests can assert on batching and retry behavior.
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate_batch invocations so far
    call_count: AtomicUsize,
    /// Item texts of every dispatched batch, in dispatch order
    dispatched: Mutex<Vec<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
            dispatched: Mutex::new(Vec::new()),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails the first `failures` calls, then succeeds
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Create a mock that responds with one entry too few
    pub fn wrong_count() -> Self {
        Self::new(MockBehavior::WrongCount)
    }

    /// Create a mock that leaves one entry blank
    pub fn blank_entry() -> Self {
        Self::new(MockBehavior::BlankEntry)
    }

    /// Create a mock that responds with plain, unnumbered lines
    pub fn unnumbered() -> Self {
        Self::new(MockBehavior::Unnumbered)
    }

    /// Number of translate_batch invocations so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Item texts of every dispatched batch, in dispatch order
    pub fn dispatched_batches(&self) -> Vec<Vec<String>> {
        self.dispatched.lock().unwrap().clone()
    }

    /// The translation the working mock produces for a given source text
    pub fn translated(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn translate_batch(
        &self,
        items: &[BatchItem],
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.dispatched.lock().unwrap()
            .push(items.iter().map(|item| item.text.clone()).collect());

        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::RequestFailed("mock backend failure".to_string()))
            },
            MockBehavior::FailFirst { failures } if call < failures => {
                Err(ProviderError::RequestFailed(format!("mock backend failure on call {}", call + 1)))
            },
            MockBehavior::WrongCount => {
                let response = items.iter().take(items.len().saturating_sub(1)).enumerate()
                    .map(|(i, item)| format!("#{}: {}", i + 1, Self::translated(&item.text, target_language)))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(response)
            },
            MockBehavior::BlankEntry => {
                let response = items.iter().enumerate()
                    .map(|(i, item)| {
                        if i == 0 {
                            format!("#{}:", i + 1)
                        } else {
                            format!("#{}: {}", i + 1, Self::translated(&item.text, target_language))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(response)
            },
            MockBehavior::Unnumbered => {
                let response = items.iter()
                    .map(|item| Self::translated(&item.text, target_language))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(response)
            },
            MockBehavior::Working | MockBehavior::FailFirst { .. } => {
                let response = items.iter().enumerate()
                    .map(|(i, item)| format!("#{}: {}", i + 1, Self::translated(&item.text, target_language)))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(response)
            },
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::RequestFailed("mock backend failure".to_string()))
            },
            _ => Ok(()),
        }
    }
}

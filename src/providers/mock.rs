/*!
 * Mock translator implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds, using the mapping table
 *   or a deterministic fallback
 * - `MockTranslator::failing()` - Always fails with an API error
 * - `MockTranslator::delayed()` - Succeeds after a fixed delay, for tests
 *   that need a sync to still be in flight when the next edit lands
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a translation
    Working,
    /// Always fails with an API error
    Failing,
    /// Succeeds after a fixed delay
    Delayed { delay_ms: u64 },
}

/// Mock translator for exercising the sync engine without a network.
///
/// Every request is recorded, so tests can assert exactly which units were
/// sent and how often. Clones share the call counter and the call log.
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Fixed source -> translation mappings consulted before the fallback
    mappings: HashMap<String, String>,
    /// Number of translate calls served, shared across clones
    call_count: Arc<AtomicUsize>,
    /// Source texts of all translate calls in arrival order, shared across clones
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            mappings: HashMap::new(),
            call_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock translator that succeeds after `delay_ms` milliseconds
    pub fn delayed(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Delayed { delay_ms })
    }

    /// Add a fixed translation for a source text
    pub fn with_translation(
        mut self,
        source: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.mappings.insert(source.into(), translated.into());
        self
    }

    /// Number of translate calls served so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Source texts of all translate calls so far, in arrival order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            mappings: self.mappings.clone(),
            call_count: Arc::clone(&self.call_count),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(text.to_string());

        if let MockBehavior::Delayed { delay_ms } = self.behavior {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Working | MockBehavior::Delayed { .. } => {
                let translated = self.mappings.get(text).cloned().unwrap_or_else(|| {
                    format!("[{}] {}", target_language.trim().to_uppercase(), text)
                });
                Ok(translated)
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

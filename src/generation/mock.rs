//! Deterministic generator for tests and offline runs
//!
//! Counts calls so tests can assert that short-circuited stages never
//! reach the generation collaborator.

use crate::errors::{AssistantError, Result};
use crate::generation::Generator;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum MockBehavior {
    /// Echo the prompt back, prefixed
    Echo,
    /// Return the same canned text for every call
    Fixed(String),
    /// Fail every call with the given reason
    Fail(String),
}

/// Scripted generation collaborator
pub struct MockGenerator {
    behavior: MockBehavior,
    calls: AtomicUsize,
    model: String,
}

impl MockGenerator {
    /// Mock that echoes each prompt back
    pub fn echoing() -> Self {
        Self {
            behavior: MockBehavior::Echo,
            calls: AtomicUsize::new(0),
            model: "mock".to_string(),
        }
    }

    /// Mock that returns a fixed completion
    pub fn fixed(text: &str) -> Self {
        Self {
            behavior: MockBehavior::Fixed(text.to_string()),
            calls: AtomicUsize::new(0),
            model: "mock".to_string(),
        }
    }

    /// Mock that fails every call
    pub fn failing(reason: &str) -> Self {
        Self {
            behavior: MockBehavior::Fail(reason.to_string()),
            calls: AtomicUsize::new(0),
            model: "mock".to_string(),
        }
    }

    /// Number of generate calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Echo => Ok(format!("(mock) {}", prompt)),
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Fail(reason) => Err(AssistantError::GenerationFailed {
                reason: reason.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

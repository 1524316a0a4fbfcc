//! Text-generation collaborator boundary
//!
//! The pipeline depends on one capability: `generate(prompt) -> text`.
//! Everything behind it (HTTP, auth, quotas) belongs to the
//! collaborator. Failures surface as `GenerationFailed` and are caught
//! at the stage boundary, never propagated past it.

pub mod mock;
pub mod ollama;

pub use mock::MockGenerator;
pub use ollama::OllamaGenerator;

use crate::errors::Result;
use async_trait::async_trait;

/// Generation collaborator capability
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Identifier of the backing model, for history/summary records
    fn model_name(&self) -> &str;
}

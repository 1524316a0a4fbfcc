//! Error types for the docbuddy assistant
//!
//! Provides the crate-wide error enum with context propagation.
//! Stage-level failures (generation errors, empty retrievals) are NOT
//! represented here: those travel through the pipeline as sentinel
//! values and never raise past a stage boundary. This enum covers the
//! programming-contract violations and collaborator I/O failures that
//! are allowed to surface to the caller.

use thiserror::Error;

/// Main error type for the assistant system
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Pipeline stage regression or invalid advance
    #[error("Invalid stage transition from {from:?} to {to:?}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    /// Retrieval collaborator could not be queried
    #[error("Retrieval failed: {reason}")]
    RetrievalFailed { reason: String },

    /// No compatible search capability on a retrieval collaborator
    #[error("Retriever has no compatible search capability: {0}")]
    UnsupportedRetriever(String),

    /// Generation collaborator call failed
    #[error("Generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// Workflow graph wiring errors (bad edge, unreachable terminal)
    #[error("Workflow graph error: {0}")]
    GraphError(String),

    /// Unknown document name in the store
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// Ollama API errors
    #[error("Ollama API error: {0}")]
    OllamaApiError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Timeout errors
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic errors with context
    #[error("Assistant error: {0}")]
    Generic(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Convert anyhow errors to AssistantError
impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Generic(err.to_string())
    }
}

//! Document retrieval: chunk model, search capabilities, and the adapter
//! that normalizes them
//!
//! The pipeline never talks to a concrete search backend. It sees one
//! contract, `RetrieverAdapter::fetch(query) -> Vec<RetrievedChunk>`,
//! and the adapter translates whichever capability the underlying
//! collaborator offers into that contract, once, at construction time.

pub mod adapter;
pub mod keyword;

pub use adapter::{CapabilitySet, RetrieverAdapter};
pub use keyword::KeywordIndex;

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Metadata key that carries source attribution
pub const SOURCE_FILE_KEY: &str = "source_file";

/// Metadata key that carries the source file format
pub const FILE_FORMAT_KEY: &str = "file_format";

/// Attribution fallback when metadata is missing
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Search parameters for retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of results to retrieve
    pub top_k: usize,
    /// Minimum relevance threshold (0.0 to 1.0)
    pub threshold: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: 4,
            threshold: 0.1,
        }
    }
}

/// One retrieved chunk with source attribution
///
/// Produced by the retrieval collaborator; the pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub content: String,
    pub source_name: String,
    pub source_format: String,
    pub score: f32,
}

impl RetrievedChunk {
    /// Build a chunk from raw collaborator output
    ///
    /// The `source_file` metadata key surfaces verbatim in attribution;
    /// absence defaults to `"Unknown"`.
    pub fn from_metadata(
        content: String,
        metadata: &HashMap<String, String>,
        score: f32,
    ) -> Self {
        Self {
            content,
            source_name: metadata
                .get(SOURCE_FILE_KEY)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            source_format: metadata
                .get(FILE_FORMAT_KEY)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            score,
        }
    }
}

/// Semantic-search capability: ranked chunks for a query
///
/// Highest-priority capability; the in-crate keyword index and any
/// vector-store backend implement this.
#[async_trait]
pub trait FetchRelevant: Send + Sync {
    async fn fetch_relevant(&self, query: &str, params: &SearchParams)
        -> Result<Vec<RetrievedChunk>>;
}

/// Generic tool-invocation capability
///
/// Second-priority fallback for collaborators that only expose a
/// generic `invoke` entry point.
#[async_trait]
pub trait Invoke: Send + Sync {
    async fn invoke(&self, input: &str) -> Result<Vec<RetrievedChunk>>;
}

/// Plain-callable capability, lowest priority
pub type SearchFn = dyn Fn(&str) -> Result<Vec<RetrievedChunk>> + Send + Sync;

/// Shared handle to a search callable
pub type SharedSearchFn = Arc<SearchFn>;

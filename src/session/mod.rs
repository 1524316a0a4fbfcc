//! In-process session state
//!
//! Chat history and generated summaries for the life of one
//! interactive session. Nothing here touches disk: persistence is an
//! explicit non-goal, and the surrounding application owns any export
//! it wants to do with what it reads back from this store.

use crate::pipeline::DocumentResultSet;
use crate::summary::DocumentSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A recorded answer: single-document or per-document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatResponse {
    Single(String),
    Multi(DocumentResultSet),
}

/// One question/answer exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub query: String,
    pub response: ChatResponse,
    /// Display label: a document name or "Multiple Documents: ..."
    pub document: String,
    pub timestamp: DateTime<Utc>,
    /// False when the direct-answer fallback produced the response
    pub agent_generated: bool,
}

/// Session-scoped history and summary store
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<ChatEntry>,
    summaries: HashMap<String, DocumentSummary>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single-document exchange
    pub fn record_single(
        &mut self,
        query: &str,
        answer: String,
        document: &str,
        agent_generated: bool,
    ) {
        self.entries.push(ChatEntry {
            query: query.to_string(),
            response: ChatResponse::Single(answer),
            document: document.to_string(),
            timestamp: Utc::now(),
            agent_generated,
        });
    }

    /// Record a multi-document exchange
    pub fn record_multi(&mut self, query: &str, results: DocumentResultSet) {
        let label = format!(
            "Multiple Documents: {}",
            results.documents().join(", ")
        );
        self.entries.push(ChatEntry {
            query: query.to_string(),
            response: ChatResponse::Multi(results),
            document: label,
            timestamp: Utc::now(),
            agent_generated: true,
        });
    }

    /// Most recent entries, newest last
    pub fn recent(&self, count: usize) -> &[ChatEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// Number of recorded exchanges
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no exchanges have been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store or replace a document summary
    pub fn set_summary(&mut self, summary: DocumentSummary) {
        self.summaries.insert(summary.document.clone(), summary);
    }

    /// Retrieve a stored summary
    pub fn summary(&self, document: &str) -> Option<&DocumentSummary> {
        self.summaries.get(document)
    }

    /// Documents that have summaries
    pub fn summarized_documents(&self) -> Vec<&str> {
        self.summaries.keys().map(|s| s.as_str()).collect()
    }
}

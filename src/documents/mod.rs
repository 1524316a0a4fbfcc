//! Document store and text chunking
//!
//! An explicit, caller-owned store mapping document names to their
//! chunks and bound retrieval adapters. The store replaces any notion
//! of session-global registries: the application creates it, fills it,
//! and passes it by handle into the pipeline layers. Adapters hold no
//! per-call state, so the store is shared read-only across concurrent
//! pipeline instances.

use crate::errors::{AssistantError, Result};
use crate::retrieval::{CapabilitySet, KeywordIndex, RetrieverAdapter, SearchParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Chunking parameters for document ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap carried between consecutive chunks, in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
        }
    }
}

/// One chunk of a stored document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    pub id: String,
    pub content: String,
}

/// Summary line for a stored document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    pub format: String,
    pub chunk_count: usize,
}

struct StoredDocument {
    name: String,
    format: String,
    chunks: Vec<TextChunk>,
    adapter: Arc<RetrieverAdapter>,
}

/// Store of processed documents with per-document retrieval adapters
pub struct DocumentStore {
    documents: Vec<StoredDocument>,
    chunking: ChunkingConfig,
    search: SearchParams,
}

impl DocumentStore {
    /// Create an empty store with the given ingestion parameters
    pub fn new(chunking: ChunkingConfig, search: SearchParams) -> Self {
        Self {
            documents: Vec::new(),
            chunking,
            search,
        }
    }

    /// Add a document from raw text, chunking and indexing it
    ///
    /// Re-adding an existing name replaces the previous entry.
    pub fn add_document(&mut self, name: &str, format: &str, content: &str) -> Result<()> {
        let pieces = chunk_text(content, &self.chunking);
        let index = KeywordIndex::new(name, format, pieces.clone());
        let adapter = RetrieverAdapter::bind(
            CapabilitySet::semantic(Arc::new(index)),
            self.search.clone(),
        )?;

        let chunks = pieces
            .into_iter()
            .map(|content| TextChunk {
                id: format!("chunk_{}", Uuid::new_v4().simple()),
                content,
            })
            .collect();

        let document = StoredDocument {
            name: name.to_string(),
            format: format.to_string(),
            chunks,
            adapter: Arc::new(adapter),
        };

        if let Some(existing) = self.documents.iter_mut().find(|d| d.name == name) {
            *existing = document;
        } else {
            self.documents.push(document);
        }
        Ok(())
    }

    /// Register a document backed by an externally-bound adapter
    ///
    /// For collaborator-provided retrieval backends (vector stores,
    /// remote indexes) whose chunks are not held in this store. Such
    /// documents are excluded from the combined adapter.
    pub fn add_document_with_adapter(
        &mut self,
        name: &str,
        format: &str,
        adapter: Arc<RetrieverAdapter>,
    ) {
        let document = StoredDocument {
            name: name.to_string(),
            format: format.to_string(),
            chunks: Vec::new(),
            adapter,
        };
        if let Some(existing) = self.documents.iter_mut().find(|d| d.name == name) {
            *existing = document;
        } else {
            self.documents.push(document);
        }
    }

    /// Load every `.txt` and `.md` file from a directory
    ///
    /// Returns the names added, in directory-sorted order.
    pub fn load_directory<P: AsRef<Path>>(&mut self, dir: P) -> Result<Vec<String>> {
        let mut entries: Vec<_> = std::fs::read_dir(dir.as_ref())
            .map_err(AssistantError::IoError)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        entries.sort();

        let mut added = Vec::new();
        for path in entries {
            let format = match path.extension().and_then(|e| e.to_str()) {
                Some("txt") => "txt",
                Some("md") => "md",
                _ => continue,
            };
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            let content = std::fs::read_to_string(&path).map_err(AssistantError::IoError)?;
            self.add_document(&name, format, &content)?;
            added.push(name);
        }
        Ok(added)
    }

    /// Retrieval adapter bound to a single document
    pub fn adapter(&self, name: &str) -> Result<Arc<RetrieverAdapter>> {
        self.documents
            .iter()
            .find(|d| d.name == name)
            .map(|d| Arc::clone(&d.adapter))
            .ok_or_else(|| AssistantError::UnknownDocument(name.to_string()))
    }

    /// Adapter spanning every stored document
    pub fn combined_adapter(&self) -> Result<Arc<RetrieverAdapter>> {
        let sources = self
            .documents
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    d.format.clone(),
                    d.chunks.iter().map(|c| c.content.clone()).collect(),
                )
            })
            .collect();
        let index = KeywordIndex::from_sources(sources);
        let adapter = RetrieverAdapter::bind(
            CapabilitySet::semantic(Arc::new(index)),
            self.search.clone(),
        )?;
        Ok(Arc::new(adapter))
    }

    /// Names and chunk counts of stored documents, in insertion order
    pub fn documents(&self) -> Vec<DocumentInfo> {
        self.documents
            .iter()
            .map(|d| DocumentInfo {
                name: d.name.clone(),
                format: d.format.clone(),
                chunk_count: d.chunks.len(),
            })
            .collect()
    }

    /// Names of stored documents, in insertion order
    pub fn document_names(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.name.clone()).collect()
    }

    /// Whether a document is stored under this name
    pub fn contains(&self, name: &str) -> bool {
        self.documents.iter().any(|d| d.name == name)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Split text into overlapping chunks on whitespace boundaries
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.len() <= config.chunk_size {
        return vec![trimmed.to_string()];
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in &words {
        if !current.is_empty() && current.len() + word.len() + 1 > config.chunk_size {
            // Carry the tail of this chunk into the next one
            let overlap_start = current.len().saturating_sub(config.chunk_overlap);
            let tail = current[find_char_boundary(&current, overlap_start)..].to_string();
            chunks.push(std::mem::take(&mut current));
            current = tail;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn find_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(s.len())
}

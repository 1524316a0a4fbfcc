//! In-memory keyword index
//!
//! The retrieval collaborator a local deployment runs with: term-overlap
//! scoring over document chunks, no external services. Vector-store
//! backends plug in through the same `FetchRelevant` trait.

use crate::errors::Result;
use crate::retrieval::{FetchRelevant, RetrievedChunk, SearchParams};
use async_trait::async_trait;
use std::collections::HashSet;

/// Minimum term length considered significant for scoring
const MIN_TERM_LEN: usize = 3;

struct IndexedChunk {
    content: String,
    source_name: String,
    source_format: String,
    terms: HashSet<String>,
}

/// Scored keyword search over a fixed chunk set
///
/// Immutable after construction, so it is safe to share read-only
/// across concurrent pipeline instances.
pub struct KeywordIndex {
    chunks: Vec<IndexedChunk>,
}

impl KeywordIndex {
    /// Index chunks of a single named source
    pub fn new(source_name: &str, source_format: &str, contents: Vec<String>) -> Self {
        let chunks = contents
            .into_iter()
            .map(|content| IndexedChunk {
                terms: tokenize(&content),
                content,
                source_name: source_name.to_string(),
                source_format: source_format.to_string(),
            })
            .collect();

        Self { chunks }
    }

    /// Index chunks from several sources, keeping per-chunk attribution
    pub fn from_sources(sources: Vec<(String, String, Vec<String>)>) -> Self {
        let mut chunks = Vec::new();
        for (source_name, source_format, contents) in sources {
            for content in contents {
                chunks.push(IndexedChunk {
                    terms: tokenize(&content),
                    content,
                    source_name: source_name.clone(),
                    source_format: source_format.clone(),
                });
            }
        }
        Self { chunks }
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn score(&self, query_terms: &HashSet<String>, chunk: &IndexedChunk) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }
        let overlap = query_terms.intersection(&chunk.terms).count();
        overlap as f32 / query_terms.len() as f32
    }
}

#[async_trait]
impl FetchRelevant for KeywordIndex {
    async fn fetch_relevant(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<RetrievedChunk>> {
        let query_terms = tokenize(query);

        let mut scored: Vec<(usize, f32)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| (idx, self.score(&query_terms, chunk)))
            .filter(|(_, score)| *score >= params.threshold)
            .collect();

        // Stable order: score descending, insertion order as tiebreak
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(params.top_k);

        Ok(scored
            .into_iter()
            .map(|(idx, score)| {
                let chunk = &self.chunks[idx];
                RetrievedChunk {
                    content: chunk.content.clone(),
                    source_name: chunk.source_name.clone(),
                    source_format: chunk.source_format.clone(),
                    score,
                }
            })
            .collect())
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= MIN_TERM_LEN)
        .map(|t| t.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> KeywordIndex {
        KeywordIndex::new(
            "bio.txt",
            "txt",
            vec![
                "Photosynthesis converts light to chemical energy.".to_string(),
                "Mitochondria are the powerhouse of the cell.".to_string(),
                "Rust is a systems programming language.".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_fetch_relevant_ranks_matching_chunk_first() {
        let index = sample_index();
        let results = index
            .fetch_relevant("how does photosynthesis use light", &SearchParams::default())
            .await
            .unwrap();

        assert!(!results.is_empty());
        assert!(results[0].content.contains("Photosynthesis"));
        assert_eq!(results[0].source_name, "bio.txt");
    }

    #[tokio::test]
    async fn test_fetch_relevant_nonsense_query_returns_empty() {
        let index = sample_index();
        let results = index
            .fetch_relevant("xyzzy123nonsense", &SearchParams::default())
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_top_k_caps_result_count() {
        let index = sample_index();
        let params = SearchParams {
            top_k: 1,
            threshold: 0.0,
        };
        let results = index.fetch_relevant("the cell energy", &params).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_from_sources_keeps_attribution() {
        let index = KeywordIndex::from_sources(vec![
            (
                "a.txt".to_string(),
                "txt".to_string(),
                vec!["alpha content".to_string()],
            ),
            (
                "b.md".to_string(),
                "md".to_string(),
                vec!["beta content".to_string()],
            ),
        ]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_tokenize_filters_short_terms() {
        let terms = tokenize("a an the photosynthesis of");
        assert!(terms.contains("photosynthesis"));
        assert!(terms.contains("the"));
        assert!(!terms.contains("a"));
        assert!(!terms.contains("an"));
    }
}

//! Document retrieval tool
//!
//! First stage of the pipeline: queries the bound adapter and renders
//! the ranked chunks into a single context block. An empty result set
//! becomes the empty-result condition, a collaborator failure becomes a
//! failure note; neither ever raises.

use crate::retrieval::{RetrievedChunk, RetrieverAdapter};
use crate::tools::types::{FailureNote, StageName, StageValue};
use std::sync::Arc;

/// Output of the retrieval stage
///
/// The raw chunks ride alongside the rendered block so the citation
/// stage can attribute sources without re-querying.
#[derive(Debug, Clone)]
pub struct RetrievalOutput {
    pub value: StageValue,
    pub chunks: Vec<RetrievedChunk>,
}

/// Retrieval stage tool bound to one adapter
pub struct RetrieverTool {
    adapter: Arc<RetrieverAdapter>,
}

impl RetrieverTool {
    pub fn new(adapter: Arc<RetrieverAdapter>) -> Self {
        Self { adapter }
    }

    /// Fetch and render relevant chunks for the query
    pub async fn run(&self, query: &str) -> RetrievalOutput {
        match self.adapter.fetch(query).await {
            Ok(chunks) if chunks.is_empty() => RetrievalOutput {
                value: StageValue::Empty,
                chunks: Vec::new(),
            },
            Ok(chunks) => RetrievalOutput {
                value: StageValue::Text(render_chunks(&chunks)),
                chunks,
            },
            Err(e) => RetrievalOutput {
                value: StageValue::Failed(FailureNote::new(StageName::Retrieve, e)),
                chunks: Vec::new(),
            },
        }
    }
}

fn render_chunks(chunks: &[RetrievedChunk]) -> String {
    let mut block = String::from("RETRIEVED DOCUMENTS:\n");
    for (i, chunk) in chunks.iter().enumerate() {
        block.push_str(&format!(
            "\nDOCUMENT {} - {} ({})\nContent: {}\n",
            i + 1,
            chunk.source_name,
            chunk.source_format.to_uppercase(),
            chunk.content
        ));
    }
    block
}

//! Standalone document summaries
//!
//! Separate from the question-answering pipeline: samples a document
//! with fixed probe queries, de-duplicates the retrieved chunks, and
//! asks the generation collaborator for a structured overview. The
//! result is stamped with the generating model and timestamp so the
//! session can show when and how a summary was produced.

use crate::errors::{AssistantError, Result};
use crate::generation::Generator;
use crate::retrieval::RetrieverAdapter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Probe queries used to sample representative content
const PROBE_QUERIES: [&str; 3] = [
    "main topics and key points",
    "important conclusions and findings",
    "methodology and approach",
];

/// Chunks taken per probe query
const CHUNKS_PER_PROBE: usize = 2;

/// Cap on distinct chunks fed to the generator
const MAX_UNIQUE_CHUNKS: usize = 8;

/// Cap on combined content length, in characters
const MAX_CONTENT_LEN: usize = 16_000;

/// Prefix length used for chunk de-duplication
const DEDUP_PREFIX_LEN: usize = 100;

/// A generated document summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
    pub model: String,
}

/// Summary generation over a document's retrieval adapter
pub struct SummaryGenerator {
    generator: Arc<dyn Generator>,
}

impl SummaryGenerator {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Generate a summary for one document
    pub async fn summarize(
        &self,
        document: &str,
        adapter: &RetrieverAdapter,
    ) -> Result<DocumentSummary> {
        let mut sampled = Vec::new();
        for probe in PROBE_QUERIES {
            // A failing probe is skipped; the others still contribute
            if let Ok(chunks) = adapter.fetch(probe).await {
                sampled.extend(chunks.into_iter().take(CHUNKS_PER_PROBE));
            }
        }

        let mut unique = Vec::new();
        let mut seen_prefixes: Vec<String> = Vec::new();
        for chunk in sampled {
            let prefix: String = chunk.content.chars().take(DEDUP_PREFIX_LEN).collect();
            if seen_prefixes.contains(&prefix) {
                continue;
            }
            seen_prefixes.push(prefix);
            unique.push(chunk);
            if unique.len() >= MAX_UNIQUE_CHUNKS {
                break;
            }
        }

        if unique.is_empty() {
            return Err(AssistantError::Generic(format!(
                "no content available to summarize for {}",
                document
            )));
        }

        let mut combined = unique
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        if combined.chars().count() > MAX_CONTENT_LEN {
            combined = combined.chars().take(MAX_CONTENT_LEN).collect();
            combined.push_str("\n... [Content truncated]");
        }

        let content = self
            .generator
            .generate(&summary_prompt(document, &combined))
            .await?;

        Ok(DocumentSummary {
            document: document.to_string(),
            content,
            generated_at: Utc::now(),
            model: self.generator.model_name().to_string(),
        })
    }
}

fn summary_prompt(document: &str, content: &str) -> String {
    format!(
        "Please provide a comprehensive summary of this document: {}\n\n\
         Content to summarize:\n{}\n\n\
         Please provide a summary that includes:\n\
         1. **Main Topic/Purpose**: What is this document about?\n\
         2. **Key Points**: Most important points or findings (use bullet points)\n\
         3. **Structure**: How is the content organized?\n\
         4. **Important Details**: Notable data, dates, names, or statistics\n\
         5. **Conclusions**: Main outcomes or recommendations (if any)\n\n\
         Format your response with clear markdown headings and bullet points.\n\
         Keep the summary concise but comprehensive (aim for 200-400 words).",
        document, content
    )
}

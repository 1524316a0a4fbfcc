//! Citation annotation tool
//!
//! Pure local transform: appends a source-attribution section naming
//! the distinct sources of the retrieved chunks, verbatim. Runs after
//! the formatter. Sentinel input returns unchanged.

use crate::retrieval::RetrievedChunk;
use crate::tools::types::StageValue;

/// Header line of the attribution section
pub const SOURCES_HEADER: &str = "SOURCES:";

/// Citation stage tool
#[derive(Debug, Default)]
pub struct CitationTool;

impl CitationTool {
    pub fn new() -> Self {
        Self
    }

    /// Append source attribution to usable text; relay sentinels
    pub fn run(&self, input: &StageValue, chunks: &[RetrievedChunk]) -> StageValue {
        let text = match input.as_text() {
            Some(t) if !t.trim().is_empty() => t,
            _ => return input.clone(),
        };

        let mut section = format!("{}\n\n{}\n", text, SOURCES_HEADER);
        let mut seen = Vec::new();
        for chunk in chunks {
            if seen.contains(&&chunk.source_name) {
                continue;
            }
            section.push_str(&format!(
                "- {} ({})\n",
                chunk.source_name, chunk.source_format
            ));
            seen.push(&chunk.source_name);
        }
        if seen.is_empty() {
            section.push_str("- No source documents available\n");
        }

        StageValue::Text(section)
    }
}

//! Agent tools: the transformation stages of the pipeline
//!
//! Five tools share one contract shape: consume a stage value, produce
//! a stage value, relay sentinels untouched. Summarizer and analyzer
//! call the generation collaborator; retriever calls the retrieval
//! adapter; formatter and citations are pure local transforms.

pub mod analyzer;
pub mod citations;
pub mod formatter;
pub mod registry;
pub mod retriever;
pub mod summarizer;
pub mod types;

pub use analyzer::{AnalyzerTool, ANALYSIS_MARKER};
pub use citations::{CitationTool, SOURCES_HEADER};
pub use formatter::{FormatterTool, FORMATTED_HEADER};
pub use registry::{ToolDescription, ToolRegistry};
pub use retriever::{RetrievalOutput, RetrieverTool};
pub use summarizer::{SummarizerTool, SUMMARY_MARKER};
pub use types::{
    FailureNote, StageName, StageValue, EMPTY_RESULT_MARKER, EMPTY_RESULT_PHRASE, ERROR_TOKEN,
};

use crate::generation::Generator;
use crate::retrieval::RetrieverAdapter;
use std::sync::Arc;

/// The full tool set one pipeline instance runs with
///
/// Bound to one retrieval adapter (one target document, or a combined
/// index) and one generation collaborator.
pub struct AgentToolkit {
    pub retriever: RetrieverTool,
    pub summarizer: SummarizerTool,
    pub analyzer: AnalyzerTool,
    pub formatter: FormatterTool,
    pub citations: CitationTool,
}

impl AgentToolkit {
    /// Assemble a toolkit from its collaborators
    pub fn new(adapter: Arc<RetrieverAdapter>, generator: Arc<dyn Generator>) -> Self {
        Self {
            retriever: RetrieverTool::new(adapter),
            summarizer: SummarizerTool::new(Arc::clone(&generator)),
            analyzer: AnalyzerTool::new(generator),
            formatter: FormatterTool::new(),
            citations: CitationTool::new(),
        }
    }
}

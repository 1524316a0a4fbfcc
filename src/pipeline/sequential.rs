//! Sequential workflow executor
//!
//! The fallback strategy: direct chained stage calls in the fixed
//! pipeline order, no graph runtime involved. Sentinel inputs make the
//! later stages cheap relays, so the walk always reaches the terminal
//! stage and the final output matches the graph executor's exactly.

use crate::errors::Result;
use crate::pipeline::executor::ExecutionStrategy;
use crate::pipeline::state::PipelineState;
use crate::tools::{AgentToolkit, StageValue};
use async_trait::async_trait;

/// Plain chained-call execution strategy
#[derive(Debug, Default)]
pub struct SequentialStrategy;

impl SequentialStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExecutionStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn execute(&self, toolkit: &AgentToolkit, query: &str) -> Result<PipelineState> {
        let state = PipelineState::new(query);

        let output = toolkit.retriever.run(query).await;
        let state = state.with_retrieved(output)?;

        let retrieved = state.retrieved.clone().unwrap_or(StageValue::Empty);
        let summarized = toolkit.summarizer.run(&retrieved).await;
        let state = state.with_summarized(summarized)?;

        let summarized = state.summarized.clone().unwrap_or(StageValue::Empty);
        let analyzed = toolkit.analyzer.run(&summarized).await;
        let state = state.with_analyzed(analyzed)?;

        let input = state.quality_input();
        let formatted = toolkit.formatter.run(&input);
        let cited = toolkit.citations.run(&formatted, &state.chunks);
        state.with_final(&cited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockGenerator;
    use crate::retrieval::{CapabilitySet, RetrievedChunk, RetrieverAdapter, SearchParams};
    use std::sync::Arc;

    fn toolkit_with(
        chunks: Vec<RetrievedChunk>,
        generator: Arc<MockGenerator>,
    ) -> AgentToolkit {
        let caps = CapabilitySet {
            fetch_relevant: None,
            invoke: None,
            callable: Some(Arc::new(move |_q: &str| Ok(chunks.clone()))),
        };
        let adapter = Arc::new(RetrieverAdapter::bind(caps, SearchParams::default()).unwrap());
        AgentToolkit::new(adapter, generator)
    }

    #[tokio::test]
    async fn test_execute_completes_with_content() {
        let chunk = RetrievedChunk {
            content: "Photosynthesis converts light to chemical energy.".to_string(),
            source_name: "bio.txt".to_string(),
            source_format: "txt".to_string(),
            score: 0.9,
        };
        let generator = Arc::new(MockGenerator::echoing());
        let toolkit = toolkit_with(vec![chunk], generator.clone());

        let state = SequentialStrategy::new()
            .execute(&toolkit, "What is the main topic?")
            .await
            .unwrap();

        assert!(state.is_complete());
        let answer = state.into_final().unwrap();
        assert!(answer.contains("bio.txt"));
        // Summarizer and analyzer both hit the generator
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_execute_empty_retrieval_short_circuits_generator() {
        let generator = Arc::new(MockGenerator::fixed("unused"));
        let toolkit = toolkit_with(Vec::new(), generator.clone());

        let state = SequentialStrategy::new()
            .execute(&toolkit, "xyzzy123nonsense")
            .await
            .unwrap();

        assert!(state.is_complete());
        assert_eq!(generator.call_count(), 0);
        assert_eq!(
            state.into_final().unwrap(),
            crate::tools::EMPTY_RESULT_MARKER
        );
    }
}

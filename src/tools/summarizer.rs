//! Content summarization tool
//!
//! Calls the generation collaborator with a fact-preserving prompt and
//! marks its output with a recognizable SUMMARY section. Sentinel
//! inputs pass through unchanged without a collaborator call.

use crate::generation::Generator;
use crate::tools::types::{FailureNote, StageName, StageValue};
use std::sync::Arc;

/// Marker prefixed to every summarizer result
pub const SUMMARY_MARKER: &str = "SUMMARY:";

/// Summarization stage tool
pub struct SummarizerTool {
    generator: Arc<dyn Generator>,
}

impl SummarizerTool {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Summarize usable text; relay sentinels untouched
    pub async fn run(&self, input: &StageValue) -> StageValue {
        let text = match input.as_text() {
            Some(t) => t,
            None => return input.clone(),
        };

        match self.generator.generate(&summary_prompt(text)).await {
            Ok(output) => StageValue::Text(format!("{}\n{}", SUMMARY_MARKER, output)),
            Err(e) => StageValue::Failed(FailureNote::new(StageName::Summarize, e)),
        }
    }
}

fn summary_prompt(text: &str) -> String {
    format!(
        "As an expert content summarizer, provide a comprehensive summary of the \
         following text that preserves all critical information while being concise \
         and well-organized:\n\n\
         TEXT TO SUMMARIZE:\n{}\n\n\
         SUMMARY REQUIREMENTS:\n\
         - Preserve all key facts, data points, and concepts\n\
         - Maintain context and relationships between ideas\n\
         - Highlight the most important information\n\
         - Ensure technical accuracy\n\
         - Organize in a logical, readable structure\n\n\
         COMPREHENSIVE SUMMARY:",
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockGenerator;

    #[tokio::test]
    async fn test_run_marks_output_with_summary_section() {
        let mock = Arc::new(MockGenerator::fixed("condensed content"));
        let tool = SummarizerTool::new(mock.clone());

        let output = tool
            .run(&StageValue::Text("long document text".to_string()))
            .await;

        let text = output.as_text().unwrap();
        assert!(text.starts_with(SUMMARY_MARKER));
        assert!(text.contains("condensed content"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_prompt_carries_input_text() {
        let mock = Arc::new(MockGenerator::echoing());
        let tool = SummarizerTool::new(mock);

        let output = tool
            .run(&StageValue::Text("Photosynthesis converts light.".to_string()))
            .await;

        assert!(output.as_text().unwrap().contains("Photosynthesis"));
    }

    #[tokio::test]
    async fn test_run_relays_empty_without_generator_call() {
        let mock = Arc::new(MockGenerator::fixed("should not be called"));
        let tool = SummarizerTool::new(mock.clone());

        let output = tool.run(&StageValue::Empty).await;

        assert_eq!(output, StageValue::Empty);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_relays_failure_without_generator_call() {
        let mock = Arc::new(MockGenerator::fixed("should not be called"));
        let tool = SummarizerTool::new(mock.clone());

        let failed = StageValue::Failed(FailureNote::new(StageName::Retrieve, "boom"));
        let output = tool.run(&failed).await;

        assert_eq!(output, failed);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_converts_generation_error_to_failure_note() {
        let mock = Arc::new(MockGenerator::failing("quota exhausted"));
        let tool = SummarizerTool::new(mock);

        let output = tool.run(&StageValue::Text("content".to_string())).await;

        match output {
            StageValue::Failed(note) => {
                assert_eq!(note.stage, StageName::Summarize);
                assert!(note.message.contains("quota exhausted"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

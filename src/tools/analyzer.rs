//! Content analysis tool
//!
//! Runs the seven-point analysis prompt (themes, metrics, methodology,
//! relationships, findings, gaps, implications) against the generation
//! collaborator. Same pass-through rule as the summarizer.

use crate::generation::Generator;
use crate::tools::types::{FailureNote, StageName, StageValue};
use std::sync::Arc;

/// Marker prefixed to every analyzer result
pub const ANALYSIS_MARKER: &str = "ANALYSIS RESULTS:";

/// Analysis stage tool
pub struct AnalyzerTool {
    generator: Arc<dyn Generator>,
}

impl AnalyzerTool {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Analyze usable text; relay sentinels untouched
    pub async fn run(&self, input: &StageValue) -> StageValue {
        let text = match input.as_text() {
            Some(t) => t,
            None => return input.clone(),
        };

        match self.generator.generate(&analysis_prompt(text)).await {
            Ok(output) => StageValue::Text(format!("{}\n{}", ANALYSIS_MARKER, output)),
            Err(e) => StageValue::Failed(FailureNote::new(StageName::Analyze, e)),
        }
    }
}

fn analysis_prompt(text: &str) -> String {
    format!(
        "As a senior document analyst, perform a comprehensive analysis of the \
         following content:\n\n\
         CONTENT FOR ANALYSIS:\n{}\n\n\
         ANALYSIS REQUIREMENTS:\n\
         1. Identify and categorize main themes and key concepts\n\
         2. Extract and highlight important data points, statistics, and metrics\n\
         3. Analyze methodologies, approaches, or frameworks used\n\
         4. Identify relationships, patterns, and connections between elements\n\
         5. Note significant findings, conclusions, or recommendations\n\
         6. Point out any gaps, contradictions, or areas needing clarification\n\
         7. Provide insights on practical applications or implications\n\n\
         DETAILED ANALYSIS REPORT:",
        text
    )
}

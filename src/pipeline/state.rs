//! Pipeline state machine
//!
//! A strictly linear progression: Started -> Retrieved -> Summarized ->
//! Analyzed -> Done. No retries, no branch edges, no regression. The
//! machine never aborts mid-pipeline: every stage produces some state,
//! even a failure-carrying one, and hands it forward. The stage field
//! exists for observability; callers branch on the stage values, not on
//! it.

use crate::errors::{AssistantError, Result};
use crate::retrieval::RetrievedChunk;
use crate::tools::types::{FailureNote, StageValue};
use crate::tools::RetrievalOutput;
use serde::{Deserialize, Serialize};

/// Pipeline execution stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Initial state, query set, nothing executed
    Started,

    /// Retrieval stage has produced output
    Retrieved,

    /// Summarization stage has produced output
    Summarized,

    /// Analysis stage has produced output
    Analyzed,

    /// Terminal state, final output rendered
    Done,
}

impl PipelineStage {
    fn order(&self) -> u8 {
        match self {
            PipelineStage::Started => 0,
            PipelineStage::Retrieved => 1,
            PipelineStage::Summarized => 2,
            PipelineStage::Analyzed => 3,
            PipelineStage::Done => 4,
        }
    }

    /// Check if this is the terminal stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done)
    }

    /// The unique successor stage, if any
    pub fn next(&self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Started => Some(PipelineStage::Retrieved),
            PipelineStage::Retrieved => Some(PipelineStage::Summarized),
            PipelineStage::Summarized => Some(PipelineStage::Analyzed),
            PipelineStage::Analyzed => Some(PipelineStage::Done),
            PipelineStage::Done => None,
        }
    }

    /// Human-readable stage name
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::Started => "Started",
            PipelineStage::Retrieved => "Retrieved",
            PipelineStage::Summarized => "Summarized",
            PipelineStage::Analyzed => "Analyzed",
            PipelineStage::Done => "Done",
        }
    }
}

/// The unit of data threaded through the pipeline
///
/// Copy-on-write: each stage consumes a state and produces a new one.
/// Once `final_output` is set the state is complete and no stage
/// touches it again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    query: String,
    /// Raw retrieval output, kept for citation attribution
    pub chunks: Vec<RetrievedChunk>,
    pub retrieved: Option<StageValue>,
    pub summarized: Option<StageValue>,
    pub analyzed: Option<StageValue>,
    pub final_output: Option<String>,
    stage: PipelineStage,
    /// First failure recorded by any stage; downstream stages relay it
    pub failure: Option<FailureNote>,
}

impl PipelineState {
    /// Entry state: query only, stage Started
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            chunks: Vec::new(),
            retrieved: None,
            summarized: None,
            analyzed: None,
            final_output: None,
            stage: PipelineStage::Started,
            failure: None,
        }
    }

    /// The immutable user question
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current stage
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Whether the pipeline has completed
    pub fn is_complete(&self) -> bool {
        self.stage.is_terminal() && self.final_output.is_some()
    }

    fn advance_to(mut self, next: PipelineStage) -> Result<Self> {
        if self.stage.next() != Some(next) {
            return Err(AssistantError::InvalidTransition {
                from: self.stage.display_name().to_string(),
                to: next.display_name().to_string(),
                reason: "Stages advance strictly forward, one at a time".to_string(),
            });
        }
        self.stage = next;
        Ok(self)
    }

    fn note_failure(&mut self, value: &StageValue) {
        if let StageValue::Failed(note) = value {
            if self.failure.is_none() {
                self.failure = Some(note.clone());
            }
        }
    }

    /// Record retrieval output and advance
    pub fn with_retrieved(mut self, output: RetrievalOutput) -> Result<Self> {
        self.note_failure(&output.value);
        self.retrieved = Some(output.value);
        self.chunks = output.chunks;
        self.advance_to(PipelineStage::Retrieved)
    }

    /// Record summarization output and advance
    pub fn with_summarized(mut self, value: StageValue) -> Result<Self> {
        self.note_failure(&value);
        self.summarized = Some(value);
        self.advance_to(PipelineStage::Summarized)
    }

    /// Record analysis output and advance
    pub fn with_analyzed(mut self, value: StageValue) -> Result<Self> {
        self.note_failure(&value);
        self.analyzed = Some(value);
        self.advance_to(PipelineStage::Analyzed)
    }

    /// Render the final output and reach the terminal stage
    pub fn with_final(mut self, value: &StageValue) -> Result<Self> {
        self.note_failure(value);
        self.final_output = Some(value.render());
        self.advance_to(PipelineStage::Done)
    }

    /// Input for the quality stage: first-non-empty precedence over
    /// analyzed, summarized, retrieved
    ///
    /// A stage whose output is missing is silently skipped rather than
    /// treated as a hard failure. If no stage produced usable text, the
    /// recorded failure wins over the empty-result condition.
    pub fn quality_input(&self) -> StageValue {
        for candidate in [&self.analyzed, &self.summarized, &self.retrieved] {
            if let Some(StageValue::Text(t)) = candidate {
                if !t.trim().is_empty() {
                    return StageValue::Text(t.clone());
                }
            }
        }
        match &self.failure {
            Some(note) => StageValue::Failed(note.clone()),
            None => StageValue::Empty,
        }
    }

    /// Consume the completed state, yielding the final output
    pub fn into_final(self) -> Result<String> {
        self.final_output.ok_or_else(|| {
            AssistantError::Generic("pipeline finished without final output".to_string())
        })
    }
}

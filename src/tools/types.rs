//! Stage value model shared by all agent tools
//!
//! Internally the pipeline is typed: a stage output is usable text, the
//! empty-result condition, or a failure note. The display strings the
//! surrounding application shows ("No relevant documents found...",
//! "Error ...") exist only at the rendering boundary, and `classify`
//! performs the inverse string-level mapping for heterogeneous tool
//! output. Round-trip stability holds: classifying a rendered sentinel
//! yields the same sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical empty-result marker text
pub const EMPTY_RESULT_MARKER: &str = "No relevant documents found for the query.";

/// Phrase that identifies an empty-result sentinel in raw text
pub const EMPTY_RESULT_PHRASE: &str = "No relevant documents";

/// Token that identifies an error sentinel in raw text
pub const ERROR_TOKEN: &str = "Error";

/// Which stage produced a value or failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageName {
    Retrieve,
    Summarize,
    Analyze,
    Quality,
}

impl StageName {
    /// Human-readable stage label
    pub fn label(&self) -> &'static str {
        match self {
            StageName::Retrieve => "retrieval",
            StageName::Summarize => "summarization",
            StageName::Analyze => "analysis",
            StageName::Quality => "quality assurance",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure note carried through the pipeline
///
/// `message` is the complete display string, beginning with the error
/// token, so rendering relays it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureNote {
    pub stage: StageName,
    pub message: String,
}

impl FailureNote {
    /// Build a note with the canonical message format
    pub fn new(stage: StageName, reason: impl fmt::Display) -> Self {
        Self {
            stage,
            message: format!("{} in {}: {}", ERROR_TOKEN, stage.label(), reason),
        }
    }

    /// Wrap an existing error-marker string verbatim
    pub fn from_message(stage: StageName, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Output of one pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StageValue {
    /// Usable content
    Text(String),
    /// Valid "no relevant content" terminal condition; not an error
    Empty,
    /// Unrecoverable stage failure, relayed unchanged downstream
    Failed(FailureNote),
}

impl StageValue {
    /// Usable text, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StageValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Whether this value short-circuits downstream stages
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, StageValue::Text(_))
    }

    /// Whether this is the empty-result condition
    pub fn is_empty_result(&self) -> bool {
        matches!(self, StageValue::Empty)
    }

    /// Whether this is a failure
    pub fn is_failed(&self) -> bool {
        matches!(self, StageValue::Failed(_))
    }

    /// Render to the display string the application surfaces
    pub fn render(&self) -> String {
        match self {
            StageValue::Text(t) => t.clone(),
            StageValue::Empty => EMPTY_RESULT_MARKER.to_string(),
            StageValue::Failed(note) => note.message.clone(),
        }
    }

    /// Classify raw tool output by its sentinel markers
    ///
    /// Attributes a detected failure to `stage`. This is the only place
    /// string-sentinel matching happens; pipeline internals stay typed.
    pub fn classify(text: &str, stage: StageName) -> StageValue {
        if text.trim().is_empty() {
            StageValue::Empty
        } else if text.contains(ERROR_TOKEN) {
            // Error wins over the empty phrase: a failure reason may
            // quote the empty-result wording
            StageValue::Failed(FailureNote::from_message(stage, text))
        } else if text.contains(EMPTY_RESULT_PHRASE) {
            StageValue::Empty
        } else {
            StageValue::Text(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_is_canonical_marker() {
        assert_eq!(StageValue::Empty.render(), EMPTY_RESULT_MARKER);
    }

    #[test]
    fn test_failure_note_message_starts_with_error_token() {
        let note = FailureNote::new(StageName::Summarize, "quota exhausted");
        assert!(note.message.starts_with(ERROR_TOKEN));
        assert!(note.message.contains("summarization"));
        assert!(note.message.contains("quota exhausted"));
    }

    #[test]
    fn test_classify_detects_empty_phrase() {
        let value = StageValue::classify(
            "No relevant documents found for the query.",
            StageName::Retrieve,
        );
        assert!(value.is_empty_result());
    }

    #[test]
    fn test_classify_detects_error_token() {
        let value = StageValue::classify("Error retrieving documents: boom", StageName::Retrieve);
        assert!(value.is_failed());
    }

    #[test]
    fn test_classify_plain_text() {
        let value = StageValue::classify("Photosynthesis converts light.", StageName::Retrieve);
        assert_eq!(value.as_text(), Some("Photosynthesis converts light."));
    }

    #[test]
    fn test_classify_render_round_trip_for_sentinels() {
        let empty = StageValue::Empty;
        assert_eq!(
            StageValue::classify(&empty.render(), StageName::Analyze),
            empty
        );

        let failed = StageValue::Failed(FailureNote::new(StageName::Analyze, "backend down"));
        let reclassified = StageValue::classify(&failed.render(), StageName::Analyze);
        assert_eq!(reclassified.render(), failed.render());
    }
}

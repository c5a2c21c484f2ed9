// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams of the system. The application layer only sees
// these traits, so a PDF reader, a different output format or
// a stricter name heuristic can be dropped in without touching
// the Aggregator or the Balancer.

use anyhow::Result;

use crate::domain::document::{TextUnit, UnitExtraction};

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Anything that can split a source document into text units.
///
/// Implementations:
///   - DocumentLoader → .docx paragraphs, or form-feed separated text pages
pub trait DocumentSource {
    /// Load every unit of the document in order.
    ///
    /// The outer error is fatal (the document could not be opened).
    /// A unit that could not be extracted is an inner `Err` and the
    /// caller skips it.
    fn load_units(&self) -> Result<Vec<UnitExtraction>>;
}

// ─── DocumentSink ─────────────────────────────────────────────────────────────
/// Anything that can serialise rewritten units into an output document.
///
/// Implementations:
///   - DocumentWriter → .docx or plain text
pub trait DocumentSink {
    fn write_units(&self, units: &[TextUnit]) -> Result<()>;
}

// ─── NameCandidatePolicy ──────────────────────────────────────────────────────
/// Decides whether a token is shaped like a proper name.
///
/// This runs BEFORE the lexicon lookup; a token is a mention only
/// when the policy accepts it AND its case-folded form is a key.
///
/// Implementations:
///   - TitleCasePolicy   → classic title case ("Alice", also "A")
///   - CapitalizedPolicy → first letter uppercase ("McDonald")
///   - StoplistPolicy    → wraps another policy, rejects listed words
pub trait NameCandidatePolicy {
    fn is_candidate(&self, token: &str) -> bool;
}

impl<P: NameCandidatePolicy + ?Sized> NameCandidatePolicy for Box<P> {
    fn is_candidate(&self, token: &str) -> bool {
        (**self).is_candidate(token)
    }
}

// ============================================================
// Layer 4 — Gender Tally
// ============================================================
// Aggregates mentions into (male, female) counts. Every mention
// counts, so a name written three times adds three.

use crate::domain::mention::NameMention;
use crate::domain::report::GenderCount;

/// Count already-resolved mentions
pub fn tally(mentions: &[NameMention]) -> GenderCount {
    let mut counts = GenderCount::default();
    for m in mentions {
        counts.record(m.gender);
    }
    counts
}

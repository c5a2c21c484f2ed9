// ============================================================
// Layer 3 — Name Mention
// ============================================================
// A token that passed the name-candidate policy and whose
// case-folded form is a lexicon key.
//
// Mentions carry their byte span in the unit's text, so a
// sampled mention can be rewritten exactly where it occurs
// instead of at the first matching substring.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::domain::gender::Gender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMention {
    /// The token exactly as written in the text
    pub surface: String,

    /// Gender resolved through the lexicon
    pub gender: Gender,

    /// Byte offsets of the token in the text unit
    pub span: Range<usize>,
}

impl NameMention {
    pub fn new(surface: impl Into<String>, gender: Gender, span: Range<usize>) -> Self {
        Self { surface: surface.into(), gender, span }
    }
}

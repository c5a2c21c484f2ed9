// ============================================================
// Layer 3 — Gender Labels
// ============================================================
// The lexicon maps every name to one of exactly two labels.
// Reference datasets spell these in different ways ("m",
// "Male", "F", ...), so parsing is lenient while the type
// itself stays closed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two labels a lexicon entry can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a raw label from the reference data.
    ///
    /// The label is trimmed and case-folded first. Returns `None`
    /// for any label outside the two accepted spellings, which
    /// excludes the entry from matching.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "m" | "male"   => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            _ => None,
        }
    }

    /// The minority target when `self` is the majority
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male   => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male   => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

// ============================================================
// Layer 3 — Lexicon
// ============================================================
// The name → gender reference mapping.
//
// Invariants:
//   - keys are case-folded (lowercase) and unique
//   - on a key collision the LAST entry wins, even when the
//     last entry carries a label we do not recognise
//   - only entries that resolve to Male/Female are kept for
//     matching; the rest are counted in `excluded`
//
// A BTreeMap keeps iteration order stable, so the replacement
// pool drawn from it is identical between runs and a seeded
// RNG reproduces the same rewrite.
//
// Built once per run, never mutated afterwards.

use std::collections::BTreeMap;

use crate::domain::gender::Gender;

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries:  BTreeMap<String, Gender>,
    excluded: usize,
}

impl Lexicon {
    /// Build a lexicon from raw (name, label) pairs in source order.
    ///
    /// Example:
    ///   let lex = Lexicon::from_entries([("Alice", "f"), ("Bob", "m")]);
    pub fn from_entries<I, N, L>(rows: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: AsRef<str>,
        L: AsRef<str>,
    {
        // First pass: last write wins on the folded key, whatever the label
        let mut raw: BTreeMap<String, Option<Gender>> = BTreeMap::new();
        for (name, label) in rows {
            let key = fold(name.as_ref());
            if key.is_empty() {
                continue;
            }
            raw.insert(key, Gender::from_label(label.as_ref()));
        }

        // Second pass: drop keys whose final label is not one of the two
        let mut entries  = BTreeMap::new();
        let mut excluded = 0usize;
        for (key, gender) in raw {
            match gender {
                Some(g) => { entries.insert(key, g); }
                None    => excluded += 1,
            }
        }

        Self { entries, excluded }
    }

    /// Resolve a token of any casing to its gender
    pub fn gender_of(&self, name: &str) -> Option<Gender> {
        self.entries.get(&fold(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.gender_of(name).is_some()
    }

    /// All case-folded names carrying `gender`, in key order
    pub fn names_for(&self, gender: Gender) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, g)| **g == gender)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate over (case-folded name, gender) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Gender)> {
        self.entries.iter().map(|(n, g)| (n.as_str(), *g))
    }

    /// Number of matchable entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct names dropped because their label was unrecognised
    pub fn excluded(&self) -> usize {
        self.excluded
    }
}

/// Case-fold a name the same way for keys and lookups
pub fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Render a case-folded lexicon key the way a name is written in prose.
///
/// Each segment after a hyphen or apostrophe is capitalised:
///   "alice"     → "Alice"
///   "mary-jane" → "Mary-Jane"
pub fn display_form(key: &str) -> String {
    let mut out              = String::with_capacity(key.len());
    let mut at_segment_start = true;

    for c in key.chars() {
        if at_segment_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_segment_start = false;
        } else {
            out.push(c);
            if c == '-' || c == '\'' {
                at_segment_start = true;
            }
        }
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lex = Lexicon::from_entries([("Alice", "F"), ("BOB", "m")]);
        assert_eq!(lex.gender_of("alice"), Some(Gender::Female));
        assert_eq!(lex.gender_of("Bob"), Some(Gender::Male));
        assert_eq!(lex.gender_of("carol"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let lex = Lexicon::from_entries([("alex", "m"), ("Alex", "f")]);
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.gender_of("alex"), Some(Gender::Female));
    }

    #[test]
    fn test_unknown_label_overrides_and_excludes() {
        // The later row wins even though its label is not matchable
        let lex = Lexicon::from_entries([("sam", "m"), ("sam", "unisex"), ("ann", "f")]);
        assert!(!lex.contains("sam"));
        assert_eq!(lex.excluded(), 1);
        assert_eq!(lex.len(), 1);
    }

    #[test]
    fn test_names_for_filters_by_gender() {
        let lex = Lexicon::from_entries([("carol", "f"), ("bob", "m"), ("alice", "f")]);
        assert_eq!(lex.names_for(Gender::Female), vec!["alice", "carol"]);
        assert_eq!(lex.names_for(Gender::Male), vec!["bob"]);
    }

    #[test]
    fn test_display_form_capitalises_segments() {
        assert_eq!(display_form("alice"), "Alice");
        assert_eq!(display_form("mary-jane"), "Mary-Jane");
        assert_eq!(display_form("o'neil"), "O'Neil");
    }
}

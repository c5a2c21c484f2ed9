// ============================================================
// Layer 4 — Name-Candidate Policies
// ============================================================
// Implementations of the NameCandidatePolicy trait (Layer 3).
//
// The default, TitleCasePolicy, is the classic "is title" test:
//   - every cased char right after an uncased char is uppercase
//   - every cased char right after a cased char is lowercase
//   - there is at least one cased char
// So "Alice" and "Mary-Jane" pass, "McDonald" and "ALICE" fail,
// and a lone uppercase letter like "A" passes as well.
//
// CapitalizedPolicy only asks for an uppercase first letter, and
// StoplistPolicy filters sentence-initial common words ("May",
// "Will", "Grace") that happen to be lexicon keys.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::lexicon::fold;
use crate::domain::traits::NameCandidatePolicy;

/// Classic title-case test
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCasePolicy;

impl NameCandidatePolicy for TitleCasePolicy {
    fn is_candidate(&self, token: &str) -> bool {
        let mut seen_cased = false;
        let mut prev_cased = false;

        for c in token.chars() {
            if c.is_uppercase() {
                if prev_cased {
                    return false;
                }
                prev_cased = true;
                seen_cased = true;
            } else if c.is_lowercase() {
                if !prev_cased {
                    return false;
                }
                prev_cased = true;
                seen_cased = true;
            } else {
                prev_cased = false;
            }
        }

        seen_cased
    }
}

/// First character uppercase, the rest unconstrained
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizedPolicy;

impl NameCandidatePolicy for CapitalizedPolicy {
    fn is_candidate(&self, token: &str) -> bool {
        token.chars().next().map_or(false, char::is_uppercase)
    }
}

/// Wraps another policy and rejects any token on the stoplist
pub struct StoplistPolicy<P> {
    inner:    P,
    stoplist: HashSet<String>,
}

impl<P: NameCandidatePolicy> StoplistPolicy<P> {
    /// Stoplist words are matched case-insensitively
    pub fn new<I, S>(inner: P, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stoplist = words.into_iter().map(|w| fold(w.as_ref())).collect();
        Self { inner, stoplist }
    }
}

impl<P: NameCandidatePolicy> NameCandidatePolicy for StoplistPolicy<P> {
    fn is_candidate(&self, token: &str) -> bool {
        self.inner.is_candidate(token) && !self.stoplist.contains(&fold(token))
    }
}

/// Which policy a run uses, as selected by `--policy`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    TitleCase,
    Capitalized,
}

/// Build the boxed policy for a run, wrapping it in a stoplist
/// when any stop words are configured.
pub fn build_policy(kind: PolicyKind, stoplist: &[String]) -> Box<dyn NameCandidatePolicy> {
    match (kind, stoplist.is_empty()) {
        (PolicyKind::TitleCase, true)    => Box::new(TitleCasePolicy),
        (PolicyKind::Capitalized, true)  => Box::new(CapitalizedPolicy),
        (PolicyKind::TitleCase, false)   => Box::new(StoplistPolicy::new(TitleCasePolicy, stoplist)),
        (PolicyKind::Capitalized, false) => Box::new(StoplistPolicy::new(CapitalizedPolicy, stoplist)),
    }
}

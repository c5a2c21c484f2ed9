// ============================================================
// Layer 5 — Balancer
// ============================================================
// Applies a ReplacementPlan to the text of one unit.
//
// Two substitution modes:
//
//   Span (default)
//     Each sampled mention is replaced at its own byte span.
//     Replacements run right-to-left so spans to the left stay
//     valid while the text changes length.
//
//   FirstOccurrence
//     For each sampled mention, in sampling order, replace the
//     FIRST remaining textual occurrence of its surface string.
//     Known imprecision: if "Bob" is sampled at its second
//     position, the first "Bob" is rewritten instead; and the
//     search is by substring, so "Al" can hit inside "Alice".
//
// Either way the number of substitutions equals the planned
// difference.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::balance::plan::{build_plan, ReplacementPlan};
use crate::domain::error::Result;
use crate::domain::lexicon::Lexicon;
use crate::domain::mention::NameMention;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubstitutionMode {
    #[default]
    Span,
    FirstOccurrence,
}

/// The rewritten text together with the plan that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub plan: ReplacementPlan,
}

impl Rewrite {
    pub fn substitutions(&self) -> usize {
        self.plan.len()
    }
}

pub struct Balancer<'a> {
    lexicon: &'a Lexicon,
    mode:    SubstitutionMode,
}

impl<'a> Balancer<'a> {
    pub fn new(lexicon: &'a Lexicon, mode: SubstitutionMode) -> Self {
        Self { lexicon, mode }
    }

    /// Rebalance one text unit.
    ///
    /// `mentions` must come from extracting `text` itself; span
    /// mode indexes `text` with their spans. A balanced unit comes
    /// back unchanged with an empty plan.
    pub fn balance<R: Rng + ?Sized>(
        &self,
        text:     &str,
        mentions: &[NameMention],
        rng:      &mut R,
    ) -> Result<Rewrite> {
        let plan = build_plan(mentions, self.lexicon, rng)?;
        let text = if plan.is_empty() {
            text.to_string()
        } else {
            self.apply(text, &plan)
        };
        Ok(Rewrite { text, plan })
    }

    /// Apply an existing plan to `text` under this Balancer's mode
    pub fn apply(&self, text: &str, plan: &ReplacementPlan) -> String {
        match self.mode {
            SubstitutionMode::Span            => apply_by_span(text, plan),
            SubstitutionMode::FirstOccurrence => apply_first_occurrence(text, plan),
        }
    }
}

fn apply_by_span(text: &str, plan: &ReplacementPlan) -> String {
    let mut ordered: Vec<_> = plan.replacements.iter().collect();
    ordered.sort_by(|a, b| b.mention.span.start.cmp(&a.mention.span.start));

    let mut out = text.to_string();
    for r in ordered {
        let span = r.mention.span.clone();
        // The span must still hold the sampled surface text
        if out.get(span.clone()) != Some(r.mention.surface.as_str()) {
            tracing::warn!(
                "Mention '{}' not found at {:?}; leaving it in place",
                r.mention.surface,
                span
            );
            continue;
        }
        out.replace_range(span, &r.replacement);
    }
    out
}

fn apply_first_occurrence(text: &str, plan: &ReplacementPlan) -> String {
    let mut out = text.to_string();
    for r in &plan.replacements {
        out = out.replacen(&r.mention.surface, &r.replacement, 1);
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::plan::Replacement;
    use crate::data::extractor::NameExtractor;
    use crate::data::policy::TitleCasePolicy;
    use crate::data::tally::tally;
    use crate::domain::gender::Gender;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_balanced_text_is_unchanged() {
        let lex  = Lexicon::from_entries([("alice", "f"), ("bob", "m"), ("carol", "f")]);
        let ex   = NameExtractor::new(&lex, TitleCasePolicy);
        let text = "Bob met Alice and Bob met Carol.";
        let ms   = ex.extract(text);
        assert_eq!(tally(&ms).male, 2);
        assert_eq!(tally(&ms).female, 2);

        for mode in [SubstitutionMode::Span, SubstitutionMode::FirstOccurrence] {
            let out = Balancer::new(&lex, mode)
                .balance(text, &ms, &mut StdRng::seed_from_u64(9))
                .unwrap();
            assert_eq!(out.text, text);
            assert_eq!(out.substitutions(), 0);
        }
    }

    #[test]
    fn test_one_male_becomes_alice() {
        let lex  = Lexicon::from_entries([("alice", "f"), ("bob", "m"), ("dave", "m")]);
        let ex   = NameExtractor::new(&lex, TitleCasePolicy);
        let text = "Bob and Dave met Alice.";
        let ms   = ex.extract(text);

        for seed in 0..10 {
            let out = Balancer::new(&lex, SubstitutionMode::Span)
                .balance(text, &ms, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(
                out.text == "Alice and Dave met Alice." || out.text == "Bob and Alice met Alice.",
                "unexpected rewrite: {}",
                out.text
            );
            let after = tally(&ex.extract(&out.text));
            assert_eq!((after.male, after.female), (1, 2));
        }
    }

    #[test]
    fn test_span_mode_hits_the_sampled_instance() {
        let lex  = Lexicon::from_entries([("bob", "m"), ("eve", "f")]);
        let text = "Bob saw Bob.";
        let plan = ReplacementPlan {
            majority:     Some(Gender::Male),
            replacements: vec![Replacement {
                mention:     NameMention::new("Bob", Gender::Male, 8..11),
                replacement: "Eve".into(),
            }],
        };

        let span = Balancer::new(&lex, SubstitutionMode::Span).apply(text, &plan);
        assert_eq!(span, "Bob saw Eve.");

        // The occurrence-based mode rewrites the first "Bob" instead
        let first = Balancer::new(&lex, SubstitutionMode::FirstOccurrence).apply(text, &plan);
        assert_eq!(first, "Eve saw Bob.");
    }

    #[test]
    fn test_first_occurrence_consumes_repeats_one_at_a_time() {
        let lex  = Lexicon::from_entries([("bob", "m"), ("eve", "f")]);
        let text = "Bob, Bob, Bob.";
        let bob  = |at: usize| Replacement {
            mention:     NameMention::new("Bob", Gender::Male, at..at + 3),
            replacement: "Eve".into(),
        };
        let plan = ReplacementPlan {
            majority:     Some(Gender::Male),
            replacements: vec![bob(10), bob(5)],
        };

        let out = Balancer::new(&lex, SubstitutionMode::FirstOccurrence).apply(text, &plan);
        assert_eq!(out, "Eve, Eve, Bob.");
    }

    #[test]
    fn test_span_mode_handles_length_changes() {
        let lex  = Lexicon::from_entries([("al", "m"), ("bo", "m"), ("alexandra", "f")]);
        let ex   = NameExtractor::new(&lex, TitleCasePolicy);
        let text = "Al and Bo.";
        let ms   = ex.extract(text);

        let out = Balancer::new(&lex, SubstitutionMode::Span)
            .balance(text, &ms, &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(out.text, "Alexandra and Alexandra.");
        assert_eq!(out.substitutions(), 2);
    }

    #[test]
    fn test_substitution_count_equals_difference() {
        let lex  = Lexicon::from_entries([
            ("ann", "f"), ("beth", "f"), ("cleo", "f"), ("dan", "m"), ("ed", "m"),
        ]);
        let ex   = NameExtractor::new(&lex, TitleCasePolicy);
        let text = "Ann, Beth and Cleo told Ann about Dan.";
        let ms   = ex.extract(text);
        let diff = tally(&ms).difference();
        assert_eq!(diff, 3);

        for mode in [SubstitutionMode::Span, SubstitutionMode::FirstOccurrence] {
            for seed in 0..10 {
                let out = Balancer::new(&lex, mode)
                    .balance(text, &ms, &mut StdRng::seed_from_u64(seed))
                    .unwrap();
                assert_eq!(out.substitutions(), diff);
                for r in &out.plan.replacements {
                    assert_eq!(lex.gender_of(&r.replacement), Some(Gender::Male));
                }
            }
        }
    }
}

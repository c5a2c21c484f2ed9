// ============================================================
// Layer 5 — Replacement Plan
// ============================================================
// Steps 1–6 of a rebalance, minus touching the text:
// decide WHICH majority mentions get replaced and by WHAT.
//
// Sampling is over mention multiplicity: a name written K times
// sits K times in the majority list and can be picked up to K
// times.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::error::{BalanceError, Result};
use crate::domain::gender::Gender;
use crate::domain::lexicon::{display_form, Lexicon};
use crate::domain::mention::NameMention;
use crate::domain::report::GenderCount;

/// One sampled majority mention and the name that will replace it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub mention:     NameMention,
    pub replacement: String,
}

/// The full set of substitutions for one Balancer pass.
/// `majority` is `None` when the unit was already balanced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementPlan {
    pub majority:     Option<Gender>,
    pub replacements: Vec<Replacement>,
}

impl ReplacementPlan {
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

/// Build the plan that would equalise `mentions`.
pub fn build_plan<R: Rng + ?Sized>(
    mentions: &[NameMention],
    lexicon:  &Lexicon,
    rng:      &mut R,
) -> Result<ReplacementPlan> {
    // ── Steps 1–3: partition, difference, majority ───────────────────────
    let mut counts = GenderCount::default();
    for m in mentions {
        counts.record(m.gender);
    }

    let majority = match counts.majority() {
        Some(g) => g,
        None    => return Ok(ReplacementPlan::default()),
    };
    let difference = counts.difference();

    // ── Step 4: sample majority mentions without replacement ─────────────
    let sampled = sample_mentions(mentions, majority, difference, rng)?;

    // ── Step 5: replacement pool under the minority label ────────────────
    let minority = majority.opposite();
    let pool     = lexicon.names_for(minority);
    if pool.is_empty() {
        return Err(BalanceError::NoReplacementCandidate(minority));
    }

    // ── Step 6: one independent draw per sampled mention ─────────────────
    let mut replacements = Vec::with_capacity(sampled.len());
    for mention in sampled {
        let name = pool
            .choose(rng)
            .ok_or(BalanceError::NoReplacementCandidate(minority))?;
        replacements.push(Replacement {
            mention:     mention.clone(),
            replacement: display_form(name),
        });
    }

    tracing::debug!(
        "Planned {} {} → {} substitutions",
        replacements.len(),
        majority,
        minority
    );

    Ok(ReplacementPlan { majority: Some(majority), replacements })
}

/// Pick `count` distinct mentions of `gender`, uniformly, in draw order.
///
/// Fails with InsufficientMentions when fewer than `count` exist.
pub fn sample_mentions<'m, R: Rng + ?Sized>(
    mentions: &'m [NameMention],
    gender:   Gender,
    count:    usize,
    rng:      &mut R,
) -> Result<Vec<&'m NameMention>> {
    let pool: Vec<&NameMention> = mentions.iter().filter(|m| m.gender == gender).collect();

    if count > pool.len() {
        return Err(BalanceError::InsufficientMentions {
            gender,
            requested: count,
            available: pool.len(),
        });
    }

    Ok(index::sample(rng, pool.len(), count)
        .into_iter()
        .map(|i| pool[i])
        .collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m(surface: &str, gender: Gender, at: usize) -> NameMention {
        NameMention::new(surface, gender, at..at + surface.len())
    }

    #[test]
    fn test_balanced_mentions_give_empty_plan() {
        let lex = Lexicon::from_entries([("bob", "m"), ("alice", "f")]);
        let ms  = vec![m("Bob", Gender::Male, 0), m("Alice", Gender::Female, 8)];
        let mut rng = StdRng::seed_from_u64(7);

        let plan = build_plan(&ms, &lex, &mut rng).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.majority, None);
    }

    #[test]
    fn test_plan_size_equals_difference() {
        let lex = Lexicon::from_entries([("bob", "m"), ("dave", "m"), ("alice", "f"), ("carol", "f")]);
        let ms  = vec![
            m("Bob", Gender::Male, 0),
            m("Dave", Gender::Male, 4),
            m("Bob", Gender::Male, 9),
            m("Dave", Gender::Male, 13),
            m("Alice", Gender::Female, 18),
        ];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan    = build_plan(&ms, &lex, &mut rng).unwrap();
            assert_eq!(plan.len(), 3);
            assert_eq!(plan.majority, Some(Gender::Male));
            for r in &plan.replacements {
                assert_eq!(r.mention.gender, Gender::Male);
                assert!(r.replacement == "Alice" || r.replacement == "Carol");
            }
        }
    }

    #[test]
    fn test_sampled_mentions_are_distinct_instances() {
        let ms = vec![
            m("Ann", Gender::Female, 0),
            m("Ann", Gender::Female, 4),
            m("Ann", Gender::Female, 8),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let picked  = sample_mentions(&ms, Gender::Female, 3, &mut rng).unwrap();

        let mut starts: Vec<usize> = picked.iter().map(|p| p.span.start).collect();
        starts.sort_unstable();
        assert_eq!(starts, vec![0, 4, 8]);
    }

    #[test]
    fn test_oversampling_is_insufficient_mentions() {
        let ms      = vec![m("Bob", Gender::Male, 0)];
        let mut rng = StdRng::seed_from_u64(1);
        let err     = sample_mentions(&ms, Gender::Male, 2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InsufficientMentions { requested: 2, available: 1, .. }
        ));
    }

    #[test]
    fn test_empty_minority_pool_is_an_error() {
        let lex = Lexicon::from_entries([("bob", "m")]);
        let ms  = vec![m("Bob", Gender::Male, 0)];
        let mut rng = StdRng::seed_from_u64(1);

        let err = build_plan(&ms, &lex, &mut rng).unwrap_err();
        assert!(matches!(err, BalanceError::NoReplacementCandidate(Gender::Female)));
    }

    #[test]
    fn test_same_seed_same_plan() {
        let lex = Lexicon::from_entries([("bob", "m"), ("dave", "m"), ("alice", "f"), ("eve", "f")]);
        let ms  = vec![
            m("Bob", Gender::Male, 0),
            m("Dave", Gender::Male, 4),
            m("Bob", Gender::Male, 9),
        ];
        let a = build_plan(&ms, &lex, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = build_plan(&ms, &lex, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }
}

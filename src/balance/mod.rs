// ============================================================
// Layer 5 — Balancer
// ============================================================
// The rewriting core. Given one text unit and its mentions it:
//
//   1. partitions mentions by gender
//   2. computes difference = |male − female| (0 → no-op)
//   3. picks majority / minority
//   4. samples `difference` majority mentions without replacement
//   5. collects every lexicon name under the minority label
//   6. draws one replacement per sampled mention (with
//      replacement across draws) and rewrites the text
//
// All randomness comes from an RNG passed in by the caller, so a
// seeded StdRng reproduces a run exactly.
//
//   plan.rs     — sampling and replacement draws → ReplacementPlan
//   balancer.rs — applying a plan to text, SubstitutionMode

/// Sampling, replacement pool and the ReplacementPlan type
pub mod plan;

/// The Balancer itself and the two substitution modes
pub mod balancer;

pub use balancer::{Balancer, SubstitutionMode};

// ============================================================
// Layer 3 — Counts, Shares and Reports
// ============================================================
// Plain result structures returned by the Aggregator instead
// of a global "current run statistics" state.
//
//   GenderCount  — (male, female) mention counts
//   MentionShare — percentages, or NotApplicable when a unit
//                  has zero recognised mentions (the division
//                  would be undefined)
//   UnitReport   — before/after for one text unit
//   RunReport    — document-level totals plus every UnitReport

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

use crate::domain::gender::Gender;

/// Per-gender mention counts. Every mention counts, repeats included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub male:   usize,
    pub female: usize,
}

impl GenderCount {
    pub fn new(male: usize, female: usize) -> Self {
        Self { male, female }
    }

    /// Count one more mention of `gender`
    pub fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Male   => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }

    pub fn get(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male   => self.male,
            Gender::Female => self.female,
        }
    }

    pub fn total(&self) -> usize {
        self.male + self.female
    }

    /// |male − female|
    pub fn difference(&self) -> usize {
        self.male.abs_diff(self.female)
    }

    /// The gender with strictly more mentions; `None` on a tie
    pub fn majority(&self) -> Option<Gender> {
        match self.male.cmp(&self.female) {
            std::cmp::Ordering::Greater => Some(Gender::Male),
            std::cmp::Ordering::Less    => Some(Gender::Female),
            std::cmp::Ordering::Equal   => None,
        }
    }

    /// Percentages of male and female mentions.
    /// Returns NotApplicable instead of dividing by zero.
    pub fn share(&self) -> MentionShare {
        let total = self.total();
        if total == 0 {
            return MentionShare::NotApplicable;
        }
        let total = total as f64;
        MentionShare::Reported {
            male:   self.male as f64 / total * 100.0,
            female: self.female as f64 / total * 100.0,
        }
    }
}

impl AddAssign for GenderCount {
    fn add_assign(&mut self, other: Self) {
        self.male   += other.male;
        self.female += other.female;
    }
}

/// Percentage split of mentions, or no mentions to split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MentionShare {
    Reported { male: f64, female: f64 },
    NotApplicable,
}

impl fmt::Display for MentionShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentionShare::Reported { male, female } => {
                write!(f, "male {:.1}% / female {:.1}%", male, female)
            }
            MentionShare::NotApplicable => f.write_str("no name mentions"),
        }
    }
}

/// What happened to one text unit during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitOutcome {
    /// Only counted by the `analyze` command
    Analyzed,

    /// Counts were already equal; text returned unchanged
    AlreadyBalanced,

    /// `substitutions` majority mentions were replaced
    Rebalanced { substitutions: usize },

    /// The Balancer refused the unit and it was kept as is
    PassedThrough { reason: String },
}

/// Before/after statistics for one text unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReport {
    pub index:   usize,
    pub before:  GenderCount,
    pub after:   GenderCount,
    pub outcome: UnitOutcome,
}

impl UnitReport {
    pub fn before_share(&self) -> MentionShare {
        self.before.share()
    }

    pub fn after_share(&self) -> MentionShare {
        self.after.share()
    }

    /// Number of names replaced in this unit
    pub fn substitutions(&self) -> usize {
        match self.outcome {
            UnitOutcome::Rebalanced { substitutions } => substitutions,
            _ => 0,
        }
    }
}

/// Document-level result of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub units:         Vec<UnitReport>,
    pub skipped_units: usize,
    pub total_before:  GenderCount,
    pub total_after:   GenderCount,
}

impl RunReport {
    /// Add a unit and fold its counts into the document totals
    pub fn push(&mut self, unit: UnitReport) {
        self.total_before += unit.before;
        self.total_after  += unit.after;
        self.units.push(unit);
    }

    pub fn record_skip(&mut self) {
        self.skipped_units += 1;
    }

    pub fn total_substitutions(&self) -> usize {
        self.units.iter().map(UnitReport::substitutions).sum()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_of_zero_mentions_is_not_applicable() {
        assert_eq!(GenderCount::default().share(), MentionShare::NotApplicable);
        assert_eq!(MentionShare::NotApplicable.to_string(), "no name mentions");
    }

    #[test]
    fn test_share_percentages() {
        match GenderCount::new(3, 1).share() {
            MentionShare::Reported { male, female } => {
                assert!((male - 75.0).abs() < 1e-9);
                assert!((female - 25.0).abs() < 1e-9);
            }
            other => panic!("expected percentages, got {other:?}"),
        }
    }

    #[test]
    fn test_majority_and_difference() {
        let c = GenderCount::new(2, 5);
        assert_eq!(c.majority(), Some(Gender::Female));
        assert_eq!(c.difference(), 3);
        assert_eq!(GenderCount::new(4, 4).majority(), None);
    }

    #[test]
    fn test_run_report_accumulates_totals() {
        let mut run = RunReport::default();
        run.push(UnitReport {
            index:   1,
            before:  GenderCount::new(2, 1),
            after:   GenderCount::new(1, 2),
            outcome: UnitOutcome::Rebalanced { substitutions: 1 },
        });
        run.push(UnitReport {
            index:   2,
            before:  GenderCount::new(0, 0),
            after:   GenderCount::new(0, 0),
            outcome: UnitOutcome::AlreadyBalanced,
        });
        run.record_skip();

        assert_eq!(run.total_before, GenderCount::new(2, 1));
        assert_eq!(run.total_after, GenderCount::new(1, 2));
        assert_eq!(run.total_substitutions(), 1);
        assert_eq!(run.skipped_units, 1);
    }
}

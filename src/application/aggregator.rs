// ============================================================
// Layer 2 — Aggregator
// ============================================================
// Runs the per-unit pipeline over a whole document and folds
// the results into a RunReport:
//
//   unit ─▶ extract ─▶ tally ─▶ balance ─▶ re-extract ─▶ tally
//
// Units are independent. The only shared state is the read-only
// Lexicon and the RNG, which is threaded through sequentially so
// a seeded run is reproducible.
//
// Error policy:
//   - ExtractionFailure         → unit skipped, run continues
//   - Balancer precondition     → PassThrough: keep unit as is
//                                 Abort:       stop the run

use anyhow::{bail, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::balance::Balancer;
use crate::data::extractor::NameExtractor;
use crate::data::tally::tally;
use crate::domain::document::{TextUnit, UnitExtraction};
use crate::domain::error::BalanceError;
use crate::domain::report::{RunReport, UnitOutcome, UnitReport};
use crate::domain::traits::NameCandidatePolicy;

/// What to do when the Balancer refuses a unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnBalanceError {
    #[default]
    PassThrough,
    Abort,
}

/// Rewritten units (in document order) plus the statistics
#[derive(Debug, Clone, Default)]
pub struct AggregateRun {
    pub units:  Vec<TextUnit>,
    pub report: RunReport,
}

pub struct Aggregator<'a, P> {
    extractor: NameExtractor<'a, P>,
    balancer:  Balancer<'a>,
    on_error:  OnBalanceError,
}

impl<'a, P: NameCandidatePolicy> Aggregator<'a, P> {
    pub fn new(extractor: NameExtractor<'a, P>, balancer: Balancer<'a>, on_error: OnBalanceError) -> Self {
        Self { extractor, balancer, on_error }
    }

    /// Count mentions in one unit without rewriting it
    pub fn analyze_unit(&self, unit: &TextUnit) -> UnitReport {
        let counts = tally(&self.extractor.extract(&unit.text));
        UnitReport {
            index:   unit.index,
            before:  counts,
            after:   counts,
            outcome: UnitOutcome::Analyzed,
        }
    }

    /// Rebalance one unit and re-tally the result.
    /// Only fails when the policy is Abort and the Balancer refused.
    pub fn balance_unit<R: Rng + ?Sized>(
        &self,
        unit: &TextUnit,
        rng:  &mut R,
    ) -> Result<(TextUnit, UnitReport)> {
        let mentions = self.extractor.extract(&unit.text);
        let before   = tally(&mentions);

        let (rewritten, outcome) = match self.balancer.balance(&unit.text, &mentions, rng) {
            Ok(rw) if rw.plan.is_empty() => (unit.clone(), UnitOutcome::AlreadyBalanced),
            Ok(rw) => {
                let substitutions = rw.substitutions();
                (unit.with_text(rw.text), UnitOutcome::Rebalanced { substitutions })
            }
            Err(e) if e.is_unit_local() && self.on_error == OnBalanceError::PassThrough => {
                tracing::warn!("Unit {}: {}; keeping it unchanged", unit.index, e);
                (unit.clone(), UnitOutcome::PassedThrough { reason: e.to_string() })
            }
            Err(e) => bail!("Unit {} of '{}': {}", unit.index, unit.source, e),
        };

        let after  = tally(&self.extractor.extract(&rewritten.text));
        let report = UnitReport { index: unit.index, before, after, outcome };

        tracing::debug!(
            "Unit {}: before {} | after {}",
            unit.index,
            report.before_share(),
            report.after_share()
        );

        Ok((rewritten, report))
    }

    /// Run over every unit. With `rewrite == false` nothing is
    /// rebalanced and the RNG is never touched.
    pub fn run<R: Rng + ?Sized>(
        &self,
        extractions: Vec<UnitExtraction>,
        rewrite:     bool,
        rng:         &mut R,
    ) -> Result<AggregateRun> {
        let mut out = AggregateRun::default();

        for extraction in extractions {
            let unit = match extraction {
                Ok(unit) => unit,
                Err(failure) => {
                    let source = failure.source.clone();
                    let err    = BalanceError::from(failure);
                    tracing::warn!("Skipping a unit of '{}': {}", source, err);
                    out.report.record_skip();
                    continue;
                }
            };

            if rewrite {
                let (rewritten, report) = self.balance_unit(&unit, rng)?;
                out.units.push(rewritten);
                out.report.push(report);
            } else {
                out.report.push(self.analyze_unit(&unit));
                out.units.push(unit);
            }
        }

        Ok(out)
    }
}

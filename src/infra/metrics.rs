// ============================================================
// Layer 6 — Unit Stats Logger
// ============================================================
// Writes one CSV row per text unit with its before/after
// counts, so page-level results can be opened in a spreadsheet
// or plotted.
//
// Example CSV output:
//   unit,male_before,female_before,male_after,female_after,substitutions,outcome
//   1,2,1,1,2,1,rebalanced
//   2,0,0,0,0,0,already_balanced
//
// Percentages are left to the reader: a unit with no mentions
// has none, and a CSV cell is a poor place for "n/a".

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::domain::report::{UnitOutcome, UnitReport};

pub struct UnitStatsLogger {
    csv_path: PathBuf,
}

impl UnitStatsLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { csv_path: path.into() }
    }

    /// Write the header and one row per unit, replacing any previous file
    pub fn write_all(&self, units: &[UnitReport]) -> Result<()> {
        if let Some(parent) = self.csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(
            w,
            "unit,male_before,female_before,male_after,female_after,substitutions,outcome"
        )?;

        for u in units {
            writeln!(
                w,
                "{},{},{},{},{},{},{}",
                u.index,
                u.before.male,
                u.before.female,
                u.after.male,
                u.after.female,
                u.substitutions(),
                outcome_label(&u.outcome),
            )?;
        }

        w.flush()?;
        tracing::debug!(
            "Wrote stats for {} units to '{}'",
            units.len(),
            self.csv_path.display()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

fn outcome_label(outcome: &UnitOutcome) -> &'static str {
    match outcome {
        UnitOutcome::Analyzed             => "analyzed",
        UnitOutcome::AlreadyBalanced      => "already_balanced",
        UnitOutcome::Rebalanced { .. }    => "rebalanced",
        UnitOutcome::PassedThrough { .. } => "passed_through",
    }
}

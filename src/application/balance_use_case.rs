// ============================================================
// Layer 2 — BalanceUseCase
// ============================================================
// Orchestrates a full run in order:
//
//   Step 1: Load the reference lexicon   (Layer 4 - data)
//   Step 2: Split the document into units (Layer 4 - data)
//   Step 3: Seed the RNG                  (this layer)
//   Step 4: Extract, tally, rebalance     (Layers 4/5 via Aggregator)
//   Step 5: Render the output document    (Layer 6 - infra)
//   Step 6: Save report / stats CSV       (Layer 6 - infra)
//
// A missing lexicon column aborts at Step 1 before the document
// is even opened.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::application::aggregator::{AggregateRun, Aggregator, OnBalanceError};
use crate::balance::{Balancer, SubstitutionMode};
use crate::data::{
    extractor::NameExtractor,
    lexicon_loader::{LexiconLoader, LexiconSchema},
    loader::DocumentLoader,
    policy::{build_policy, PolicyKind},
};
use crate::domain::document::UnitExtraction;
use crate::domain::lexicon::Lexicon;
use crate::domain::report::RunReport;
use crate::domain::traits::{DocumentSink, DocumentSource};
use crate::infra::{
    metrics::UnitStatsLogger,
    report_store::{ReportStore, SavedReport},
    writer::DocumentWriter,
};

// ─── Run Configuration ────────────────────────────────────────────────────────
// Everything a run needs. Serialisable so it can be saved next to
// the report and a run reproduced later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub lexicon_path:  String,
    pub document_path: String,
    pub output_path:   Option<String>,
    pub report_path:   Option<String>,
    pub stats_csv:     Option<String>,
    pub seed:          Option<u64>,
    pub mode:          SubstitutionMode,
    pub policy:        PolicyKind,
    pub stoplist:      Vec<String>,
    pub schema:        LexiconSchema,
    pub on_error:      OnBalanceError,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            lexicon_path:  "data/names.csv".to_string(),
            document_path: "data/document.txt".to_string(),
            output_path:   None,
            report_path:   None,
            stats_csv:     None,
            seed:          None,
            mode:          SubstitutionMode::default(),
            policy:        PolicyKind::default(),
            stoplist:      Vec::new(),
            schema:        LexiconSchema::default(),
            on_error:      OnBalanceError::default(),
        }
    }
}

// ─── BalanceUseCase ───────────────────────────────────────────────────────────
pub struct BalanceUseCase {
    config: BalanceConfig,
}

impl BalanceUseCase {
    pub fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline. `rewrite == false` is the analyze-only path.
    pub fn execute(&self, rewrite: bool) -> Result<RunReport> {
        let cfg = &self.config;

        // ── Step 1: Lexicon ──────────────────────────────────────────────────
        let lexicon = LexiconLoader::new(cfg.schema.clone())
            .load_path(&cfg.lexicon_path)
            .with_context(|| format!("Cannot build lexicon from '{}'", cfg.lexicon_path))?;

        // ── Step 2: Units ────────────────────────────────────────────────────
        let extractions = DocumentLoader::new(&cfg.document_path).load_units()?;

        // ── Step 3: RNG ──────────────────────────────────────────────────────
        // Draw a seed when none was given and log it, so any run can be replayed
        let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
        if rewrite {
            tracing::info!("Using RNG seed {}", seed);
        }
        let mut rng = StdRng::seed_from_u64(seed);

        // ── Step 4: Aggregate ────────────────────────────────────────────────
        let run = self.aggregate(&lexicon, extractions, rewrite, &mut rng)?;
        let report = &run.report;

        tracing::info!(
            "Processed {} units ({} skipped): before {} | after {} | {} substitutions",
            report.units.len(),
            report.skipped_units,
            report.total_before.share(),
            report.total_after.share(),
            report.total_substitutions()
        );

        // ── Step 5: Output document ──────────────────────────────────────────
        if rewrite {
            if let Some(out) = &cfg.output_path {
                DocumentWriter::new(out).write_units(&run.units)?;
            }
        }

        // ── Step 6: Report + stats ───────────────────────────────────────────
        if let Some(path) = &cfg.report_path {
            let effective = BalanceConfig { seed: Some(seed), ..cfg.clone() };
            ReportStore::new(path).save(&SavedReport::new(&effective, report))?;
        }
        if let Some(path) = &cfg.stats_csv {
            UnitStatsLogger::new(path).write_all(&report.units)?;
        }

        Ok(run.report)
    }

    fn aggregate(
        &self,
        lexicon:     &Lexicon,
        extractions: Vec<UnitExtraction>,
        rewrite:     bool,
        rng:         &mut StdRng,
    ) -> Result<AggregateRun> {
        let cfg        = &self.config;
        let policy     = build_policy(cfg.policy, &cfg.stoplist);
        let aggregator = Aggregator::new(
            NameExtractor::new(lexicon, policy),
            Balancer::new(lexicon, cfg.mode),
            cfg.on_error,
        );
        aggregator.run(extractions, rewrite, rng)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::GenderCount;
    use std::fs;

    fn write_inputs(dir: &std::path::Path) -> (String, String) {
        let lexicon  = dir.join("names.csv");
        let document = dir.join("story.txt");
        fs::write(&lexicon, "name,gender\nAlice,f\nBob,m\nDave,m\n").unwrap();
        fs::write(&document, "Bob and Dave met Alice.\u{000C}Alice waved.\u{000C}").unwrap();
        (
            lexicon.to_string_lossy().into_owned(),
            document.to_string_lossy().into_owned(),
        )
    }

    #[test]
    fn test_balance_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let (lexicon_path, document_path) = write_inputs(dir.path());
        let output = dir.path().join("out.txt");
        let report = dir.path().join("report.json");
        let stats  = dir.path().join("stats.csv");

        let config = BalanceConfig {
            lexicon_path,
            document_path,
            output_path: Some(output.to_string_lossy().into_owned()),
            report_path: Some(report.to_string_lossy().into_owned()),
            stats_csv:   Some(stats.to_string_lossy().into_owned()),
            seed:        Some(123),
            ..BalanceConfig::default()
        };

        let run = BalanceUseCase::new(config).execute(true).unwrap();
        assert_eq!(run.total_before, GenderCount::new(2, 2));
        // Page 1 goes (2, 1) → (1, 2), page 2 goes (0, 1) → (1, 0)
        assert_eq!(run.total_after, GenderCount::new(2, 2));
        assert_eq!(run.total_substitutions(), 2);

        let body  = fs::read_to_string(&output).unwrap();
        let pages: Vec<&str> = body.split('\u{000C}').collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[1] == "Bob waved." || pages[1] == "Dave waved.");
        assert!(report.exists());
        assert!(stats.exists());

        let saved = ReportStore::new(&report).load().unwrap();
        assert_eq!(saved.config.seed, Some(123));
    }

    #[test]
    fn test_same_seed_same_output() {
        let dir = tempfile::tempdir().unwrap();
        let (lexicon_path, document_path) = write_inputs(dir.path());

        let run_once = |name: &str| {
            let out = dir.path().join(name);
            let config = BalanceConfig {
                lexicon_path:  lexicon_path.clone(),
                document_path: document_path.clone(),
                output_path:   Some(out.to_string_lossy().into_owned()),
                seed:          Some(77),
                ..BalanceConfig::default()
            };
            BalanceUseCase::new(config).execute(true).unwrap();
            fs::read_to_string(out).unwrap()
        };

        assert_eq!(run_once("a.txt"), run_once("b.txt"));
    }

    #[test]
    fn test_bad_lexicon_aborts_before_document() {
        let dir     = tempfile::tempdir().unwrap();
        let lexicon = dir.path().join("names.csv");
        fs::write(&lexicon, "first,label\nAlice,f\n").unwrap();

        let config = BalanceConfig {
            lexicon_path:  lexicon.to_string_lossy().into_owned(),
            document_path: "/does/not/exist.txt".to_string(),
            ..BalanceConfig::default()
        };
        let err = BalanceUseCase::new(config).execute(true).unwrap_err();
        assert!(format!("{err:#}").contains("Configuration error"));
    }
}

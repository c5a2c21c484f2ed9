// ============================================================
// Layer 6 — Report Store
// ============================================================
// Saves a run's RunReport, together with the configuration that
// produced it, as pretty-printed JSON. Keeping the config next
// to the numbers means a run can be reproduced later: same
// lexicon, same document, same seed → same rewrite.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::application::balance_use_case::BalanceConfig;
use crate::domain::report::{MentionShare, RunReport};

/// What lands in the JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedReport {
    pub config:       BalanceConfig,
    pub share_before: MentionShare,
    pub share_after:  MentionShare,
    pub report:       RunReport,
}

impl SavedReport {
    pub fn new(config: &BalanceConfig, report: &RunReport) -> Self {
        Self {
            config:       config.clone(),
            share_before: report.total_before.share(),
            share_after:  report.total_after.share(),
            report:       report.clone(),
        }
    }
}

pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, saved: &SavedReport) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(saved)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write report to '{}'", self.path.display()))?;

        tracing::debug!("Saved run report to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<SavedReport> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read report from '{}'", self.path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

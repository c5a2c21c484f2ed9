// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `analyze` and `balance`, and all
// their flags. clap's derive macros generate --help text, error
// messages for missing args, and type conversion.
//
// The application layer never sees clap types: the args are
// converted into a BalanceConfig at this boundary.

use clap::{Args, Subcommand, ValueEnum};

use crate::application::aggregator::OnBalanceError;
use crate::application::balance_use_case::BalanceConfig;
use crate::balance::SubstitutionMode;
use crate::data::lexicon_loader::LexiconSchema;
use crate::data::policy::PolicyKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count male and female name mentions per unit, without rewriting
    Analyze(AnalyzeArgs),

    /// Rewrite the document so male and female mentions are balanced
    Balance(BalanceArgs),
}

/// Flags shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// CSV file with a header row, a name column and a gender column
    #[arg(long)]
    pub lexicon: String,

    /// Source document: .docx (one unit per paragraph) or text
    /// (pages separated by form feed)
    #[arg(long)]
    pub document: String,

    /// Write the run report (config + counts) as JSON here
    #[arg(long)]
    pub report: Option<String>,

    /// Write per-unit before/after counts as CSV here
    #[arg(long)]
    pub stats_csv: Option<String>,

    /// How to decide that a token looks like a name
    #[arg(long, value_enum, default_value_t = PolicyArg::TitleCase)]
    pub policy: PolicyArg,

    /// Capitalised words never treated as names (repeatable, case-insensitive)
    #[arg(long = "stopword", value_name = "WORD")]
    pub stoplist: Vec<String>,

    /// Accepted name-column headers, in priority order (replaces the defaults)
    #[arg(long = "name-header", value_name = "HEADER")]
    pub name_headers: Vec<String>,

    /// Accepted gender-column headers, in priority order (replaces the defaults)
    #[arg(long = "gender-header", value_name = "HEADER")]
    pub gender_headers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Where to write the rewritten document (.docx or text)
    #[arg(long)]
    pub output: String,

    /// Seed for sampling and replacement draws; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where a sampled mention gets replaced
    #[arg(long, value_enum, default_value_t = ModeArg::Span)]
    pub mode: ModeArg,

    /// What to do with a unit that cannot be balanced
    #[arg(long, value_enum, default_value_t = OnErrorArg::PassThrough)]
    pub on_error: OnErrorArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// "Alice" yes, "McDonald" / "ALICE" no
    TitleCase,
    /// Any token starting with an uppercase letter
    Capitalized,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Replace each sampled mention at its own position
    Span,
    /// Replace the first remaining occurrence of the sampled name
    FirstOccurrence,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnErrorArg {
    /// Keep the unit unchanged and continue
    PassThrough,
    /// Stop the whole run
    Abort,
}

impl From<PolicyArg> for PolicyKind {
    fn from(a: PolicyArg) -> Self {
        match a {
            PolicyArg::TitleCase   => PolicyKind::TitleCase,
            PolicyArg::Capitalized => PolicyKind::Capitalized,
        }
    }
}

impl From<ModeArg> for SubstitutionMode {
    fn from(a: ModeArg) -> Self {
        match a {
            ModeArg::Span            => SubstitutionMode::Span,
            ModeArg::FirstOccurrence => SubstitutionMode::FirstOccurrence,
        }
    }
}

impl From<OnErrorArg> for OnBalanceError {
    fn from(a: OnErrorArg) -> Self {
        match a {
            OnErrorArg::PassThrough => OnBalanceError::PassThrough,
            OnErrorArg::Abort       => OnBalanceError::Abort,
        }
    }
}

impl CommonArgs {
    /// Empty header lists mean "use the defaults"
    fn schema(&self) -> LexiconSchema {
        let defaults = LexiconSchema::default();
        LexiconSchema {
            name_headers: if self.name_headers.is_empty() {
                defaults.name_headers
            } else {
                self.name_headers.clone()
            },
            gender_headers: if self.gender_headers.is_empty() {
                defaults.gender_headers
            } else {
                self.gender_headers.clone()
            },
        }
    }

    fn into_config(self) -> BalanceConfig {
        BalanceConfig {
            schema:        self.schema(),
            lexicon_path:  self.lexicon,
            document_path: self.document,
            report_path:   self.report,
            stats_csv:     self.stats_csv,
            policy:        self.policy.into(),
            stoplist:      self.stoplist,
            ..BalanceConfig::default()
        }
    }
}

impl From<AnalyzeArgs> for BalanceConfig {
    fn from(a: AnalyzeArgs) -> Self {
        a.common.into_config()
    }
}

impl From<BalanceArgs> for BalanceConfig {
    fn from(a: BalanceArgs) -> Self {
        BalanceConfig {
            output_path: Some(a.output),
            seed:        a.seed,
            mode:        a.mode.into(),
            on_error:    a.on_error.into(),
            ..a.common.into_config()
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_balance_args_map_to_config() {
        let cli = Cli::try_parse_from([
            "name-balance", "balance",
            "--lexicon", "names.csv",
            "--document", "story.docx",
            "--output", "out.docx",
            "--seed", "5",
            "--mode", "first-occurrence",
            "--stopword", "May",
            "--name-header", "given",
        ])
        .unwrap();

        let Commands::Balance(args) = cli.command else {
            panic!("expected balance");
        };
        let cfg: BalanceConfig = args.into();

        assert_eq!(cfg.output_path.as_deref(), Some("out.docx"));
        assert_eq!(cfg.seed, Some(5));
        assert_eq!(cfg.mode, SubstitutionMode::FirstOccurrence);
        assert_eq!(cfg.stoplist, vec!["May".to_string()]);
        assert_eq!(cfg.schema.name_headers, vec!["given".to_string()]);
        assert_eq!(cfg.schema.gender_headers, LexiconSchema::default().gender_headers);
        assert_eq!(cfg.on_error, OnBalanceError::PassThrough);
    }

    #[test]
    fn test_analyze_needs_no_output() {
        let cli = Cli::try_parse_from([
            "name-balance", "analyze",
            "--lexicon", "names.csv",
            "--document", "story.txt",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_balance_requires_output() {
        let res = Cli::try_parse_from([
            "name-balance", "balance",
            "--lexicon", "names.csv",
            "--document", "story.txt",
        ]);
        assert!(res.is_err());
    }
}

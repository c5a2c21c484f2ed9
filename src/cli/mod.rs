// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates to the application layer.
//
// Two commands:
//   1. `analyze` — per-unit and total gender share of mentions
//   2. `balance` — same, plus rewrite and write the document
//
// This is the only layer that prints to stdout.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AnalyzeArgs, BalanceArgs, Commands};

use crate::application::balance_use_case::BalanceUseCase;
use crate::domain::report::RunReport;

#[derive(Parser, Debug)]
#[command(
    name = "name-balance",
    version,
    about = "Tally the gender of named mentions in a document and rebalance them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the right use case. Never computes anything itself.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => run_analyze(args),
            Commands::Balance(args) => run_balance(args),
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    tracing::info!("Analyzing '{}'", args.common.document);

    let report = BalanceUseCase::new(args.into()).execute(false)?;
    print_report(&report, false);
    Ok(())
}

fn run_balance(args: BalanceArgs) -> Result<()> {
    tracing::info!("Balancing '{}' into '{}'", args.common.document, args.output);

    let output = args.output.clone();
    let report = BalanceUseCase::new(args.into()).execute(true)?;
    print_report(&report, true);
    println!("\nBalanced document written to {}", output);
    Ok(())
}

fn print_report(report: &RunReport, rewritten: bool) {
    for unit in &report.units {
        if rewritten {
            println!(
                "Unit {:>4}: before {} | after {} | {} replaced",
                unit.index,
                unit.before_share(),
                unit.after_share(),
                unit.substitutions()
            );
        } else {
            println!("Unit {:>4}: {}", unit.index, unit.before_share());
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("Total before: {}", report.total_before.share());
    if rewritten {
        println!("Total after:  {}", report.total_after.share());
        println!("Names replaced: {}", report.total_substitutions());
    }
    if report.skipped_units > 0 {
        println!("Units skipped (no extractable text): {}", report.skipped_units);
    }
}

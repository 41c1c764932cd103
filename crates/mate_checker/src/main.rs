//! Mate Checker CLI
//!
//! Load a puzzle corpus, search every position for a forced mate and compare
//! the line found with the expected answer.

use anyhow::{Context, Result};
use clap::Parser;
use mate_checker::{output, Cli};
use mate_core::{Corpus, PuzzleVerifier};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // Logs go to stderr; stdout carries the puzzle output and summary.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.resolve().context("failed to load configuration")?;
    tracing::debug!(?config, "resolved configuration");

    let corpus = Corpus::load(&config.corpus)?;
    let mut verifier = PuzzleVerifier::new(config.mate_in, config.grading)?;

    let report = verifier.run_with(&corpus, |record| {
        if config.quiet {
            return;
        }
        if let Some(block) = output::record_block(record) {
            println!("{block}");
        }
    });
    output::print_summary(&report);

    if let Some(path) = &config.report {
        report
            .save(path)
            .with_context(|| format!("failed to save report to {}", path.display()))?;
    }
    Ok(())
}

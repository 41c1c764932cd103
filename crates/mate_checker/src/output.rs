//! Console output for a verification run.

use mate_core::{PuzzleRecord, PuzzleReport};

/// `<fen>\n<computed> ___ <expected>\n` for a puzzle whose mate was found.
///
/// Puzzles without a found mate (or with an unreadable FEN) produce nothing.
pub fn record_block(record: &PuzzleRecord) -> Option<String> {
    if !record.verdict.is_judged() {
        return None;
    }
    let computed = record.computed.as_deref()?;
    Some(format!("{}\n{} ___ {}\n", record.fen, computed, record.expected))
}

/// Print the run summary to stdout
pub fn print_summary(report: &PuzzleReport) {
    println!("{}", report.summary());
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod output_tests;

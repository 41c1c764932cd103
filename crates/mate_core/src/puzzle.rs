//! Puzzle corpus loading, grading and reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{CorpusError, ReportError, SearchError};
use crate::notation::{format_line, tokens};
use crate::position::Position;
use crate::search::{plies_for_mate, MateSearcher};

/// A starting position and the solution line recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleEntry {
    pub fen: String,
    /// Numbered move-pair line as stored in the corpus, e.g. `"1. Qh8+ Kxh8 2. Rh1#"`
    pub expected: String,
}

impl PuzzleEntry {
    pub fn new(fen: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            fen: fen.into(),
            expected: expected.into(),
        }
    }

    /// The expected answer in formatter output form (trailing separator added).
    pub fn expected_line(&self) -> String {
        format!("{} ", self.expected)
    }
}

/// Puzzles keyed by FEN, iterated in sorted FEN order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<PuzzleEntry>,
}

impl Corpus {
    /// Load a JSON object mapping FEN strings to expected solution strings.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|source| CorpusError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(map
            .into_iter()
            .map(|(fen, expected)| PuzzleEntry { fen, expected })
            .collect())
    }

    pub fn entries(&self) -> &[PuzzleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PuzzleEntry> for Corpus {
    fn from_iter<I: IntoIterator<Item = PuzzleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// How a computed line is compared with the expected one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingMode {
    /// Byte-for-byte equality, trailing separator included
    #[default]
    Exact,
    /// Equality of whitespace-separated tokens
    Tokens,
}

impl GradingMode {
    pub fn matches(self, computed: &str, expected: &str) -> bool {
        match self {
            GradingMode::Exact => computed == expected,
            GradingMode::Tokens => tokens(computed) == tokens(expected),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// A mate was found and its line matches the expected answer
    Solved,
    /// A mate was found but its line differs from the expected answer
    Mismatch,
    /// No forced mate within the requested distance
    NoMateFound,
    /// The FEN could not be set up
    InvalidPosition,
}

impl Verdict {
    /// Whether a forced mate was found, i.e. the puzzle is printed and judged.
    pub fn is_judged(self) -> bool {
        matches!(self, Verdict::Solved | Verdict::Mismatch)
    }
}

/// Result of checking one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub fen: String,
    pub verdict: Verdict,
    /// Formatted line found by the search, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<String>,
    pub expected: String,
    pub nodes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate results of one verification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleReport {
    pub mate_in: u8,
    pub grading: GradingMode,
    pub solved: usize,
    pub total: usize,
    pub mismatched: usize,
    pub no_mate: usize,
    pub invalid: usize,
    pub elapsed_ms: u64,
    pub records: Vec<PuzzleRecord>,
}

impl PuzzleReport {
    fn new(mate_in: u8, grading: GradingMode, total: usize) -> Self {
        Self {
            mate_in,
            grading,
            solved: 0,
            total,
            mismatched: 0,
            no_mate: 0,
            invalid: 0,
            elapsed_ms: 0,
            records: Vec::with_capacity(total),
        }
    }

    fn add(&mut self, record: PuzzleRecord) {
        match record.verdict {
            Verdict::Solved => self.solved += 1,
            Verdict::Mismatch => self.mismatched += 1,
            Verdict::NoMateFound => self.no_mate += 1,
            Verdict::InvalidPosition => self.invalid += 1,
        }
        self.records.push(record);
    }

    /// Solved share of the whole corpus, in percent.
    pub fn solve_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.solved as f64 / self.total as f64
    }

    /// `Solved: s/k (p%)` and `Time: Xms` lines.
    pub fn summary(&self) -> String {
        format!(
            "Solved: {}/{} ({:.1}%)\nTime: {}ms",
            self.solved,
            self.total,
            self.solve_rate(),
            self.elapsed_ms
        )
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Runs the mate search on puzzle entries and grades the lines it finds.
#[derive(Debug)]
pub struct PuzzleVerifier {
    mate_in: u8,
    depth: u8,
    grading: GradingMode,
    searcher: MateSearcher,
}

impl PuzzleVerifier {
    pub fn new(mate_in: u8, grading: GradingMode) -> Result<Self, SearchError> {
        Ok(Self {
            mate_in,
            depth: plies_for_mate(mate_in)?,
            grading,
            searcher: MateSearcher::new(),
        })
    }

    pub fn mate_in(&self) -> u8 {
        self.mate_in
    }

    /// Check a single puzzle.
    pub fn check(&mut self, entry: &PuzzleEntry) -> PuzzleRecord {
        let expected = entry.expected_line();
        let mut pos = match Position::from_fen(&entry.fen) {
            Ok(pos) => pos,
            Err(e) => {
                warn!(fen = %entry.fen, error = %e, "skipping puzzle with invalid position");
                return PuzzleRecord {
                    fen: entry.fen.clone(),
                    verdict: Verdict::InvalidPosition,
                    computed: None,
                    expected,
                    nodes: 0,
                    error: Some(e.to_string()),
                };
            }
        };

        let line = self.searcher.search_root(&mut pos, self.depth);
        let nodes = self.searcher.nodes();
        if !line.is_mate() {
            info!(
                fen = %entry.fen,
                mate_in = self.mate_in,
                "no forced mate found at the claimed distance"
            );
            return PuzzleRecord {
                fen: entry.fen.clone(),
                verdict: Verdict::NoMateFound,
                computed: None,
                expected,
                nodes,
                error: None,
            };
        }

        let computed = format_line(&line.moves, 1);
        let verdict = if self.grading.matches(&computed, &expected) {
            Verdict::Solved
        } else {
            Verdict::Mismatch
        };
        PuzzleRecord {
            fen: entry.fen.clone(),
            verdict,
            computed: Some(computed),
            expected,
            nodes,
            error: None,
        }
    }

    /// Check every puzzle in order, handing each record to `on_record` as it
    /// completes.
    pub fn run_with<F>(&mut self, corpus: &Corpus, mut on_record: F) -> PuzzleReport
    where
        F: FnMut(&PuzzleRecord),
    {
        info!(
            puzzles = corpus.len(),
            mate_in = self.mate_in,
            grading = ?self.grading,
            "verifying corpus"
        );
        let start = Instant::now();
        let mut report = PuzzleReport::new(self.mate_in, self.grading, corpus.len());

        for entry in corpus.entries() {
            let record = self.check(entry);
            on_record(&record);
            report.add(record);
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            solved = report.solved,
            total = report.total,
            mismatched = report.mismatched,
            no_mate = report.no_mate,
            invalid = report.invalid,
            elapsed_ms = report.elapsed_ms,
            "corpus verified"
        );
        report
    }

    pub fn run(&mut self, corpus: &Corpus) -> PuzzleReport {
        self.run_with(corpus, |_| {})
    }
}

#[cfg(test)]
#[path = "puzzle_tests.rs"]
mod puzzle_tests;

//! Run settings: built-in defaults, optional TOML file, command-line overrides.

use clap::Parser;
use mate_core::GradingMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CORPUS: &str = "mate_in_4.json";
pub const DEFAULT_MATE_IN: u8 = 4;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Checker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// JSON object mapping FEN to expected solution
    pub corpus: PathBuf,
    /// Mate distance in full moves
    pub mate_in: u8,
    pub grading: GradingMode,
    /// Where to write the JSON report, if anywhere
    pub report: Option<PathBuf>,
    /// Suppress per-puzzle output
    pub quiet: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from(DEFAULT_CORPUS),
            mate_in: DEFAULT_MATE_IN,
            grading: GradingMode::Exact,
            report: None,
            quiet: false,
        }
    }
}

impl CheckerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Check mate-in-N puzzles: search each position for a forced mate and grade the line"
)]
pub struct Cli {
    /// Puzzle corpus [default: mate_in_4.json]
    pub corpus: Option<PathBuf>,

    /// Mate distance in full moves [default: 4]
    #[arg(short = 'n', long)]
    pub mate_in: Option<u8>,

    /// TOML file with any of: corpus, mate_in, grading, report, quiet
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Compare lines token by token instead of byte for byte
    #[arg(long)]
    pub lenient: bool,

    /// Write a JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Load the config file if one was given, then apply command-line overrides.
    pub fn resolve(&self) -> Result<CheckerConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => CheckerConfig::load(path)?,
            None => CheckerConfig::default(),
        };
        Ok(self.apply(base))
    }

    pub fn apply(&self, mut config: CheckerConfig) -> CheckerConfig {
        if let Some(corpus) = &self.corpus {
            config.corpus = corpus.clone();
        }
        if let Some(mate_in) = self.mate_in {
            config.mate_in = mate_in;
        }
        if self.lenient {
            config.grading = GradingMode::Tokens;
        }
        if let Some(report) = &self.report {
            config.report = Some(report.clone());
        }
        config.quiet |= self.quiet;
        config
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

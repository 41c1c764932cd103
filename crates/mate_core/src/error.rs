//! Error types for puzzle loading, position setup and search.

use std::path::PathBuf;

/// A FEN string that the move generator refused.
#[derive(thiserror::Error, Debug)]
pub enum PositionError {
    #[error("invalid FEN `{fen}`: {source}")]
    InvalidFen {
        fen: String,
        #[source]
        source: cozy_chess::FenParseError,
    },
}

/// The puzzle corpus could not be read or decoded.
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    #[error("failed to read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON object of FEN -> solution strings
    #[error("failed to parse corpus {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Invalid arguments to the mate search.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Mate distance must be at least one move and fit the ply counter
    #[error("invalid mate distance {0}: expected 1..={max}", max = crate::search::MAX_MATE_IN)]
    InvalidMateDistance(u8),
}

/// Writing a puzzle report to disk failed.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

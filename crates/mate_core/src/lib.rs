//! Mate-in-N puzzle checking.
//!
//! - [`position`]: board state with scoped apply/undo and game-over detection
//! - [`search`]: exhaustive forced-mate search
//! - [`notation`]: numbered move-pair formatting
//! - [`puzzle`]: corpus loading, grading and reports
//!
//! Move generation and FEN parsing come from `cozy-chess`.

pub mod error;
pub mod notation;
pub mod position;
pub mod puzzle;
pub mod san;
pub mod search;

pub use error::{CorpusError, PositionError, ReportError, SearchError};
pub use notation::{format_line, format_move_text};
pub use position::{GameState, Played, Position};
pub use puzzle::{Corpus, GradingMode, PuzzleEntry, PuzzleRecord, PuzzleReport, PuzzleVerifier, Verdict};
pub use san::move_to_san;
pub use search::{find_mate, plies_for_mate, search, MateLine, MateSearcher, Outcome, MAX_MATE_IN};

/// Re-exported so callers can name moves without depending on cozy-chess directly.
pub use cozy_chess::Move;

//! Forced-mate search.
//!
//! An exhaustive depth-first walk over legal moves that only asks one
//! question: can the attacker force checkmate before the ply budget runs out?
//! There is no evaluation. The attacker's node succeeds on the first move
//! whose reply node is forced; the defender's node fails on the first reply
//! that escapes. Which line is reported when several mates exist is decided by
//! move generation order, not by length or quality.

use tracing::debug;

use crate::error::SearchError;
use crate::position::{GameState, Position};

/// Largest mate distance whose ply budget (`2 * n - 1`) fits the depth counter.
pub const MAX_MATE_IN: u8 = 127;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    ForcedMate,
    NoForcedMate,
}

/// Outcome of a mate search plus one principal line in SAN.
///
/// `moves` is empty unless `outcome` is [`Outcome::ForcedMate`]. Index 0 is
/// the first move of the side to move at the root; sides alternate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MateLine {
    pub outcome: Outcome,
    pub moves: Vec<String>,
}

impl MateLine {
    fn mate(moves: Vec<String>) -> Self {
        Self {
            outcome: Outcome::ForcedMate,
            moves,
        }
    }

    fn no_mate() -> Self {
        Self {
            outcome: Outcome::NoForcedMate,
            moves: Vec::new(),
        }
    }

    fn prepend(mut self, san: String) -> Self {
        self.moves.insert(0, san);
        self
    }

    pub fn is_mate(&self) -> bool {
        self.outcome == Outcome::ForcedMate
    }
}

/// Ply budget for a mate in `mate_in` moves: the attacker's moves plus the
/// defender's replies in between.
pub fn plies_for_mate(mate_in: u8) -> Result<u8, SearchError> {
    if mate_in == 0 || mate_in > MAX_MATE_IN {
        return Err(SearchError::InvalidMateDistance(mate_in));
    }
    Ok(mate_in * 2 - 1)
}

#[derive(Debug, Default)]
pub struct MateSearcher {
    nodes: u64,
}

impl MateSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the last root search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Look for a forced mate in `mate_in` moves for the side to move.
    pub fn find_mate(&mut self, pos: &mut Position, mate_in: u8) -> Result<MateLine, SearchError> {
        let depth = plies_for_mate(mate_in)?;
        Ok(self.search_root(pos, depth))
    }

    /// Fresh search of `depth` plies with the side to move attacking.
    pub fn search_root(&mut self, pos: &mut Position, depth: u8) -> MateLine {
        self.nodes = 0;
        let line = self.search(pos, depth, true);
        debug!(
            fen = %pos,
            depth,
            nodes = self.nodes,
            found = line.is_mate(),
            "mate search finished"
        );
        line
    }

    /// Search `depth` plies from `pos`.
    ///
    /// `attacker_to_move` says whether the side to move is the one trying to
    /// deliver mate. `pos` is played on in place and is back in its entry
    /// state when this returns.
    pub fn search(&mut self, pos: &mut Position, depth: u8, attacker_to_move: bool) -> MateLine {
        self.nodes += 1;

        match pos.state() {
            // Whoever just moved delivered mate.
            GameState::Checkmate if attacker_to_move => return MateLine::no_mate(),
            GameState::Checkmate => return MateLine::mate(Vec::new()),
            state if state.is_over() => return MateLine::no_mate(),
            _ => {}
        }
        if depth == 0 {
            return MateLine::no_mate();
        }

        let moves = pos.legal_moves();
        if attacker_to_move {
            for mv in moves {
                let reply = {
                    let mut child = pos.play(mv);
                    self.search(&mut child, depth - 1, false)
                };
                if reply.is_mate() {
                    return reply.prepend(pos.san(mv));
                }
            }
            MateLine::no_mate()
        } else {
            let mut exemplar = None;
            for mv in moves {
                let reply = {
                    let mut child = pos.play(mv);
                    self.search(&mut child, depth - 1, true)
                };
                if !reply.is_mate() {
                    return MateLine::no_mate();
                }
                exemplar = Some((mv, reply));
            }
            match exemplar {
                Some((mv, reply)) => reply.prepend(pos.san(mv)),
                // No legal reply is checkmate or stalemate, both handled above
                None => MateLine::no_mate(),
            }
        }
    }
}

/// One-shot [`MateSearcher::search`].
pub fn search(pos: &mut Position, depth: u8, attacker_to_move: bool) -> MateLine {
    MateSearcher::new().search(pos, depth, attacker_to_move)
}

/// One-shot [`MateSearcher::find_mate`].
pub fn find_mate(pos: &mut Position, mate_in: u8) -> Result<MateLine, SearchError> {
    MateSearcher::new().find_mate(pos, mate_in)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;

//! Board state owned by a single search.
//!
//! Wraps a `cozy_chess::Board` and adds what the mate search needs on top of
//! plain move generation: in-place apply/undo through a scoped guard, a
//! position-hash history for repetition detection, and game-over
//! classification.

use std::fmt;
use std::ops::{Deref, DerefMut};

use cozy_chess::{Board, Color, Move, Piece, Square};

use crate::error::PositionError;
use crate::san;

/// Why the game has (or has not) ended in the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    /// Side to move is in check with no legal reply
    Checkmate,
    /// Side to move has no legal move but is not in check
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    /// The current position occurred for the third time
    Repetition,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::Ongoing
    }

    pub fn is_draw(self) -> bool {
        !matches!(self, GameState::Ongoing | GameState::Checkmate)
    }
}

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    undo: Vec<Board>,
    /// Hash of every position since setup, current one last
    history: Vec<u64>,
}

impl Position {
    fn from_board(board: Board) -> Self {
        let history = vec![board.hash()];
        Self {
            board,
            undo: Vec::new(),
            history,
        }
    }

    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    /// Parse a FEN string. Missing halfmove/fullmove counters default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let mut padded = fields.join(" ");
        if fields.len() == 4 {
            padded.push_str(" 0 1");
        } else if fields.len() == 5 {
            padded.push_str(" 1");
        }

        let board = Board::from_fen(&padded, false).map_err(|source| PositionError::InvalidFen {
            fen: fen.to_string(),
            source,
        })?;
        Ok(Self::from_board(board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// Number of plies played on top of the setup position.
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// Legal moves in generator order (grouped by piece, then destination).
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn has_legal_move(&self) -> bool {
        self.board.generate_moves(|piece_moves| !piece_moves.is_empty())
    }

    pub fn state(&self) -> GameState {
        if !self.has_legal_move() {
            return if self.in_check() {
                GameState::Checkmate
            } else {
                GameState::Stalemate
            };
        }
        if self.board.halfmove_clock() >= 100 {
            return GameState::FiftyMoveRule;
        }
        if self.is_insufficient_material() {
            return GameState::InsufficientMaterial;
        }
        if self.is_threefold_repetition() {
            return GameState::Repetition;
        }
        GameState::Ongoing
    }

    /// K vs K, K+minor vs K, or K+B vs K+B with both bishops on the same colour.
    pub fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let minors = board.pieces(Piece::Knight) | board.pieces(Piece::Bishop);
        match board.occupied().len() {
            2 => true,
            3 => !minors.is_empty(),
            4 => {
                let white = board.colored_pieces(Color::White, Piece::Bishop);
                let black = board.colored_pieces(Color::Black, Piece::Bishop);
                match (white.into_iter().next(), black.into_iter().next()) {
                    (Some(w), Some(b)) if white.len() == 1 && black.len() == 1 => {
                        square_shade(w) == square_shade(b)
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|&&key| key == current).count() >= 3
    }

    /// Short algebraic notation for `mv`, which must be legal here.
    pub fn san(&self, mv: Move) -> String {
        san::move_to_san(&self.board, mv)
    }

    /// Play a legal move in place. The move is taken back when the returned
    /// guard is dropped, on every exit path.
    pub fn play(&mut self, mv: Move) -> Played<'_> {
        debug_assert!(self.board.is_legal(mv), "illegal move {mv} in {self}");
        self.undo.push(self.board.clone());
        self.board.play_unchecked(mv);
        self.history.push(self.board.hash());
        Played { pos: self }
    }

    fn unplay(&mut self) {
        if let Some(prev) = self.undo.pop() {
            self.board = prev;
            self.history.pop();
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// A move played on a [`Position`]; dropping it undoes the move.
pub struct Played<'a> {
    pos: &'a mut Position,
}

impl Deref for Played<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.pos
    }
}

impl DerefMut for Played<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        &mut *self.pos
    }
}

impl Drop for Played<'_> {
    fn drop(&mut self) {
        self.pos.unplay();
    }
}

// 0 = dark (a1), 1 = light
fn square_shade(sq: Square) -> usize {
    (sq.file() as usize + sq.rank() as usize) % 2
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;

//! Standard algebraic notation (SAN) rendering.

use cozy_chess::{Board, GameStatus, Move, Piece, Square};

pub fn piece_letter(piece: Piece) -> Option<char> {
    match piece {
        Piece::Pawn => None,
        Piece::Knight => Some('N'),
        Piece::Bishop => Some('B'),
        Piece::Rook => Some('R'),
        Piece::Queen => Some('Q'),
        Piece::King => Some('K'),
    }
}

pub fn square_name(sq: Square) -> String {
    let f = (b'a' + sq.file() as u8) as char;
    let r = (b'1' + sq.rank() as u8) as char;
    format!("{f}{r}")
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}

/// Render a legal move as SAN relative to `board`, including `+`/`#`.
///
/// Castling is expected in cozy-chess's king-takes-rook encoding.
pub fn move_to_san(board: &Board, mv: Move) -> String {
    let mut san = String::with_capacity(8);
    let Some(piece) = board.piece_on(mv.from) else {
        // Not a move from this position; fall back to coordinates.
        return mv.to_string();
    };
    let us = board.side_to_move();

    if piece == Piece::King && board.color_on(mv.to) == Some(us) {
        if (mv.to.file() as u8) > (mv.from.file() as u8) {
            san.push_str("O-O");
        } else {
            san.push_str("O-O-O");
        }
    } else if piece == Piece::Pawn {
        let captures = mv.from.file() != mv.to.file();
        if captures {
            san.push(file_char(mv.from));
            san.push('x');
        }
        san.push_str(&square_name(mv.to));
        if let Some(promo) = mv.promotion {
            san.push('=');
            san.extend(piece_letter(promo));
        }
    } else {
        san.extend(piece_letter(piece));
        san.push_str(&disambiguation(board, piece, mv));
        if board.color_on(mv.to).is_some() {
            san.push('x');
        }
        san.push_str(&square_name(mv.to));
    }

    let mut after = board.clone();
    after.play_unchecked(mv);
    if matches!(after.status(), GameStatus::Won) {
        san.push('#');
    } else if !after.checkers().is_empty() {
        san.push('+');
    }
    san
}

/// File, rank, or full square needed to tell `mv` apart from other moves of
/// the same piece type landing on the same square.
fn disambiguation(board: &Board, piece: Piece, mv: Move) -> String {
    let mut rivals = Vec::new();
    board.generate_moves(|piece_moves| {
        if piece_moves.piece == piece && piece_moves.from != mv.from && piece_moves.to.has(mv.to)
        {
            rivals.push(piece_moves.from);
        }
        false
    });

    if rivals.is_empty() {
        return String::new();
    }
    let same_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
    let same_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());
    match (same_file, same_rank) {
        (false, _) => file_char(mv.from).to_string(),
        (true, false) => rank_char(mv.from).to_string(),
        (true, true) => square_name(mv.from),
    }
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;

//! Move-pair notation for printed lines.
//!
//! `["Qh8+", "Kxh8", "Rh1#"]` becomes `"1. Qh8+ Kxh8 2. Rh1# "`. This is text
//! layout only; tokens are not checked against any position.

use std::fmt::Write;

/// Render moves as numbered pairs, each token followed by one space.
pub fn format_line<S: AsRef<str>>(moves: &[S], start_move_number: u32) -> String {
    let mut out = String::new();
    let mut move_number = start_move_number;

    for (i, mv) in moves.iter().enumerate() {
        if i % 2 == 0 {
            let _ = write!(out, "{move_number}. ");
        }
        out.push_str(mv.as_ref());
        out.push(' ');
        if i % 2 == 1 {
            move_number += 1;
        }
    }
    out
}

/// Split a whitespace-separated move list into tokens.
pub fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// [`format_line`] over a whitespace-separated move list.
pub fn format_move_text(text: &str, start_move_number: u32) -> String {
    format_line(&tokens(text), start_move_number)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;

//! Square conversions for long algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices for the FEN and move-text components.

use crate::chess_errors::{SquareParseError, SquareParseResult};
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

/// Convert long algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> SquareParseResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(SquareParseError::BadLength(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(SquareParseError::BadFile(file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(SquareParseError::BadRank(rank as char));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Convert a square index (`0..=63`) to long algebraic notation (for example: "e4").
#[inline]
pub fn square_name(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

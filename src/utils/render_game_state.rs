//! Terminal-oriented board renderer.
//!
//! Creates a human-readable board view for the perft CLI and for test
//! diagnostics. Pieces use their FEN letters so the output stays ASCII.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::fen_generator::piece_to_fen_char;

/// Render the board to a string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match game_state.piece_at(square_at(file, rank)) {
                Some(piece) => out.push(piece_to_fen_char(piece)),
                None => out.push('.'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

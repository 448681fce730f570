//! GameState-to-FEN writer, the inverse of `fen_parser`.

use std::fmt::Write;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_name;

const CASTLING_SYMBOLS: [(CastlingRights, char); 4] = [
    (CASTLE_LIGHT_KINGSIDE, 'K'),
    (CASTLE_LIGHT_QUEENSIDE, 'Q'),
    (CASTLE_DARK_KINGSIDE, 'k'),
    (CASTLE_DARK_QUEENSIDE, 'q'),
];

pub fn generate_fen(game_state: &GameState) -> String {
    let mut fen = String::with_capacity(90);

    write_placement(&mut fen, game_state);

    fen.push(' ');
    fen.push(match game_state.side_to_move {
        Color::Light => 'w',
        Color::Dark => 'b',
    });

    fen.push(' ');
    let before = fen.len();
    for (right, symbol) in CASTLING_SYMBOLS {
        if game_state.castling_rights & right != 0 {
            fen.push(symbol);
        }
    }
    if fen.len() == before {
        fen.push('-');
    }

    fen.push(' ');
    match game_state.en_passant_square {
        Some(square) => fen.push_str(&square_name(square)),
        None => fen.push('-'),
    }

    // Writing into a String cannot fail.
    let _ = write!(
        fen,
        " {} {}",
        game_state.halfmove_clock, game_state.fullmove_number
    );

    fen
}

fn write_placement(fen: &mut String, game_state: &GameState) {
    for rank in (0..8u8).rev() {
        let mut gap = 0u8;

        for file in 0..8u8 {
            let Some(piece) = game_state.piece_at(square_at(file, rank)) else {
                gap += 1;
                continue;
            };
            if gap > 0 {
                fen.push(char::from(b'0' + gap));
                gap = 0;
            }
            fen.push(piece_to_fen_char(piece));
        }

        if gap > 0 {
            fen.push(char::from(b'0' + gap));
        }
        if rank > 0 {
            fen.push('/');
        }
    }
}

pub(crate) fn piece_to_fen_char(piece: Piece) -> char {
    let letter = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    if piece.color == Color::Light {
        letter.to_ascii_uppercase()
    } else {
        letter
    }
}

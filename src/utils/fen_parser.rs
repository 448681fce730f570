//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation string,
//! including the mailbox, piece bitboards, rights, clocks, and occupancies.
//! An empty rank segment (as in `.../8/ b - e3 0 1`) reads as eight empty squares.

use crate::chess_errors::{FenError, FenResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> FenResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    game_state.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> FenResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        if rank_str.is_empty() {
            continue;
        }

        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::EmptyCount(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
            if file >= 8 {
                return Err(FenError::FileCount {
                    rank: board_rank + 1,
                    files: file + 1,
                });
            }

            game_state.put_piece(square_at(file as u8, board_rank as u8), piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::FileCount {
                rank: board_rank + 1,
                files: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> FenResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> FenResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::CastlingChar(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> FenResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

fn parse_counter(field: &'static str, value: &str) -> FenResult<u16> {
    value.parse::<u16>().map_err(|_| FenError::Counter {
        field,
        value: value.to_owned(),
    })
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

use crate::chess_errors::{MoveApplyError, MoveApplyResult};
use crate::game_state::chess_rules::{castles_for, castling_right_for_rook_square};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::leaf_emitter::pawn_push_direction;
use crate::moves::move_descriptions::{Move, MoveFlag};

/// Play `mv` on a copy of `game_state`.
///
/// The move is trusted to be legal; only structural problems (no piece to
/// move, wrong color, an en-passant move with nothing to take, a terminal
/// marker) are reported.
pub fn apply_move(game_state: &GameState, mv: Move) -> MoveApplyResult<GameState> {
    if mv.is_terminal() {
        return Err(MoveApplyError::TerminalMarker(mv));
    }

    let from = mv.start();
    let to = mv.target();
    let flag = mv.flag();

    let moving_color = game_state.side_to_move;
    let mut next = game_state.clone();

    let moved_piece = next
        .remove_piece(from)
        .ok_or(MoveApplyError::EmptyOrigin(from))?;
    if moved_piece.color != moving_color {
        return Err(MoveApplyError::WrongColor(from));
    }

    // Handle captures.
    let mut captured = next.remove_piece(to);
    if flag == MoveFlag::EnPassant {
        let enemy_pawn = Piece::new(moving_color.opposite(), PieceKind::Pawn);
        let victim_square = pawn_push_direction(enemy_pawn.color)
            .step(to)
            .filter(|&square| next.piece_at(square) == Some(enemy_pawn))
            .ok_or(MoveApplyError::NoEnPassantVictim(mv))?;
        captured = next.remove_piece(victim_square);
    }

    // Place moved/promoted piece on destination.
    let placed = match flag.promotion_piece() {
        Some(kind) => Piece::new(moving_color, kind),
        None => moved_piece,
    };
    next.put_piece(to, placed);

    // Castling rook move.
    if flag.is_castle() {
        if let Some(castle) = castles_for(moving_color)
            .into_iter()
            .find(|castle| castle.king_from == from && castle.king_to == to)
        {
            if let Some(rook) = next.remove_piece(castle.rook_from) {
                next.put_piece(castle.rook_to, rook);
            }
        }
    }

    // Update castling rights.
    if moved_piece.kind == PieceKind::King {
        for castle in castles_for(moving_color) {
            next.castling_rights &= !castle.right;
        }
    }
    next.castling_rights &= !(castling_right_for_rook_square(from) | castling_right_for_rook_square(to));

    // Update en-passant square.
    next.en_passant_square = if flag == MoveFlag::DoublePawnPush {
        Some((from + to) / 2)
    } else {
        None
    };

    // Update clocks.
    if moved_piece.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moving_color.opposite();

    Ok(next)
}

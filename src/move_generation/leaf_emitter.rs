//! Final-stage move emission.
//!
//! Every non-king destination set is narrowed by the piece's pin mask and the
//! check-resolving mask before it becomes moves. King steps are checked
//! against the attack map instead. Castling and en passant carry their own
//! extra conditions.

use crate::game_state::chess_rules::castles_for;
use crate::game_state::chess_types::{rank_of, square_bit, Color, Piece, PieceKind, Square};
use crate::move_generation::legal_move_generator::GenerationContext;
use crate::move_generation::ray_scanner::{scan, Direction};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::{Move, MoveFlag, MoveList};
use crate::moves::pawn_moves::pawn_attacks;

/// Direction a pawn of `color` pushes in.
#[inline]
pub const fn pawn_push_direction(color: Color) -> Direction {
    match color {
        Color::Light => Direction::North,
        Color::Dark => Direction::South,
    }
}

/// King steps onto squares that are neither friendly nor attacked.
pub fn emit_king_moves(ctx: &GenerationContext<'_>, out: &mut MoveList) {
    let king = ctx.attacks.king_square;
    let targets = king_attacks(king) & !ctx.own() & !ctx.attacks.attacked;
    push_targets(out, king, targets);
}

/// Castles whose right bit is set, with the rook at home, the gap empty, and
/// the king's path unattacked. Never while in check.
pub fn emit_castles(ctx: &GenerationContext<'_>, out: &mut MoveList) {
    if ctx.check.in_check {
        return;
    }

    let position = ctx.position;
    for castle in castles_for(ctx.us) {
        if (position.castling_rights & castle.right) == 0 || ctx.attacks.king_square != castle.king_from {
            continue;
        }
        if position.piece_at(castle.rook_from) != Some(Piece::new(ctx.us, PieceKind::Rook)) {
            continue;
        }
        if (position.occupied() & castle.empty_mask) != 0
            || (ctx.attacks.attacked & castle.king_transit_mask) != 0
        {
            continue;
        }

        let flag = if castle.king_to > castle.king_from {
            MoveFlag::KingSideCastle
        } else {
            MoveFlag::QueenSideCastle
        };
        out.push(Move::new(castle.king_from, castle.king_to, flag));
    }
}

/// Moves of every friendly piece other than the king.
pub fn emit_piece_moves(ctx: &GenerationContext<'_>, out: &mut MoveList) {
    let own = ctx.own();
    let occupied = ctx.position.occupied();
    let mut remaining = own & !square_bit(ctx.attacks.king_square);

    while remaining != 0 {
        let from = remaining.trailing_zeros() as Square;
        remaining &= remaining - 1;

        let Some(piece) = ctx.position.piece_at(from) else {
            continue;
        };
        let filter = ctx.legal_filter(from);

        match piece.kind {
            PieceKind::Pawn => emit_pawn_moves(ctx, from, out),
            PieceKind::Knight => push_targets(out, from, knight_attacks(from) & !own & filter),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let reach = ctx.sliders.destinations(piece.kind, from, occupied, own);
                push_targets(out, from, reach & filter);
            }
            PieceKind::King => {}
        }
    }
}

fn emit_pawn_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut MoveList) {
    let us = ctx.us;
    let forward = pawn_push_direction(us);
    let filter = ctx.legal_filter(from);
    let occupied = ctx.position.occupied();

    let mut targets = pawn_attacks(us, from) & ctx.enemy();
    let mut double_push = None;

    if let Some(single) = forward.step(from) {
        if (occupied & square_bit(single)) == 0 {
            targets |= square_bit(single);

            if rank_of(from) == us.pawn_start_rank() {
                double_push = forward
                    .step(single)
                    .filter(|&double| (occupied & square_bit(double)) == 0);
            }
        }
    }

    push_pawn_targets(out, from, targets & filter, us.promotion_rank());

    if let Some(double) = double_push {
        if (filter & square_bit(double)) != 0 {
            out.push(Move::new(from, double, MoveFlag::DoublePawnPush));
        }
    }

    emit_en_passant(ctx, from, out);
}

fn emit_en_passant(ctx: &GenerationContext<'_>, from: Square, out: &mut MoveList) {
    let position = ctx.position;
    let Some(ep) = position.en_passant_square else {
        return;
    };
    let ep_bit = square_bit(ep);

    if (pawn_attacks(ctx.us, from) & ep_bit) == 0 || !position.is_empty(ep) {
        return;
    }
    let Some(captured) = pawn_push_direction(ctx.them).step(ep) else {
        return;
    };
    if position.piece_at(captured) != Some(Piece::new(ctx.them, PieceKind::Pawn)) {
        return;
    }

    if (ctx.pins.mask(from) & ep_bit) == 0 {
        return;
    }
    // Resolves a check by taking the checking pawn or by landing on the line.
    if (ctx.check.resolving_mask & (ep_bit | square_bit(captured))) == 0 {
        return;
    }
    if en_passant_exposes_king(ctx, from, captured) {
        return;
    }

    out.push(Move::new(from, ep, MoveFlag::EnPassant));
}

/// Both pawns leave the capturer's rank at once. When the king shares that
/// rank, the pair may have been the only cover against a rook or queen.
fn en_passant_exposes_king(ctx: &GenerationContext<'_>, from: Square, captured: Square) -> bool {
    let king = ctx.attacks.king_square;
    if rank_of(king) != rank_of(from) {
        return false;
    }

    let away = if captured > from {
        Direction::East
    } else {
        Direction::West
    };
    let beyond_captured = scan(ctx.position, captured, away, None).last().copied();
    let beyond_capturer = scan(ctx.position, from, away.opposite(), None).last().copied();

    let is_king = |end: Option<Square>| end == Some(king);
    let is_rank_attacker = |end: Option<Square>| {
        matches!(
            end.and_then(|sq| ctx.position.piece_at(sq)),
            Some(piece) if piece.color == ctx.them && piece.kind.moves_straight()
        )
    };

    (is_king(beyond_captured) && is_rank_attacker(beyond_capturer))
        || (is_king(beyond_capturer) && is_rank_attacker(beyond_captured))
}

fn push_targets(out: &mut MoveList, from: Square, mut targets: u64) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;
        out.push(Move::new(from, to, MoveFlag::None));
    }
}

/// Like `push_targets`, but a landing on the last rank becomes four
/// promotions.
fn push_pawn_targets(out: &mut MoveList, from: Square, mut targets: u64, promotion_rank: u8) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;

        if rank_of(to) == promotion_rank {
            for flag in MoveFlag::PROMOTIONS {
                out.push(Move::new(from, to, flag));
            }
        } else {
            out.push(Move::new(from, to, MoveFlag::None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::magic::magic_bitboard::MagicTables;
    use crate::move_generation::pin_solver::PinTable;

    fn context(game_state: &GameState) -> GenerationContext<'_> {
        let mut ctx = GenerationContext::new(game_state, MagicTables::shared());
        ctx.pins = PinTable::solve(game_state, ctx.attacks.king_square, ctx.us);
        ctx
    }

    #[test]
    fn king_avoids_attacked_and_friendly_squares() {
        let game_state =
            GameState::from_fen("4k3/8/8/8/8/8/3P4/r3K3 w - - 0 1").expect("FEN should parse");
        let ctx = context(&game_state);
        let mut out = MoveList::new();

        emit_king_moves(&ctx, &mut out);

        // d1 and f1 sit on the rook's rank, d2 is our pawn.
        let targets: Vec<Square> = out.iter().map(|mv| mv.target()).collect();
        assert_eq!(targets, vec![12, 13]);
    }

    #[test]
    fn castling_needs_empty_gap_and_safe_transit() {
        let game_state =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let ctx = context(&game_state);
        let mut out = MoveList::new();
        emit_castles(&ctx, &mut out);
        assert_eq!(out.len(), 2);

        // A rook eyeing d1 stops the long castle only.
        let guarded =
            GameState::from_fen("3rk3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let ctx = context(&guarded);
        let mut out = MoveList::new();
        emit_castles(&ctx, &mut out);
        assert_eq!(out.as_slice(), &[Move::new(4, 6, MoveFlag::KingSideCastle)]);

        // An attacked b1 does not matter: only the king's path is checked.
        let rook_path =
            GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        let ctx = context(&rook_path);
        let mut out = MoveList::new();
        emit_castles(&ctx, &mut out);
        assert_eq!(out.as_slice(), &[Move::new(4, 2, MoveFlag::QueenSideCastle)]);
    }

    #[test]
    fn promotions_expand_in_fixed_order() {
        let game_state =
            GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let ctx = context(&game_state);
        let mut out = MoveList::new();
        emit_piece_moves(&ctx, &mut out);

        let flags: Vec<MoveFlag> = out.iter().map(|mv| mv.flag()).collect();
        assert_eq!(flags, MoveFlag::PROMOTIONS.to_vec());
        assert!(out.iter().all(|mv| mv.start() == 48 && mv.target() == 56));
    }

    #[test]
    fn horizontal_en_passant_exposure_is_suppressed() {
        let game_state =
            GameState::from_fen("k7/8/8/K1Pp3r/8/8/8/8 w - d6 0 1").expect("FEN should parse");
        let ctx = context(&game_state);
        let mut out = MoveList::new();
        emit_piece_moves(&ctx, &mut out);

        assert!(out.iter().all(|mv| mv.flag() != MoveFlag::EnPassant));
        assert!(out.contains(Move::new(34, 42, MoveFlag::None)));
    }
}

//! Check detection and the set of squares that answer a single check.

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::attack_map::AttackMap;
use crate::move_generation::pin_solver::slides_along;
use crate::move_generation::ray_scanner::{ray_mask, scan, Direction};
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckState {
    pub in_check: bool,
    pub in_double_check: bool,
    /// Squares a non-king move must land on to resolve a single check:
    /// the checker's square plus, for a slider, the squares between it and
    /// the king. `!0` when not in check. Meaningless in double check.
    pub resolving_mask: u64,
}

impl CheckState {
    pub fn resolve(game_state: &GameState, attack_map: &AttackMap, us: Color) -> Self {
        let king = attack_map.king_square;
        let in_check = attack_map.is_attacked(king);
        let in_double_check = attack_map.is_double_attacked(king);

        let resolving_mask = if !in_check {
            !0
        } else if in_double_check {
            0
        } else {
            single_checker_mask(game_state, king, us)
        };

        Self {
            in_check,
            in_double_check,
            resolving_mask,
        }
    }
}

fn single_checker_mask(game_state: &GameState, king: Square, us: Color) -> u64 {
    if let Some(ray) = sliding_checker_ray(game_state, king, us) {
        return ray;
    }

    let them = us.opposite();
    let pawn_checkers = pawn_attacks(us, king) & game_state.pieces_of(them, PieceKind::Pawn);
    if pawn_checkers != 0 {
        return pawn_checkers;
    }

    knight_attacks(king) & game_state.pieces_of(them, PieceKind::Knight)
}

/// Ray from `king` to an enemy slider that reaches it unobstructed, slider
/// included.
pub fn sliding_checker_ray(game_state: &GameState, king: Square, us: Color) -> Option<u64> {
    Direction::ALL.iter().find_map(|&direction| {
        let ray = scan(game_state, king, direction, None);
        let last = *ray.last()?;
        match game_state.piece_at(last) {
            Some(piece) if piece.color != us && slides_along(piece, direction) => Some(ray_mask(&ray)),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(fen: &str) -> CheckState {
        let game_state = GameState::from_fen(fen).expect("FEN should parse");
        let map = AttackMap::build(&game_state);
        CheckState::resolve(&game_state, &map, game_state.side_to_move)
    }

    #[test]
    fn quiet_position_has_open_mask() {
        let check = resolve(crate::game_state::chess_rules::STARTING_POSITION_FEN);
        assert!(!check.in_check);
        assert_eq!(check.resolving_mask, !0);
    }

    #[test]
    fn rook_check_mask_covers_line_and_checker() {
        let check = resolve("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1");
        assert!(check.in_check && !check.in_double_check);
        assert_eq!(check.resolving_mask, (1u64 << 12) | (1u64 << 20) | (1u64 << 28));
    }

    #[test]
    fn knight_and_pawn_checks_resolve_on_checker_square() {
        let knight = resolve("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1");
        assert_eq!(knight.resolving_mask, 1u64 << 19);

        let pawn = resolve("4k3/8/8/8/8/8/5p2/4K3 w - - 0 1");
        assert_eq!(pawn.resolving_mask, 1u64 << 13);

        let dark = resolve("4k3/3P4/8/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(dark.resolving_mask, 1u64 << 51);
    }

    #[test]
    fn double_check_is_flagged() {
        let check = resolve("4k3/8/8/8/4r3/5n2/8/4K3 w - - 0 1");
        assert!(check.in_check);
        assert!(check.in_double_check);
    }
}

//! Raw threat coverage of the side not to move.
//!
//! `AttackMap::build` projects every opponent piece onto the board. Squares hit
//! twice or more are tracked separately so a double check can be recognised
//! from the king's square alone. Coverage ignores whether the attacker is
//! itself pinned: a pinned piece still guards the squares it eyes.

use crate::game_state::chess_types::{square_bit, Color, Piece, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::magic::magic_bitboard::MagicTables;
use crate::move_generation::ray_scanner::{ray_mask, scan, Direction};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackMap {
    pub attacked: u64,
    pub double_attacked: u64,
    /// King of the side to move.
    pub king_square: Square,
}

impl AttackMap {
    /// Coverage of the opponent of `game_state.side_to_move`.
    ///
    /// # Panics
    /// Panics if the side to move has no king.
    pub fn build(game_state: &GameState) -> Self {
        let us = game_state.side_to_move;
        let king_square = game_state
            .king_square(us)
            .unwrap_or_else(|| panic!("side to move ({us:?}) has no king"));

        let mut map = Self {
            attacked: 0,
            double_attacked: 0,
            king_square,
        };

        let mut enemies = game_state.occupancy(us.opposite());
        while enemies != 0 {
            let square = enemies.trailing_zeros() as Square;
            enemies &= enemies - 1;

            if let Some(piece) = game_state.piece_at(square) {
                let footprint = map.footprint(game_state, square, piece);
                map.mark(footprint);
            }
        }

        map
    }

    #[inline]
    pub fn is_attacked(&self, square: Square) -> bool {
        (self.attacked & square_bit(square)) != 0
    }

    #[inline]
    pub fn is_double_attacked(&self, square: Square) -> bool {
        (self.double_attacked & square_bit(square)) != 0
    }

    fn mark(&mut self, footprint: u64) {
        self.double_attacked |= self.attacked & footprint;
        self.attacked |= footprint;
    }

    fn footprint(&self, game_state: &GameState, square: Square, piece: Piece) -> u64 {
        match piece.kind {
            PieceKind::Pawn => pawn_attacks(piece.color, square),
            PieceKind::Knight => knight_attacks(square),
            PieceKind::King => king_attacks(square),
            PieceKind::Bishop => self.slider_footprint(game_state, square, &Direction::DIAGONAL),
            PieceKind::Rook => self.slider_footprint(game_state, square, &Direction::STRAIGHT),
            PieceKind::Queen => self.slider_footprint(game_state, square, &Direction::ALL),
        }
    }

    /// Rays from a slider. A ray ending on our king continues one square past
    /// it, since stepping back along the checking line does not escape.
    fn slider_footprint(&self, game_state: &GameState, square: Square, directions: &[Direction]) -> u64 {
        let mut footprint = 0u64;

        for &direction in directions {
            let ray = scan(game_state, square, direction, None);
            footprint |= ray_mask(&ray);

            if ray.last() == Some(&self.king_square) {
                if let Some(behind) = direction.step(self.king_square) {
                    footprint |= square_bit(behind);
                }
            }
        }

        footprint
    }
}

/// Whether `by` attacks `square` on the current board.
///
/// Uses the magic tables and leaper tables directly, independent of the ray
/// scanner, so it can cross-check generated moves.
pub fn is_square_attacked(game_state: &GameState, square: Square, by: Color) -> bool {
    let tables = MagicTables::shared();
    let occupied = game_state.occupied();

    let diagonal = game_state.pieces_of(by, PieceKind::Bishop) | game_state.pieces_of(by, PieceKind::Queen);
    let straight = game_state.pieces_of(by, PieceKind::Rook) | game_state.pieces_of(by, PieceKind::Queen);

    // A pawn of `by` attacks `square` exactly when a pawn of the other color
    // on `square` would attack it back.
    (pawn_attacks(by.opposite(), square) & game_state.pieces_of(by, PieceKind::Pawn)) != 0
        || (knight_attacks(square) & game_state.pieces_of(by, PieceKind::Knight)) != 0
        || (king_attacks(square) & game_state.pieces_of(by, PieceKind::King)) != 0
        || (tables.bishop_attacks(square, occupied) & diagonal) != 0
        || (tables.rook_attacks(square, occupied) & straight) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_and_pawn_coverage_overlap_marks_double() {
        // Knight c6 and pawn c5 both cover b4 and d4; only the knight covers e5.
        let game_state =
            GameState::from_fen("4k3/8/2n5/2p5/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let map = AttackMap::build(&game_state);

        assert_eq!(map.king_square, 4);
        assert!(map.is_double_attacked(25));
        assert!(map.is_double_attacked(27));
        assert!(map.is_attacked(36));
        assert!(!map.is_double_attacked(36));
    }

    #[test]
    fn slider_ray_extends_past_checked_king() {
        let game_state =
            GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        let map = AttackMap::build(&game_state);

        assert!(map.is_attacked(4));
        assert!(map.is_attacked(5));
        assert!(!map.is_attacked(6));
    }

    #[test]
    fn defended_pieces_count_as_attacked() {
        let game_state =
            GameState::from_fen("4k3/8/8/8/8/8/3pr3/4K3 w - - 0 1").expect("FEN should parse");
        let map = AttackMap::build(&game_state);

        // The rook on e2 guards the pawn on d2, but nothing guards the rook.
        assert!(map.is_attacked(11));
        assert!(!map.is_attacked(12));
        assert!(map.is_double_attacked(4));
    }

    #[test]
    fn independent_verifier_agrees_with_map() {
        let game_state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let map = AttackMap::build(&game_state);

        for square in 0..64u8 {
            assert_eq!(
                map.is_attacked(square),
                is_square_attacked(&game_state, square, Color::Dark),
                "disagreement on square {square}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "has no king")]
    fn missing_king_fails_loudly() {
        let game_state =
            GameState::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let _ = AttackMap::build(&game_state);
    }
}

//! Absolute pins against the side to move's king.

use crate::game_state::chess_types::{Color, Piece, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::ray_scanner::{ray_mask, scan, Direction};

/// Whether `piece` slides along `direction`.
#[inline]
pub fn slides_along(piece: Piece, direction: Direction) -> bool {
    if direction.is_straight() {
        piece.kind.moves_straight()
    } else {
        piece.kind.moves_diagonally()
    }
}

/// Per-square destination restriction. `!0` means the piece is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinTable {
    masks: [u64; 64],
}

impl Default for PinTable {
    fn default() -> Self {
        Self { masks: [!0; 64] }
    }
}

impl PinTable {
    /// Cast all eight rays from `king_square`. A lone friendly piece followed
    /// by an enemy slider of the matching kind is pinned to the segment
    /// running from the king to the pinner, both ends included.
    pub fn solve(game_state: &GameState, king_square: Square, us: Color) -> Self {
        let mut table = Self::default();

        for direction in Direction::ALL {
            let to_blocker = scan(game_state, king_square, direction, None);
            let Some(&blocker) = to_blocker.last() else {
                continue;
            };
            if !matches!(game_state.piece_at(blocker), Some(piece) if piece.color == us) {
                continue;
            }

            let to_pinner = scan(game_state, blocker, direction, None);
            let Some(&pinner) = to_pinner.last() else {
                continue;
            };
            let pinned = matches!(
                game_state.piece_at(pinner),
                Some(piece) if piece.color != us && slides_along(piece, direction)
            );

            if pinned {
                debug_assert_eq!(table.masks[blocker as usize], !0, "square {blocker} pinned twice");
                table.masks[blocker as usize] = ray_mask(&to_blocker) | ray_mask(&to_pinner);
            }
        }

        table
    }

    #[inline]
    pub fn mask(&self, square: Square) -> u64 {
        self.masks[square as usize]
    }

    #[inline]
    pub fn is_pinned(&self, square: Square) -> bool {
        self.masks[square as usize] != !0
    }

    /// Number of pinned pieces.
    pub fn pinned_count(&self) -> usize {
        self.masks.iter().filter(|&&mask| mask != !0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(fen: &str) -> PinTable {
        let game_state = GameState::from_fen(fen).expect("FEN should parse");
        let king = game_state
            .king_square(game_state.side_to_move)
            .expect("side to move should have a king");
        PinTable::solve(&game_state, king, game_state.side_to_move)
    }

    #[test]
    fn rook_pins_knight_on_file() {
        let pins = solve("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");

        assert!(pins.is_pinned(12));
        assert_eq!(pins.pinned_count(), 1);
        // e2 through e8, the pinner included.
        let file: u64 = (1..8).fold(0, |acc, rank| acc | 1u64 << (rank * 8 + 4));
        assert_eq!(pins.mask(12), file);
    }

    #[test]
    fn mismatched_slider_does_not_pin() {
        // A bishop on a file and a rook on a diagonal pin nothing.
        let pins = solve("4b2k/8/8/8/8/8/r3N3/4K3 w - - 0 1");
        assert!(!pins.is_pinned(12));

        let pins = solve("7k/8/8/8/8/2r5/3P4/4K3 w - - 0 1");
        assert!(!pins.is_pinned(11));
        assert_eq!(pins.pinned_count(), 0);
    }

    #[test]
    fn two_friendly_blockers_mean_no_pin() {
        let pins = solve("7k/8/8/b7/8/2P5/3P4/4K3 w - - 0 1");
        assert_eq!(pins.pinned_count(), 0);
    }

    #[test]
    fn queen_pins_along_diagonal() {
        let pins = solve("7k/8/8/q7/8/8/3B4/4K3 w - - 0 1");
        assert!(pins.is_pinned(11));
        // d2, c3, b4, a5
        assert_eq!(
            pins.mask(11),
            (1u64 << 11) | (1u64 << 18) | (1u64 << 25) | (1u64 << 32)
        );
    }
}

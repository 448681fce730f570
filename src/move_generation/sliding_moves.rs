//! Pseudo-legal destinations for rooks, bishops, and queens.

use crate::game_state::chess_types::{PieceKind, Square};
use crate::magic::magic_bitboard::MagicTables;

#[derive(Debug, Clone, Copy)]
pub struct SlidingMoveProvider<'t> {
    tables: &'t MagicTables,
}

impl<'t> SlidingMoveProvider<'t> {
    pub fn new(tables: &'t MagicTables) -> Self {
        Self { tables }
    }

    /// Destinations of a `kind` slider on `square`, own pieces removed.
    /// Non-sliding kinds have none.
    pub fn destinations(&self, kind: PieceKind, square: Square, occupied: u64, own: u64) -> u64 {
        let rook_like = || {
            let key = occupied & self.tables.rook_relevant_occupancy(square);
            self.tables.rook_destinations(square, key)
        };
        let bishop_like = || {
            let key = occupied & self.tables.bishop_relevant_occupancy(square);
            self.tables.bishop_destinations(square, key)
        };

        let reach = match kind {
            PieceKind::Rook => rook_like(),
            PieceKind::Bishop => bishop_like(),
            PieceKind::Queen => rook_like() | bishop_like(),
            _ => 0,
        };

        reach & !own
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    #[test]
    fn queen_in_start_position_is_boxed_in() {
        let game_state = GameState::new_game();
        let provider = SlidingMoveProvider::new(MagicTables::shared());

        let destinations = provider.destinations(
            PieceKind::Queen,
            3,
            game_state.occupied(),
            game_state.occupancy(Color::Light),
        );
        assert_eq!(destinations, 0);
    }

    #[test]
    fn captures_are_kept_and_friends_removed() {
        let game_state =
            GameState::from_fen("4k3/8/8/3p4/8/8/3R1N2/4K3 w - - 0 1").expect("FEN should parse");
        let provider = SlidingMoveProvider::new(MagicTables::shared());

        let destinations = provider.destinations(
            PieceKind::Rook,
            11,
            game_state.occupied(),
            game_state.occupancy(Color::Light),
        );

        // d3, d4, d5 (capture), d1, c2, b2, a2, e2; f2 holds a friendly knight.
        assert_eq!(destinations.count_ones(), 8);
        assert_ne!(destinations & (1u64 << 35), 0);
        assert_eq!(destinations & (1u64 << 13), 0);
        assert_eq!(destinations & (1u64 << 43), 0);
    }

    #[test]
    fn leapers_have_no_sliding_destinations() {
        let provider = SlidingMoveProvider::new(MagicTables::shared());
        assert_eq!(provider.destinations(PieceKind::Knight, 27, 0, 0), 0);
    }
}

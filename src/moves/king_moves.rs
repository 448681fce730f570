//! King attack table: the up-to-eight adjacent squares of every square.

use crate::game_state::chess_types::Square;
use crate::moves::knight_moves::leaper_table;

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_OFFSETS);

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

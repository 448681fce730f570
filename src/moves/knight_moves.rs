//! Knight attack table.
//!
//! Built at compile time from the eight L-shaped offsets; an offset that
//! would wrap across a board edge is dropped.

use crate::game_state::chess_types::Square;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

/// Table of single-jump targets for a piece with fixed `(file, rank)` offsets.
pub(crate) const fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;

        while i < offsets.len() {
            let (df, dr) = offsets[i];
            let (f, r) = (file + df, rank + dr);
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                table[sq] |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }

        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::knight_attacks;

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        assert_eq!(knight_attacks(27).count_ones(), 8);
    }

    #[test]
    fn knight_on_h_file_does_not_wrap_to_a_file() {
        let h3 = 23u8;
        let targets = knight_attacks(h3);
        assert_eq!(targets.count_ones(), 4);
        let a_file = 0x0101_0101_0101_0101u64;
        assert_eq!(targets & a_file, 0);
    }
}

//! Pawn capture tables, one per color.
//!
//! These hold the diagonal squares a pawn threatens, not its pushes.

use crate::game_state::chess_types::{Color, Square};

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(Color::Light);
pub const DARK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(Color::Dark);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

const fn generate_pawn_attacks(color: Color) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        let forward_rank = match color {
            Color::Light if rank < 7 => Some(rank + 1),
            Color::Dark if rank > 0 => Some(rank - 1),
            _ => None,
        };

        if let Some(target_rank) = forward_rank {
            if file > 0 {
                attacks |= 1u64 << (target_rank * 8 + file - 1);
            }
            if file < 7 {
                attacks |= 1u64 << (target_rank * 8 + file + 1);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

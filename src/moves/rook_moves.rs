//! Reference rook attacks and relevant-occupancy masks.
//!
//! These loop-based tracers are too slow for move generation. They seed and
//! verify the magic-bitboard tables, which answer the same question in one
//! multiply.

use crate::game_state::chess_types::Square;

const ROOK_STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const ROOK_RELEVANT_OCCUPANCY: [u64; 64] = generate_relevant_occupancy(&ROOK_STEPS);

/// Squares a rook on `square` attacks given `occupancy`, blockers included.
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_STEPS
        .iter()
        .fold(0u64, |acc, &(file_step, rank_step)| {
            acc | trace_ray(square as i32, file_step, rank_step, occupancy)
        })
}

pub(crate) fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

/// Per-square union of every ray square whose occupancy can change the
/// attack set: the ray minus its final edge square.
pub(crate) const fn generate_relevant_occupancy(steps: &[(i32, i32); 4]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut mask = 0u64;
        let mut i = 0usize;

        while i < steps.len() {
            let (file_step, rank_step) = steps[i];
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;

            while on_board(file + file_step, rank + rank_step) && on_board(file, rank) {
                mask |= 1u64 << (rank * 8 + file);
                file += file_step;
                rank += rank_step;
            }

            i += 1;
        }

        table[sq] = mask;
        sq += 1;
    }

    table
}

const fn on_board(file: i32, rank: i32) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

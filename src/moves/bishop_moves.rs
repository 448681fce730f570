//! Reference bishop attacks and relevant-occupancy masks.

use crate::game_state::chess_types::Square;
use crate::moves::rook_moves::{generate_relevant_occupancy, trace_ray};

const BISHOP_STEPS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const BISHOP_RELEVANT_OCCUPANCY: [u64; 64] = generate_relevant_occupancy(&BISHOP_STEPS);

/// Squares a bishop on `square` attacks given `occupancy`, blockers included.
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_STEPS
        .iter()
        .fold(0u64, |acc, &(file_step, rank_step)| {
            acc | trace_ray(square as i32, file_step, rank_step, occupancy)
        })
}

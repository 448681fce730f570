//! Draw conditions checked before any move is generated.
//!
//! The prior-position history is a plain slice: its length is its end. Each
//! entry is compared with `GameState::is_same_position`, which looks at piece
//! placement, side to move, castling rights, and the en-passant square.

use crate::game_state::chess_rules::{FIFTY_MOVE_RULE_HALFMOVES, REPETITION_PRIOR_OCCURRENCES};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    ThreefoldRepetition,
    FiftyMoveRule,
}

/// The current position already occurred twice before.
pub fn is_threefold_repetition(position: &GameState, prior: &[GameState]) -> bool {
    prior
        .iter()
        .filter(|earlier| position.is_same_position(earlier))
        .take(REPETITION_PRIOR_OCCURRENCES)
        .count()
        >= REPETITION_PRIOR_OCCURRENCES
}

#[inline]
pub fn is_fifty_move_draw(position: &GameState) -> bool {
    position.halfmove_clock >= FIFTY_MOVE_RULE_HALFMOVES
}

pub fn draw_reason(position: &GameState, prior: &[GameState]) -> Option<DrawReason> {
    if is_threefold_repetition(position, prior) {
        Some(DrawReason::ThreefoldRepetition)
    } else if is_fifty_move_draw(position) {
        Some(DrawReason::FiftyMoveRule)
    } else {
        None
    }
}

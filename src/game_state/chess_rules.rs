//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals: the standard starting
//! position, the proven upper bound on legal moves, the fifty-move limit, and
//! the castling geometry consulted by the move generator and move application.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest number of legal moves any reachable chess position admits.
pub const MAX_LEGAL_MOVES: usize = 218;

/// Half-move clock value at which the fifty-move rule declares a draw.
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Number of earlier occurrences that turn the current position into a threefold repetition.
pub const REPETITION_PRIOR_OCCURRENCES: usize = 2;

/// Everything the generator and move application need to know about one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty.
    pub empty_mask: u64,
    /// Squares the king crosses or lands on; they must not be attacked.
    pub king_transit_mask: u64,
}

pub const LIGHT_KINGSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_LIGHT_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    empty_mask: (1u64 << 5) | (1u64 << 6),
    king_transit_mask: (1u64 << 5) | (1u64 << 6),
};

pub const LIGHT_QUEENSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_LIGHT_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    empty_mask: (1u64 << 1) | (1u64 << 2) | (1u64 << 3),
    king_transit_mask: (1u64 << 2) | (1u64 << 3),
};

pub const DARK_KINGSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_DARK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    empty_mask: (1u64 << 61) | (1u64 << 62),
    king_transit_mask: (1u64 << 61) | (1u64 << 62),
};

pub const DARK_QUEENSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_DARK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    empty_mask: (1u64 << 57) | (1u64 << 58) | (1u64 << 59),
    king_transit_mask: (1u64 << 58) | (1u64 << 59),
};

/// King-side and queen-side castles available to `color`, in that order.
#[inline]
pub const fn castles_for(color: Color) -> [CastleGeometry; 2] {
    match color {
        Color::Light => [LIGHT_KINGSIDE, LIGHT_QUEENSIDE],
        Color::Dark => [DARK_KINGSIDE, DARK_QUEENSIDE],
    }
}

/// Castling right lost when a piece leaves or is captured on `square`.
#[inline]
pub const fn castling_right_for_rook_square(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

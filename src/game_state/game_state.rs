//! Board and position state consumed by the move generator.
//!
//! `GameState` keeps a per-square mailbox for constant-time piece queries next
//! to per-kind bitboards and occupancy caches for set operations. Both views are
//! updated together through `put_piece` / `remove_piece`, so they never drift.

use crate::chess_errors::FenResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Mailbox representation ---
    pub board: [Option<Piece>; 64],

    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 64],
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.board[square as usize].is_none()
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Place `piece` on an empty `square`.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.is_empty(square), "square {square} is already occupied");
        let bit = square_bit(square);
        self.board[square as usize] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.occupancy_by_color[piece.color.index()] |= bit;
        self.occupancy_all |= bit;
    }

    /// Lift whatever stands on `square`, returning it.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square as usize].take()?;
        let clear = !square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] &= clear;
        self.occupancy_by_color[piece.color.index()] &= clear;
        self.occupancy_all &= clear;
        Some(piece)
    }

    /// Positions are repetitions of one another when the placement, side to
    /// move, castling rights, and en-passant square all agree. Clocks are ignored.
    pub fn is_same_position(&self, other: &GameState) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
    }
}

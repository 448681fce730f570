/// Core value types shared by the board, the move generator, and the utilities.
///
/// Square indexing is `0 == a1`, `7 == h1`, `56 == a8`, `63 == h8`.
pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Square-index delta of a single pawn push.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 8,
            Color::Dark => -8,
        }
    }

    /// Rank a pawn of this color starts on (and may double push from).
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// Rank a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Slides along files and ranks.
    #[inline]
    pub const fn moves_straight(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }

    /// Slides along diagonals.
    #[inline]
    pub const fn moves_diagonally(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }
}

/// A colored piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Compact castling rights bitmask, one bit per corner.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

/// Board square index (`0..=63`).
pub type Square = u8;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub const fn square_bit(square: Square) -> u64 {
    1u64 << square
}

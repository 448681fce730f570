//! Errors returned by the fallible collaborators around the move generator.
//!
//! Legal-move generation itself is total over well-formed positions and has
//! no error type. Parsing text (FEN, squares), applying a move to a position,
//! and driving perft can fail on bad input; those failures are described here.
//! Internal invariant violations are not errors: they panic.

use thiserror::Error;

use crate::game_state::chess_types::Square;
use crate::moves::move_descriptions::Move;

/// A square name such as `e4` could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("invalid algebraic square: {0:?}")]
    BadLength(String),

    #[error("invalid algebraic file: {0:?}")]
    BadFile(char),

    #[error("invalid algebraic rank: {0:?}")]
    BadRank(char),
}

/// A Forsyth-Edwards Notation string could not be turned into a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("invalid empty-square count {0:?}")]
    EmptyCount(char),

    #[error("invalid piece character {0:?} in board layout")]
    PieceChar(char),

    #[error("board rank {rank} covers {files} files instead of 8")]
    FileCount { rank: usize, files: usize },

    #[error("invalid side-to-move field: {0:?}")]
    SideToMove(String),

    #[error("invalid castling rights character: {0:?}")]
    CastlingChar(char),

    #[error("invalid en-passant square")]
    EnPassant(#[from] SquareParseError),

    #[error("invalid {field}: {value:?}")]
    Counter { field: &'static str, value: String },
}

/// A move could not be applied to a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveApplyError {
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),

    #[error("piece on origin square {0} does not belong to the side to move")]
    WrongColor(Square),

    #[error("en-passant move {0:?} does not capture a pawn")]
    NoEnPassantVictim(Move),

    #[error("terminal marker {0:?} is not a playable move")]
    TerminalMarker(Move),
}

/// Perft enumeration failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerftError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Apply(#[from] MoveApplyError),
}

pub type SquareParseResult<T> = Result<T, SquareParseError>;
pub type FenResult<T> = Result<T, FenError>;
pub type MoveApplyResult<T> = Result<T, MoveApplyError>;
pub type PerftResult<T> = Result<T, PerftError>;

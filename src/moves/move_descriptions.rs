//! Packed move values and the fixed-capacity buffer the generator fills.
//!
//! A `Move` is a 16-bit value:
//! - bits 0-5: start square (0-63)
//! - bits 6-11: target square (0-63)
//! - bits 12-15: `MoveFlag` code
//!
//! The terminal flags (draw, checkmate, stalemate) reuse start = target = 0 as
//! a "non-move" payload. The all-zero value is the empty buffer slot.

use std::fmt;

use arrayvec::ArrayVec;

use crate::game_state::chess_rules::MAX_LEGAL_MOVES;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

const START_SHIFT: u16 = 0;
const TARGET_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;

const SQUARE_MASK: u16 = 0x3F;
const FLAG_MASK: u16 = 0xF;

/// What kind of move a `Move` is, beyond its two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    None = 0,
    DoublePawnPush = 1,
    EnPassant = 2,
    KingSideCastle = 3,
    QueenSideCastle = 4,
    PromoteToQueen = 5,
    PromoteToKnight = 6,
    PromoteToRook = 7,
    PromoteToBishop = 8,
    Draw = 9,
    Checkmate = 10,
    Stalemate = 11,
}

impl MoveFlag {
    /// Promotion flags in emission order.
    pub const PROMOTIONS: [MoveFlag; 4] = [
        MoveFlag::PromoteToQueen,
        MoveFlag::PromoteToKnight,
        MoveFlag::PromoteToRook,
        MoveFlag::PromoteToBishop,
    ];

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => MoveFlag::None,
            1 => MoveFlag::DoublePawnPush,
            2 => MoveFlag::EnPassant,
            3 => MoveFlag::KingSideCastle,
            4 => MoveFlag::QueenSideCastle,
            5 => MoveFlag::PromoteToQueen,
            6 => MoveFlag::PromoteToKnight,
            7 => MoveFlag::PromoteToRook,
            8 => MoveFlag::PromoteToBishop,
            9 => MoveFlag::Draw,
            10 => MoveFlag::Checkmate,
            11 => MoveFlag::Stalemate,
            _ => return None,
        })
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteToQueen => Some(PieceKind::Queen),
            MoveFlag::PromoteToKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteToRook => Some(PieceKind::Rook),
            MoveFlag::PromoteToBishop => Some(PieceKind::Bishop),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveFlag::KingSideCastle | MoveFlag::QueenSideCastle)
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, MoveFlag::Draw | MoveFlag::Checkmate | MoveFlag::Stalemate)
    }
}

/// How a game ended, when generation found no ordinary moves to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Draw,
    Checkmate,
    Stalemate,
}

impl GameOutcome {
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match self {
            GameOutcome::Draw => MoveFlag::Draw,
            GameOutcome::Checkmate => MoveFlag::Checkmate,
            GameOutcome::Stalemate => MoveFlag::Stalemate,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// The zero value left in unused buffer slots.
    pub const EMPTY: Move = Move(0);

    #[inline]
    pub const fn new(start: Square, target: Square, flag: MoveFlag) -> Self {
        debug_assert!(start < 64 && target < 64);
        Move(
            ((start as u16 & SQUARE_MASK) << START_SHIFT)
                | ((target as u16 & SQUARE_MASK) << TARGET_SHIFT)
                | (flag.code() << FLAG_SHIFT),
        )
    }

    /// Sentinel pseudo-move announcing a terminal position.
    #[inline]
    pub const fn terminal(outcome: GameOutcome) -> Self {
        Move::new(0, 0, outcome.flag())
    }

    /// Rebuild a move from its packed form, rejecting unknown flag codes.
    #[inline]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        match MoveFlag::from_code((bits >> FLAG_SHIFT) & FLAG_MASK) {
            Some(_) => Some(Move(bits)),
            None => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn start(self) -> Square {
        ((self.0 >> START_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn target(self) -> Square {
        ((self.0 >> TARGET_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match MoveFlag::from_code((self.0 >> FLAG_SHIFT) & FLAG_MASK) {
            Some(flag) => flag,
            None => panic!("move carries an unknown flag code"),
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        self.flag().is_terminal()
    }

    #[inline]
    pub const fn outcome(self) -> Option<GameOutcome> {
        match self.flag() {
            MoveFlag::Draw => Some(GameOutcome::Draw),
            MoveFlag::Checkmate => Some(GameOutcome::Checkmate),
            MoveFlag::Stalemate => Some(GameOutcome::Stalemate),
            _ => None,
        }
    }

    /// Long algebraic (UCI) text such as `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        if self.is_terminal() {
            return "0000".to_owned();
        }

        let mut out = String::with_capacity(5);
        out.push_str(&square_name(self.start()));
        out.push_str(&square_name(self.target()));
        if let Some(piece) = self.flag().promotion_piece() {
            out.push(match piece {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            });
        }
        out
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            Some(outcome) => write!(f, "Move({outcome:?})"),
            None => write!(f, "Move({} {:?})", self.to_uci(), self.flag()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

/// Capacity of a `MoveList`: the legal-move upper bound plus one slot.
pub const MOVE_LIST_CAPACITY: usize = MAX_LEGAL_MOVES + 1;

/// Caller-owned output buffer for one generation call.
///
/// Slots past `len()` read as `Move::EMPTY`. A list holding exactly one
/// terminal sentinel reports that outcome instead of ordinary moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: ArrayVec<Move, MOVE_LIST_CAPACITY>,
}

impl MoveList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Append a move. Overflowing the proven bound is a generator defect.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        assert!(
            !self.moves.is_full(),
            "move list overflow: more than {MOVE_LIST_CAPACITY} entries"
        );
        self.moves.push(mv);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// Slot `index` of the fixed-size buffer view.
    #[inline]
    pub fn slot(&self, index: usize) -> Move {
        self.moves.get(index).copied().unwrap_or(Move::EMPTY)
    }

    /// Terminal outcome, if the list is a single sentinel.
    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.moves.as_slice() {
            [only] => only.outcome(),
            _ => None,
        }
    }

    /// Number of playable moves; zero for a terminal sentinel.
    #[inline]
    pub fn legal_move_count(&self) -> usize {
        if self.outcome().is_some() {
            0
        } else {
            self.moves.len()
        }
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

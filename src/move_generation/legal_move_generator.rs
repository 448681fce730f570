//! Legal move generation entry points.
//!
//! One call runs the whole pipeline on scratch state owned by that call:
//! draw checks, the attack map, king and castling moves, then pin- and
//! check-filtered moves for every other piece. A position with no ordinary
//! moves yields a single terminal marker instead.

use tracing::trace;

use crate::game_state::chess_types::{square_bit, Color, Square};
use crate::game_state::game_state::GameState;
use crate::magic::magic_bitboard::MagicTables;
use crate::move_generation::attack_map::AttackMap;
use crate::move_generation::check_resolver::CheckState;
use crate::move_generation::draw_rules::draw_reason;
use crate::move_generation::leaf_emitter::{emit_castles, emit_king_moves, emit_piece_moves};
use crate::move_generation::pin_solver::PinTable;
use crate::move_generation::sliding_moves::SlidingMoveProvider;
use crate::moves::move_descriptions::{GameOutcome, Move, MoveList};

/// Scratch state for one generation call.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    pub position: &'a GameState,
    pub us: Color,
    pub them: Color,
    pub attacks: AttackMap,
    pub check: CheckState,
    /// Unpinned until the pin pass runs.
    pub pins: PinTable,
    pub sliders: SlidingMoveProvider<'a>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(position: &'a GameState, tables: &'a MagicTables) -> Self {
        let us = position.side_to_move;
        let attacks = AttackMap::build(position);
        let check = CheckState::resolve(position, &attacks, us);

        Self {
            position,
            us,
            them: us.opposite(),
            attacks,
            check,
            pins: PinTable::default(),
            sliders: SlidingMoveProvider::new(tables),
        }
    }

    #[inline]
    pub fn own(&self) -> u64 {
        self.position.occupancy(self.us)
    }

    #[inline]
    pub fn enemy(&self) -> u64 {
        self.position.occupancy(self.them)
    }

    /// Destinations a non-king piece on `square` may legally reach.
    #[inline]
    pub fn legal_filter(&self, square: Square) -> u64 {
        self.pins.mask(square) & self.check.resolving_mask
    }
}

/// Something that fills a `MoveList` with the legal moves of a position.
pub trait MoveGenerator {
    /// Replace the contents of `out` with the legal moves of `position`, or a
    /// single terminal marker. `prior` holds earlier positions of the game for
    /// repetition detection and may be empty.
    fn generate_legal_moves(&self, out: &mut MoveList, position: &GameState, prior: &[GameState]);

    fn generate(&self, position: &GameState, prior: &[GameState]) -> MoveList {
        let mut out = MoveList::new();
        self.generate_legal_moves(&mut out, position, prior);
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LegalMoveGenerator<'t> {
    tables: &'t MagicTables,
}

impl<'t> LegalMoveGenerator<'t> {
    pub fn new(tables: &'t MagicTables) -> Self {
        Self { tables }
    }
}

impl Default for LegalMoveGenerator<'static> {
    fn default() -> Self {
        Self::new(MagicTables::shared())
    }
}

impl MoveGenerator for LegalMoveGenerator<'_> {
    fn generate_legal_moves(&self, out: &mut MoveList, position: &GameState, prior: &[GameState]) {
        generate_legal_moves_with(self.tables, out, position, prior);
    }
}

/// Generate with the process-wide magic tables.
pub fn generate_legal_moves(out: &mut MoveList, position: &GameState, prior: &[GameState]) {
    generate_legal_moves_with(MagicTables::shared(), out, position, prior);
}

/// # Panics
/// Panics if the side to move has no king, or if the move list overflows.
pub fn generate_legal_moves_with(
    tables: &MagicTables,
    out: &mut MoveList,
    position: &GameState,
    prior: &[GameState],
) {
    out.clear();

    if let Some(reason) = draw_reason(position, prior) {
        trace!(?reason, "draw");
        out.push(Move::terminal(GameOutcome::Draw));
        return;
    }

    let mut ctx = GenerationContext::new(position, tables);

    emit_king_moves(&ctx, out);
    emit_castles(&ctx, out);

    if ctx.check.in_double_check {
        if out.is_empty() {
            trace!(king = ctx.attacks.king_square, "checkmate by double check");
            out.push(Move::terminal(GameOutcome::Checkmate));
        }
        return;
    }

    ctx.pins = PinTable::solve(position, ctx.attacks.king_square, ctx.us);
    emit_piece_moves(&ctx, out);

    if out.is_empty() {
        let outcome = if ctx.check.in_check {
            GameOutcome::Checkmate
        } else {
            GameOutcome::Stalemate
        };
        trace!(?outcome, "no legal moves");
        out.push(Move::terminal(outcome));
    }
}

/// Whether the side to move's king is attacked.
pub fn is_in_check(position: &GameState) -> bool {
    let attacks = AttackMap::build(position);
    (attacks.attacked & square_bit(attacks.king_square)) != 0
}

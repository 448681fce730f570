//! Exhaustive move-tree node counting for correctness checks.
//!
//! Leaves at depth one are bulk counted from the generated list. A terminal
//! marker (checkmate, stalemate, draw) is not a move and counts as zero nodes.
//! Perft always starts without game history.

use std::thread;

use tracing::debug;

use crate::chess_errors::{PerftError, PerftResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{is_in_check, LegalMoveGenerator, MoveGenerator};
use crate::moves::move_descriptions::{GameOutcome, Move, MoveFlag, MoveList};

/// Leaf statistics in the usual perft-table columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// A published perft position and its node counts for depth 1, 2, ...
#[derive(Debug, Clone, Copy)]
pub struct ReferencePosition {
    pub name: &'static str,
    pub fen: &'static str,
    pub nodes_by_depth: &'static [u64],
}

pub const REFERENCE_POSITIONS: [ReferencePosition; 6] = [
    ReferencePosition {
        name: "start",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        nodes_by_depth: &[20, 400, 8_902, 197_281, 4_865_609],
    },
    ReferencePosition {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        nodes_by_depth: &[48, 2_039, 97_862, 4_085_603],
    },
    ReferencePosition {
        name: "position3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        nodes_by_depth: &[14, 191, 2_812, 43_238, 674_624],
    },
    ReferencePosition {
        name: "position4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        nodes_by_depth: &[6, 264, 9_467, 422_333],
    },
    ReferencePosition {
        name: "position5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        nodes_by_depth: &[44, 1_486, 62_379, 2_103_487],
    },
    ReferencePosition {
        name: "position6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        nodes_by_depth: &[46, 2_079, 89_890, 3_894_594],
    },
];

/// Leaf nodes `depth` plies below `game_state`.
pub fn perft(game_state: &GameState, depth: u8) -> PerftResult<u64> {
    perft_with(&LegalMoveGenerator::default(), game_state, depth)
}

pub fn perft_fen(fen: &str, depth: u8) -> PerftResult<u64> {
    let game_state = GameState::from_fen(fen)?;
    perft(&game_state, depth)
}

pub fn perft_with<G: MoveGenerator + ?Sized>(generator: &G, game_state: &GameState, depth: u8) -> PerftResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generator.generate(game_state, &[]);
    if moves.outcome().is_some() {
        return Ok(0);
    }
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for &mv in &moves {
        let next = apply_move(game_state, mv)?;
        nodes += perft_with(generator, &next, depth - 1)?;
    }

    Ok(nodes)
}

/// Node count below each root move.
pub fn perft_divide(game_state: &GameState, depth: u8) -> PerftResult<Vec<(Move, u64)>> {
    let generator = LegalMoveGenerator::default();
    if depth == 0 {
        return Ok(Vec::new());
    }

    let moves = generator.generate(game_state, &[]);
    let mut divided = Vec::with_capacity(moves.legal_move_count());

    for &mv in moves.iter().filter(|mv| !mv.is_terminal()) {
        let next = apply_move(game_state, mv)?;
        let nodes = perft_with(&generator, &next, depth - 1)?;
        debug!(%mv, nodes, "divide");
        divided.push((mv, nodes));
    }

    Ok(divided)
}

/// Same total as `perft`, with root moves spread over scoped worker threads.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> PerftResult<u64> {
    if depth <= 1 {
        return perft(game_state, depth);
    }

    let generator = LegalMoveGenerator::default();
    let moves = generator.generate(game_state, &[]);
    if moves.outcome().is_some() {
        return Ok(0);
    }

    thread::scope(|scope| {
        let handles: Vec<_> = moves
            .iter()
            .map(|&mv| {
                scope.spawn(move || -> PerftResult<u64> {
                    let next = apply_move(game_state, mv)?;
                    perft_with(&generator, &next, depth - 1)
                })
            })
            .collect();

        handles.into_iter().try_fold(0u64, |total, handle| {
            let nodes = match handle.join() {
                Ok(result) => result?,
                Err(payload) => std::panic::resume_unwind(payload),
            };
            Ok::<u64, PerftError>(total + nodes)
        })
    })
}

/// Perft with the leaf breakdown. Slower than `perft`: every leaf is played
/// to classify checks and mates.
pub fn perft_counts(game_state: &GameState, depth: u8) -> PerftResult<PerftCounts> {
    let generator = LegalMoveGenerator::default();
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    let mut moves = MoveList::new();
    generator.generate_legal_moves(&mut moves, game_state, &[]);

    for &mv in moves.iter().filter(|mv| !mv.is_terminal()) {
        let next = apply_move(game_state, mv)?;
        if depth == 1 {
            total.merge(classify_leaf(&generator, game_state, &next, mv));
        } else {
            total.merge(perft_counts(&next, depth - 1)?);
        }
    }

    Ok(total)
}

fn classify_leaf(generator: &LegalMoveGenerator<'_>, before: &GameState, after: &GameState, mv: Move) -> PerftCounts {
    let flag = mv.flag();
    let gives_check = is_in_check(after);

    PerftCounts {
        nodes: 1,
        captures: u64::from(flag == MoveFlag::EnPassant || !before.is_empty(mv.target())),
        en_passant: u64::from(flag == MoveFlag::EnPassant),
        castles: u64::from(flag.is_castle()),
        promotions: u64::from(flag.promotion_piece().is_some()),
        checks: u64::from(gives_check),
        checkmates: u64::from(
            gives_check && generator.generate(after, &[]).outcome() == Some(GameOutcome::Checkmate),
        ),
    }
}

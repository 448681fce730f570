use std::collections::HashSet;

use proptest::prelude::*;

use ray_movegen::game_state::chess_types::PieceKind;
use ray_movegen::game_state::game_state::GameState;
use ray_movegen::move_generation::attack_map::{is_square_attacked, AttackMap};
use ray_movegen::move_generation::legal_move_apply::apply_move;
use ray_movegen::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};
use ray_movegen::move_generation::perft::REFERENCE_POSITIONS;
use ray_movegen::moves::move_descriptions::{GameOutcome, Move, MoveFlag, MoveList};

fn check_invariants(game: &GameState, moves: &MoveList) {
    let us = game.side_to_move;
    let attacks = AttackMap::build(game);
    let king = attacks.king_square;
    let in_check = is_square_attacked(game, king, us.opposite());
    let in_double_check = attacks.is_double_attacked(king);

    if let Some(outcome) = moves.outcome() {
        assert_eq!(moves.len(), 1);
        let expected = if in_check {
            GameOutcome::Checkmate
        } else {
            GameOutcome::Stalemate
        };
        assert_eq!(outcome, expected, "terminal marker for {}", game.get_fen());
        return;
    }

    let mut seen = HashSet::new();
    for &mv in moves {
        assert!(!mv.is_terminal(), "terminal marker mixed into {}", game.get_fen());
        assert!(seen.insert(mv.bits()), "duplicate {mv} in {}", game.get_fen());

        if in_double_check {
            assert_eq!(mv.start(), king, "non-king move {mv} in double check");
        }
        if mv.flag().is_castle() {
            assert!(!in_check, "castle {mv} generated while in check");
        }

        let next = apply_move(game, mv).expect("generated move should apply");
        let our_king = next
            .king_square(us)
            .expect("king should still be on the board");
        assert!(
            !is_square_attacked(&next, our_king, us.opposite()),
            "{mv} leaves the king attacked in {}",
            game.get_fen()
        );
    }
}

/// Play pseudo-random legal moves chosen by `choices`, checking every
/// position on the way.
fn playout(start: &GameState, choices: &[u16]) {
    let generator = LegalMoveGenerator::default();
    let mut game = start.clone();

    for &choice in choices {
        let moves = generator.generate(&game, &[]);
        check_invariants(&game, &moves);
        if moves.outcome().is_some() {
            return;
        }

        let mv = moves.slot(choice as usize % moves.len());
        game = apply_move(&game, mv).expect("generated move should apply");
    }
}

fn any_flag() -> impl Strategy<Value = MoveFlag> {
    (0u16..12).prop_map(|code| MoveFlag::from_code(code).expect("codes below 12 are valid"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn move_packing_round_trips(start in 0u8..64, target in 0u8..64, flag in any_flag()) {
        let mv = Move::new(start, target, flag);
        let decoded = Move::from_bits(mv.bits()).expect("packed move should decode");

        prop_assert_eq!(decoded, mv);
        prop_assert_eq!(decoded.start(), start);
        prop_assert_eq!(decoded.target(), target);
        prop_assert_eq!(decoded.flag(), flag);
    }

    #[test]
    fn random_playouts_keep_invariants(
        position in 0usize..REFERENCE_POSITIONS.len(),
        choices in prop::collection::vec(any::<u16>(), 1..80),
    ) {
        let start = GameState::from_fen(REFERENCE_POSITIONS[position].fen)
            .expect("reference FEN should parse");
        playout(&start, &choices);
    }

    #[test]
    fn promotions_come_in_complete_sets(choices in prop::collection::vec(any::<u16>(), 1..40)) {
        let generator = LegalMoveGenerator::default();
        let mut game = GameState::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
            .expect("FEN should parse");

        for &choice in &choices {
            let moves = generator.generate(&game, &[]);
            if moves.outcome().is_some() {
                break;
            }

            for &mv in &moves {
                if mv.flag() == MoveFlag::PromoteToQueen {
                    for flag in MoveFlag::PROMOTIONS {
                        prop_assert!(moves.contains(Move::new(mv.start(), mv.target(), flag)));
                    }
                    let pawn = game.piece_at(mv.start()).map(|piece| piece.kind);
                    prop_assert_eq!(pawn, Some(PieceKind::Pawn));
                }
            }

            let mv = moves.slot(choice as usize % moves.len());
            game = apply_move(&game, mv).expect("generated move should apply");
        }
    }
}

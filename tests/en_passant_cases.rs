use ray_movegen::game_state::game_state::GameState;
use ray_movegen::move_generation::legal_move_generator::generate_legal_moves;
use ray_movegen::moves::move_descriptions::{Move, MoveFlag, MoveList};

fn moves_for(fen: &str) -> MoveList {
    let game = GameState::from_fen(fen).expect("FEN should parse");
    let mut out = MoveList::new();
    generate_legal_moves(&mut out, &game, &[]);
    out
}

fn en_passant_moves(moves: &MoveList) -> Vec<Move> {
    moves
        .iter()
        .copied()
        .filter(|mv| mv.flag() == MoveFlag::EnPassant)
        .collect()
}

#[test]
fn plain_en_passant_is_generated() {
    let moves = moves_for("k6r/8/8/K1Pp4/8/8/8/8 w - d6 0 1");
    assert_eq!(en_passant_moves(&moves), vec![Move::new(34, 43, MoveFlag::EnPassant)]);
    assert_eq!(moves.len(), 7);
}

#[test]
fn en_passant_cannot_ignore_a_rook_check() {
    let moves = moves_for("r7/7k/8/K1pP4/8/8/8/8 w - c6 0 1");
    assert!(en_passant_moves(&moves).is_empty());
    assert_eq!(moves.len(), 2);
}

#[test]
fn en_passant_can_capture_the_checking_pawn() {
    let moves = moves_for("r3b3/7k/8/2pP4/1K6/8/8/2rb4 w - c6 0 1");
    // Every king flight is covered, so the capture is the only answer.
    assert_eq!(moves.as_slice(), &[Move::new(35, 42, MoveFlag::EnPassant)]);
}

#[test]
fn diagonally_pinned_pawn_cannot_leave_its_line() {
    let moves = moves_for("k7/b7/8/2Pp4/3K4/8/8/8 w - d6 0 1");
    assert!(en_passant_moves(&moves).is_empty());
    assert!(moves.iter().all(|mv| mv.start() == 27));
}

#[test]
fn horizontal_discovered_check_suppresses_en_passant() {
    let moves = moves_for("k7/8/8/K1Pp3r/8/8/8/8 w - d6 0 1");
    assert!(en_passant_moves(&moves).is_empty());
    assert_eq!(moves.len(), 6);
}

#[test]
fn blocked_rank_keeps_en_passant_legal() {
    let moves = moves_for("8/8/3p4/KPp4r/1R2PpPk/8/8/ b - e3 0 1");
    assert_eq!(en_passant_moves(&moves), vec![Move::new(29, 20, MoveFlag::EnPassant)]);
    assert_eq!(moves.len(), 16);
}

#[test]
fn both_neighbours_may_take_en_passant() {
    let moves = moves_for("8/8/8/KPpP3r/1R3p1k/8/6P1/ w - c6 1 3");
    assert_eq!(
        en_passant_moves(&moves),
        vec![
            Move::new(33, 42, MoveFlag::EnPassant),
            Move::new(35, 42, MoveFlag::EnPassant)
        ]
    );
    assert_eq!(moves.len(), 17);
}

#[test]
fn pinned_pawn_may_double_push_along_the_pin() {
    let moves = moves_for("2r4k/8/8/8/3p4/8/2P5/2K5 w - - 0 1");
    assert!(moves.contains(Move::new(10, 26, MoveFlag::DoublePawnPush)));
    assert_eq!(moves.len(), 6);
}

#[test]
fn horizontally_pinned_pawn_cannot_push() {
    let moves = moves_for("7k/8/8/8/3p4/8/r1P1K3/8 w - - 0 1");
    assert!(moves.iter().all(|mv| mv.start() == 12));
    assert_eq!(moves.len(), 7);
}

#[test]
fn double_push_can_block_a_check() {
    let moves = moves_for("7k/8/8/4b3/8/8/3P4/K7 w - - 0 1");
    assert!(moves.contains(Move::new(11, 27, MoveFlag::DoublePawnPush)));
    assert!(!moves.contains(Move::new(11, 19, MoveFlag::None)));
    assert_eq!(moves.len(), 3);
}

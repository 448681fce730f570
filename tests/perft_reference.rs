use ray_movegen::game_state::game_state::GameState;
use ray_movegen::move_generation::perft::{perft, REFERENCE_POSITIONS};

/// Node budget for the default test run; deeper counts are `#[ignore]`d.
const FAST_NODE_LIMIT: u64 = 250_000;

fn check_reference(name: &str, max_nodes: u64) {
    let reference = REFERENCE_POSITIONS
        .iter()
        .find(|reference| reference.name == name)
        .expect("reference position should exist");
    let game = GameState::from_fen(reference.fen).expect("reference FEN should parse");

    for (index, &expected) in reference.nodes_by_depth.iter().enumerate() {
        if expected > max_nodes {
            break;
        }
        let depth = index as u8 + 1;
        assert_eq!(
            perft(&game, depth).expect("perft should run"),
            expected,
            "{name} depth {depth}"
        );
    }
}

#[test]
fn start_position() {
    check_reference("start", FAST_NODE_LIMIT);
}

#[test]
fn kiwipete() {
    check_reference("kiwipete", FAST_NODE_LIMIT);
}

#[test]
fn position3() {
    check_reference("position3", FAST_NODE_LIMIT);
}

#[test]
fn position4() {
    check_reference("position4", FAST_NODE_LIMIT);
}

#[test]
fn position5() {
    check_reference("position5", FAST_NODE_LIMIT);
}

#[test]
fn position6() {
    check_reference("position6", FAST_NODE_LIMIT);
}

#[test]
fn mirrored_position4() {
    let game = GameState::from_fen("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1")
        .expect("FEN should parse");
    assert_eq!(perft(&game, 1).expect("perft should run"), 6);
    assert_eq!(perft(&game, 2).expect("perft should run"), 264);
    assert_eq!(perft(&game, 3).expect("perft should run"), 9_467);
}

#[test]
#[ignore = "deep perft; run with --release -- --ignored"]
fn every_reference_depth() {
    for reference in &REFERENCE_POSITIONS {
        check_reference(reference.name, u64::MAX);
    }
}

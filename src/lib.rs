//! Crate root module declarations for the ray_movegen legal move generator.
//!
//! This file exposes the position model, the move encoding and attack tables,
//! the magic-bitboard lookups, the legal move generation pipeline, and the
//! FEN/text utilities so the perft binary, tests, and benches can import
//! stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod rook_moves;
}

pub mod magic {
    pub mod magic_bitboard;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod check_resolver;
    pub mod draw_rules;
    pub mod leaf_emitter;
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod pin_solver;
    pub mod ray_scanner;
    pub mod sliding_moves;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}

pub mod chess_errors;

//! Perft runner for the legal move generator.
//!
//! Usage:
//! `cargo run --release --bin ray-perft -- run --depth 5`
//! `cargo run --release --bin ray-perft -- run --fen "<FEN>" --depth 3 --divide`
//! `cargo run --release --bin ray-perft -- time --depth 4 --iterations 5`
//! `cargo run --release --bin ray-perft -- suite --max-depth 4`

use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ray_movegen::chess_errors::PerftResult;
use ray_movegen::game_state::chess_rules::STARTING_POSITION_FEN;
use ray_movegen::game_state::game_state::GameState;
use ray_movegen::magic::magic_bitboard::MagicTables;
use ray_movegen::move_generation::perft::{perft, perft_divide, REFERENCE_POSITIONS};
use ray_movegen::utils::render_game_state::render_game_state;

#[derive(Parser, Debug)]
#[command(name = "ray-perft", version, about = "Perft driver for the legal move generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of one position.
    Run {
        #[command(flatten)]
        position: PositionArgs,
        /// Print the node count below each root move.
        #[arg(long)]
        divide: bool,
    },
    /// Repeat a perft run and report the average time.
    Time {
        #[command(flatten)]
        position: PositionArgs,
        #[arg(long, default_value_t = 3)]
        iterations: u32,
    },
    /// Check the reference positions against their published counts.
    Suite {
        #[arg(long, default_value_t = 4)]
        max_depth: u8,
    },
}

#[derive(Args, Debug)]
struct PositionArgs {
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,
    #[arg(long, default_value_t = 4)]
    depth: u8,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Run { position, divide } => run(&position, divide),
        Command::Time {
            position,
            iterations,
        } => time(&position, iterations),
        Command::Suite { max_depth } => suite(max_depth),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(%err, "perft failed");
            ExitCode::FAILURE
        }
    }
}

fn run(position: &PositionArgs, divide: bool) -> PerftResult<bool> {
    let game = GameState::from_fen(&position.fen)?;
    println!("{}", render_game_state(&game));
    println!("fen: {}", game.get_fen());

    let started = Instant::now();
    let nodes = if divide {
        let divided = perft_divide(&game, position.depth)?;
        for (mv, nodes) in &divided {
            println!("{mv}: {nodes}");
        }
        divided.iter().map(|(_, nodes)| nodes).sum()
    } else {
        perft(&game, position.depth)?
    };
    let elapsed = started.elapsed();

    println!(
        "depth={} nodes={} elapsed_ms={} nps={}",
        position.depth,
        nodes,
        elapsed.as_millis(),
        nodes_per_second(nodes, elapsed.as_secs_f64())
    );
    Ok(true)
}

fn time(position: &PositionArgs, iterations: u32) -> PerftResult<bool> {
    let game = GameState::from_fen(&position.fen)?;
    let iterations = iterations.max(1);

    // Keep table construction out of the timed loop.
    let started = Instant::now();
    MagicTables::shared();
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "magic tables ready");

    let mut nodes = 0;
    let started = Instant::now();
    for _ in 0..iterations {
        nodes = perft(&game, position.depth)?;
    }
    let average = started.elapsed().as_secs_f64() / f64::from(iterations);

    println!(
        "depth={} nodes={} iterations={} avg_ms={:.3} nps={}",
        position.depth,
        nodes,
        iterations,
        average * 1000.0,
        nodes_per_second(nodes, average)
    );
    Ok(true)
}

fn suite(max_depth: u8) -> PerftResult<bool> {
    let mut all_passed = true;

    for reference in REFERENCE_POSITIONS {
        let game = GameState::from_fen(reference.fen)?;

        for (index, &expected) in reference.nodes_by_depth.iter().enumerate() {
            let depth = index as u8 + 1;
            if depth > max_depth {
                break;
            }

            let started = Instant::now();
            let nodes = perft(&game, depth)?;
            let status = if nodes == expected { "ok" } else { "MISMATCH" };
            all_passed &= nodes == expected;

            println!(
                "{:<10} depth={} nodes={} expected={} elapsed_ms={} {}",
                reference.name,
                depth,
                nodes,
                expected,
                started.elapsed().as_millis(),
                status
            );
        }
    }

    Ok(all_passed)
}

fn nodes_per_second(nodes: u64, seconds: f64) -> u64 {
    if seconds > 0.0 {
        (nodes as f64 / seconds) as u64
    } else {
        0
    }
}

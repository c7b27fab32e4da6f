//! Simulates seeded random games for every built-in difficulty and reports
//! how long each survives. Harder presets should outlast easier ones.

use anyhow::Result;
use clap::Parser;
use flexi_logger::{Logger, WriteMode};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use revtris_core::Board;
use revtris_game::{Game, PieceRule, PieceStream};
use revtris_search::{Difficulty, DifficultyProfile};

#[derive(Parser, Debug)]
#[command(name = "calibrate_difficulty")]
struct Args {
    /// Games per difficulty
    #[arg(long, default_value_t = 64)]
    games: u64,

    /// Stop a game that survives this many pieces
    #[arg(long, default_value_t = 500)]
    max_pieces: u32,

    /// Seed of the first game; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Random piece rule: uniform | bag7
    #[arg(long, default_value_t = PieceRule::Uniform)]
    rule: PieceRule,

    #[arg(long, default_value_t = Board::DEFAULT_WIDTH)]
    width: usize,

    #[arg(long, default_value_t = Board::DEFAULT_HEIGHT)]
    height: usize,

    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, Debug)]
struct GameOutcome {
    pieces: u32,
    lines: u32,
    topped_out: bool,
}

fn play(args: &Args, board: &Board, profile: &DifficultyProfile, seed: u64) -> GameOutcome {
    let mut game = Game::with_board(board.clone(), profile.clone());
    let mut stream = PieceStream::new(seed, args.rule);
    while !game.is_over() && game.pieces_sent() < args.max_pieces {
        if game.send_piece(stream.draw()).is_err() {
            break;
        }
    }
    GameOutcome {
        pieces: game.pieces_sent(),
        lines: game.lines_cleared(),
        topped_out: game.is_over(),
    }
}

fn simulate(args: &Args, board: &Board, profile: &DifficultyProfile) -> Vec<GameOutcome> {
    let seeds = args.seed..args.seed + args.games;
    #[cfg(feature = "rayon")]
    let outcomes = seeds
        .into_par_iter()
        .map(|seed| play(args, board, profile, seed))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let outcomes = seeds.map(|seed| play(args, board, profile, seed)).collect();
    outcomes
}

fn mean(values: impl Iterator<Item = u32>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.map(f64::from).sum::<f64>() / count as f64
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str(args.log_level.as_deref().unwrap_or("warn"))?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .start()?;

    let board = Board::new(args.width, args.height)?;
    println!(
        "{} games per difficulty, {} rule, {}x{}, cap {} pieces",
        args.games, args.rule, args.width, args.height, args.max_pieces
    );
    println!(
        "{:<8} {:>12} {:>12} {:>10}",
        "level", "mean pieces", "mean lines", "topped out"
    );

    for difficulty in Difficulty::ALL {
        let profile = difficulty.profile();
        let outcomes = simulate(&args, &board, &profile);
        let n = outcomes.len();
        let pieces = mean(outcomes.iter().map(|o| o.pieces), n);
        let lines = mean(outcomes.iter().map(|o| o.lines), n);
        let topped = outcomes.iter().filter(|o| o.topped_out).count();
        log::info!("{difficulty}: {n} games simulated");
        println!(
            "{:<8} {:>12.1} {:>12.1} {:>7}/{:<3}",
            difficulty.name(),
            pieces,
            lines,
            topped,
            n
        );
    }
    Ok(())
}

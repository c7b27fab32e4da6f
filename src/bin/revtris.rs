use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};

use revtris_core::{Board, Piece};
use revtris_game::{Game, PieceRule, PieceStream, Turn};
use revtris_search::{Difficulty, DifficultyProfile};

/// Headless reverse Tetris: you pick the pieces, the agent places them.
#[derive(Parser, Debug)]
#[command(name = "revtris", version)]
struct Args {
    /// Built-in difficulty: easy | normal | hard
    #[arg(long, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// JSON difficulty profile; overrides --difficulty
    #[arg(long, conflicts_with = "difficulty")]
    profile: Option<PathBuf>,

    /// Piece letters to send in order, e.g. "TOSZIJL"
    #[arg(long, conflicts_with = "random")]
    pieces: Option<String>,

    /// Send this many random pieces instead of --pieces
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Random piece rule: uniform | bag7
    #[arg(long, default_value_t = PieceRule::Uniform)]
    rule: PieceRule,

    #[arg(long, default_value_t = Board::DEFAULT_WIDTH)]
    width: usize,

    #[arg(long, default_value_t = Board::DEFAULT_HEIGHT)]
    height: usize,

    /// Print the board after every turn
    #[arg(long)]
    verbose_board: bool,

    /// Log filter for flexi_logger, e.g. "debug" or "revtris_search=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str(args.log_level.as_deref().unwrap_or("info"))?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::Default)
        .start()?;

    let profile = load_profile(&args)?;
    let pieces = piece_sequence(&args)?;
    let board = Board::new(args.width, args.height)?;
    let mut game = Game::with_board(board, profile);
    log::info!(
        "playing {} pieces against {} on a {}x{} board",
        pieces.len(),
        game.profile().name,
        args.width,
        args.height
    );

    for (turn_no, piece) in pieces.into_iter().enumerate() {
        if game.is_over() {
            break;
        }
        match game.send_piece(piece)? {
            Turn::Placed {
                placement,
                lines_cleared,
                ..
            } => {
                if args.verbose_board {
                    println!(
                        "#{} {piece}: rotation {} at ({}, {}), {lines_cleared} lines",
                        turn_no + 1,
                        placement.rotation,
                        placement.x,
                        placement.y
                    );
                    print_board(game.board());
                }
            }
            Turn::NoPlacement { .. } => {
                println!("#{} {piece}: no legal placement", turn_no + 1);
            }
        }
    }

    print_board(game.board());
    println!("difficulty    {}", game.profile().name);
    println!("pieces sent   {}", game.pieces_sent());
    println!("lines cleared {}", game.lines_cleared());
    println!("max height    {}", game.max_height());
    println!("score         {}", game.score());
    println!(
        "result        {}",
        if game.is_over() {
            "agent topped out, you win"
        } else {
            "agent survived"
        }
    );
    Ok(())
}

fn load_profile(args: &Args) -> Result<DifficultyProfile> {
    match &args.profile {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading profile {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing profile {}", path.display()))
        }
        None => Ok(args.difficulty.profile()),
    }
}

fn piece_sequence(args: &Args) -> Result<Vec<Piece>> {
    match (&args.pieces, args.random) {
        (Some(letters), _) => letters
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                Piece::from_letter(c).with_context(|| format!("unknown piece letter {c:?}"))
            })
            .collect(),
        (None, Some(count)) => Ok(PieceStream::new(args.seed, args.rule).take(count).collect()),
        (None, None) => bail!("nothing to play: pass --pieces or --random"),
    }
}

fn print_board(board: &Board) {
    for row in board.to_rows() {
        println!("|{row}|");
    }
    println!("+{}+", "-".repeat(board.width()));
}

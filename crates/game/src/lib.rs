//! revtris game crate - a headless session of the reverse game.
//!
//! The player chooses each piece, the agent places it. The player wins when
//! the agent's stack reaches the top row or a piece fits nowhere.

mod pieces;

pub use pieces::{PieceRule, PieceStream, UnknownPieceRule};

use log::{debug, info};
use revtris_core::{Board, ColumnHeights, Piece, Placement};
use revtris_engine::apply_placement_mut;
use revtris_search::{select_move, DifficultyProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points for every piece handed to the agent.
pub const PIECE_POINTS: u32 = 10;
/// Points for a cleared line before the penalty.
pub const LINE_POINTS: u32 = 100;
/// Deducted per cleared line: clearing helps the agent.
pub const LINE_PENALTY: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is over; reset before sending more pieces")]
    GameOver,
}

/// Outcome of sending one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    Placed {
        piece: Piece,
        placement: Placement,
        lines_cleared: usize,
    },
    /// The piece fits nowhere; the game ends.
    NoPlacement { piece: Piece },
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    profile: DifficultyProfile,
    score: u32,
    pieces_sent: u32,
    lines_cleared: u32,
    over: bool,
}

impl Game {
    /// Fresh session on a standard 10x20 board.
    pub fn new(profile: DifficultyProfile) -> Self {
        Self::with_board(Board::standard(), profile)
    }

    /// Session starting from an existing board; its dimensions are kept
    /// across resets.
    pub fn with_board(board: Board, profile: DifficultyProfile) -> Self {
        let over = top_row_occupied(&board);
        Self {
            board,
            profile,
            score: 0,
            pieces_sent: 0,
            lines_cleared: 0,
            over,
        }
    }

    /// Hand `piece` to the agent and apply its choice.
    pub fn send_piece(&mut self, piece: Piece) -> Result<Turn, GameError> {
        if self.over {
            return Err(GameError::GameOver);
        }

        let Some(placement) = select_move(&self.board, &piece.shape(), &self.profile) else {
            self.over = true;
            info!(
                "{} has no room for {piece} after {} pieces, score {}",
                self.profile.name, self.pieces_sent, self.score
            );
            return Ok(Turn::NoPlacement { piece });
        };
        let Some(shape) = piece.rotations().get(placement.rotation) else {
            // selection only yields rotations from the piece's own table
            self.over = true;
            return Ok(Turn::NoPlacement { piece });
        };

        let lines = apply_placement_mut(&mut self.board, shape, &placement);
        self.pieces_sent += 1;
        self.lines_cleared += lines as u32;
        self.score += PIECE_POINTS;
        self.score += lines as u32 * (LINE_POINTS - LINE_PENALTY);
        debug!(
            "{piece} -> r{} x{} y{}, {lines} lines, score {}",
            placement.rotation, placement.x, placement.y, self.score
        );

        if top_row_occupied(&self.board) {
            self.over = true;
            info!(
                "{} topped out after {} pieces, score {}",
                self.profile.name, self.pieces_sent, self.score
            );
        }

        Ok(Turn::Placed {
            piece,
            placement,
            lines_cleared: lines,
        })
    }

    /// Swap the agent's profile; applies from the next piece on.
    pub fn set_difficulty(&mut self, profile: DifficultyProfile) {
        debug!("difficulty {} -> {}", self.profile.name, profile.name);
        self.profile = profile;
    }

    /// Empty the board and zero every counter.
    pub fn reset(&mut self) {
        info!("reset ({} board)", self.profile.name);
        self.board.clear();
        self.score = 0;
        self.pieces_sent = 0;
        self.lines_cleared = 0;
        self.over = false;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pieces_sent(&self) -> u32 {
        self.pieces_sent
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn max_height(&self) -> usize {
        ColumnHeights::new(&self.board).max_height()
    }

    pub fn is_over(&self) -> bool {
        self.over
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DifficultyProfile::default())
    }
}

fn top_row_occupied(board: &Board) -> bool {
    !board.is_row_empty(0)
}

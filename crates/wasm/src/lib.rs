//! revtris-wasm - WebAssembly bindings for the browser game loop.
//!
//! Everything here is data in, data out. Rendering, timers and input stay
//! on the JavaScript side.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use revtris_core::{Board, Cell, Piece, Placement};
use revtris_eval::evaluate;
use revtris_game::Game;
use revtris_search::{select_scored, Difficulty, DifficultyProfile};

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
#[derive(Clone)]
pub struct JsBoard {
    inner: Board,
}

#[wasm_bindgen]
impl JsBoard {
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize) -> Result<JsBoard, JsError> {
        Ok(Self {
            inner: Board::new(width, height)?,
        })
    }

    /// Board from ASCII rows, top row first: `.` empty, `#` garbage, or a
    /// piece letter.
    #[wasm_bindgen(js_name = fromRows)]
    pub fn from_rows(rows: Vec<String>) -> Result<JsBoard, JsError> {
        Ok(Self {
            inner: Board::from_rows(&rows)?,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Cell glyph at `(x, y)`; empty string outside the board.
    pub fn get(&self, x: usize, y: usize) -> String {
        if !self.inner.in_bounds(x, y) {
            return String::new();
        }
        self.inner.get(x, y).glyph().to_string()
    }

    pub fn set(&mut self, x: usize, y: usize, glyph: &str) -> Result<(), JsError> {
        let cell = parse_cell(glyph)?;
        self.inner.try_set(x, y, cell)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = clearLines)]
    pub fn clear_lines(&mut self) -> usize {
        self.inner.clear_lines()
    }

    #[wasm_bindgen(js_name = toRows)]
    pub fn to_rows(&self) -> Vec<String> {
        self.inner.to_rows()
    }
}

/// Placement handed back to JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsPlacement {
    pub rotation: u8,
    pub x: usize,
    pub y: usize,
    pub score: f32,
}

impl JsPlacement {
    fn new(placement: Placement, score: f32) -> Self {
        Self {
            rotation: placement.rotation,
            x: placement.x,
            y: placement.y,
            score,
        }
    }
}

/// Agent's choice for `piece`, or `null` when it fits nowhere.
#[wasm_bindgen(js_name = selectMove)]
pub fn select_move(board: &JsBoard, piece: &str, difficulty: &str) -> Result<JsValue, JsError> {
    let profile = difficulty_profile(difficulty)?;
    select_for_profile(board, piece, &profile)
}

/// [`select_move`] with a profile object (`{ name, weights, policy, seed }`).
#[wasm_bindgen(js_name = selectMoveWithProfile)]
pub fn select_move_with_profile(
    board: &JsBoard,
    piece: &str,
    profile: JsValue,
) -> Result<JsValue, JsError> {
    let profile: DifficultyProfile = serde_wasm_bindgen::from_value(profile)?;
    select_for_profile(board, piece, &profile)
}

fn select_for_profile(
    board: &JsBoard,
    piece: &str,
    profile: &DifficultyProfile,
) -> Result<JsValue, JsError> {
    let piece: Piece = piece.parse()?;
    match select_scored(&board.inner, &piece.shape(), profile) {
        Some(chosen) => Ok(serde_wasm_bindgen::to_value(&JsPlacement::new(
            chosen.placement,
            chosen.score,
        ))?),
        None => Ok(JsValue::NULL),
    }
}

/// Occupancy matrix of `piece` after `times` clockwise quarter turns.
#[wasm_bindgen(js_name = rotatePiece)]
pub fn rotate_piece(piece: &str, times: u32) -> Result<JsValue, JsError> {
    let piece: Piece = piece.parse()?;
    Ok(serde_wasm_bindgen::to_value(
        &piece.shape().rotate(times).to_matrix(),
    )?)
}

/// Heuristic score of the board as it stands under a difficulty's weights.
#[wasm_bindgen(js_name = evaluateBoard)]
pub fn evaluate_board(board: &JsBoard, difficulty: &str) -> Result<f32, JsError> {
    let profile = difficulty_profile(difficulty)?;
    Ok(evaluate(&board.inner, &profile.weights))
}

/// Piece colour for renderers.
#[wasm_bindgen(js_name = pieceColor)]
pub fn piece_color(piece: &str) -> Result<String, JsError> {
    let piece: Piece = piece.parse()?;
    Ok(piece.color().to_string())
}

#[wasm_bindgen]
pub struct JsGame {
    inner: Game,
}

#[wasm_bindgen]
impl JsGame {
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str, width: usize, height: usize) -> Result<JsGame, JsError> {
        let profile = difficulty_profile(difficulty)?;
        Ok(Self {
            inner: Game::with_board(Board::new(width, height)?, profile),
        })
    }

    /// Send a piece; returns the turn as `{ kind: "placed", placement, ... }`
    /// or `{ kind: "no_placement", piece }`.
    #[wasm_bindgen(js_name = sendPiece)]
    pub fn send_piece(&mut self, piece: &str) -> Result<JsValue, JsError> {
        let piece: Piece = piece.parse()?;
        let turn = self.inner.send_piece(piece)?;
        Ok(serde_wasm_bindgen::to_value(&turn)?)
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsError> {
        self.inner.set_difficulty(difficulty_profile(difficulty)?);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    #[wasm_bindgen(getter, js_name = piecesSent)]
    pub fn pieces_sent(&self) -> u32 {
        self.inner.pieces_sent()
    }

    #[wasm_bindgen(getter, js_name = linesCleared)]
    pub fn lines_cleared(&self) -> u32 {
        self.inner.lines_cleared()
    }

    #[wasm_bindgen(getter, js_name = maxHeight)]
    pub fn max_height(&self) -> usize {
        self.inner.max_height()
    }

    #[wasm_bindgen(getter, js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    #[wasm_bindgen(getter)]
    pub fn difficulty(&self) -> String {
        self.inner.profile().name.clone()
    }

    /// Snapshot of the current board.
    pub fn board(&self) -> JsBoard {
        JsBoard {
            inner: self.inner.board().clone(),
        }
    }
}

fn difficulty_profile(name: &str) -> Result<DifficultyProfile, JsError> {
    Ok(name.parse::<Difficulty>()?.profile())
}

fn parse_cell(glyph: &str) -> Result<Cell, JsError> {
    let mut chars = glyph.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(Cell::Empty),
        (Some(c), None) => {
            Cell::from_glyph(c).ok_or_else(|| JsError::new(&format!("unknown cell glyph {c:?}")))
        }
        _ => Err(JsError::new(&format!("unknown cell glyph {glyph:?}"))),
    }
}

//! revtris eval crate - heuristics for board evaluation.
//!
//! Scores are signed linear combinations of structural features. Penalties
//! carry negative weights and line clears a positive one, so a profile can
//! invert either feature just by flipping its sign.

use revtris_core::{Board, ColumnHeights, Placement, Shape};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub aggregate_height: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub completed_lines: f32,
    pub max_height: f32,
    pub wells: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.510066,
            holes: -0.35663,
            bumpiness: -0.184483,
            completed_lines: 0.760666,
            max_height: 0.0,
            wells: 0.0,
        }
    }
}

/// Raw feature values of a board, before weighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: usize,
    pub holes: usize,
    pub bumpiness: usize,
    pub completed_lines: usize,
    pub max_height: usize,
    pub wells: usize,
}

impl BoardFeatures {
    /// Features of a board whose completed lines were already cleared.
    pub fn compute(board: &Board, completed_lines: usize) -> Self {
        let heights = ColumnHeights::new(board);
        Self {
            aggregate_height: heights.aggregate(),
            holes: count_holes(board),
            bumpiness: heights.bumpiness(),
            completed_lines,
            max_height: heights.max_height(),
            wells: heights.wells(),
        }
    }

    /// Features of the board as it would be after `placement`. The live
    /// board is never touched; a copy is placed on and cleared. Rows that
    /// were already full before the placement are cleared but not counted.
    pub fn after_placement(board: &Board, shape: &Shape, placement: &Placement) -> Self {
        let already_full = board.full_row_count();
        let mut next = board.clone();
        next.place(shape, placement);
        let lines = next.clear_lines();
        Self::compute(&next, lines.saturating_sub(already_full))
    }

    pub fn weighted(&self, weights: &EvalWeights) -> f32 {
        self.aggregate_height as f32 * weights.aggregate_height
            + self.holes as f32 * weights.holes
            + self.bumpiness as f32 * weights.bumpiness
            + self.completed_lines as f32 * weights.completed_lines
            + self.max_height as f32 * weights.max_height
            + self.wells as f32 * weights.wells
    }
}

pub fn evaluate(board: &Board, weights: &EvalWeights) -> f32 {
    evaluate_with_clear(board, 0, weights)
}

pub fn evaluate_with_clear(board: &Board, lines: usize, weights: &EvalWeights) -> f32 {
    BoardFeatures::compute(board, lines).weighted(weights)
}

/// Score of the hypothetical board produced by `placement`.
pub fn score_placement(
    board: &Board,
    shape: &Shape,
    placement: &Placement,
    weights: &EvalWeights,
) -> f32 {
    BoardFeatures::after_placement(board, shape, placement).weighted(weights)
}

/// Count total holes in the board (empty cells below filled cells)
pub fn count_holes(board: &Board) -> usize {
    let mut holes = 0;
    for x in 0..board.width() {
        let mut found_block = false;
        for y in 0..board.height() {
            if board.is_filled(x, y) {
                found_block = true;
            } else if found_block {
                holes += 1;
            }
        }
    }
    holes
}

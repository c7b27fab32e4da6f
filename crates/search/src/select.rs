//! Ranking of legal placements and difficulty-driven selection among them.

use std::cmp::Ordering;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use revtris_core::{Board, Placement, RotationTable, Shape};
use revtris_engine::enumerate_placements;
use revtris_eval::{score_placement, EvalWeights};
use serde::{Deserialize, Serialize};

use crate::profile::DifficultyProfile;

/// A legal placement and the heuristic score of the board it produces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlacement {
    pub placement: Placement,
    pub score: f32,
}

/// All legal placements of `shape`, best first.
pub fn rank_moves(board: &Board, shape: &Shape, weights: &EvalWeights) -> Vec<ScoredPlacement> {
    rank_table(board, &RotationTable::for_shape(shape), weights)
}

/// [`rank_moves`] against a prebuilt rotation table.
///
/// Ties on score keep the lower rotation index, then the leftmost column.
pub fn rank_table(
    board: &Board,
    table: &RotationTable,
    weights: &EvalWeights,
) -> Vec<ScoredPlacement> {
    let mut scored: Vec<ScoredPlacement> = enumerate_placements(board, table)
        .into_iter()
        .filter_map(|placement| {
            let shape = table.get(placement.rotation)?;
            let score = score_placement(board, shape, &placement, weights);
            trace!(
                "candidate r{} x{} y{} scores {:.4}",
                placement.rotation,
                placement.x,
                placement.y,
                score
            );
            Some(ScoredPlacement { placement, score })
        })
        .collect();

    scored.sort_by(ranking);
    scored
}

fn ranking(a: &ScoredPlacement, b: &ScoredPlacement) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.placement.rotation.cmp(&b.placement.rotation))
        .then(a.placement.x.cmp(&b.placement.x))
}

/// Choose where `shape` goes under `profile`, or `None` when it fits nowhere.
///
/// The rng is seeded from the board, the shape and the profile seed, so the
/// same inputs always produce the same answer.
pub fn select_move(board: &Board, shape: &Shape, profile: &DifficultyProfile) -> Option<Placement> {
    select_scored(board, shape, profile).map(|scored| scored.placement)
}

/// [`select_move`] keeping the chosen candidate's score.
pub fn select_scored(
    board: &Board,
    shape: &Shape,
    profile: &DifficultyProfile,
) -> Option<ScoredPlacement> {
    let mut rng = StdRng::seed_from_u64(decision_seed(board, shape, profile.seed));
    select_with_rng(board, shape, profile, &mut rng)
}

/// Selection driven by a caller-owned rng.
pub fn select_move_with_rng<R: Rng + ?Sized>(
    board: &Board,
    shape: &Shape,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<Placement> {
    select_with_rng(board, shape, profile, rng).map(|scored| scored.placement)
}

fn select_with_rng<R: Rng + ?Sized>(
    board: &Board,
    shape: &Shape,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<ScoredPlacement> {
    let ranked = rank_moves(board, shape, &profile.weights);
    if ranked.is_empty() {
        debug!("{}: no legal placement for shape\n{}", profile.name, shape);
        return None;
    }

    let index = profile.policy.pick(ranked.len(), rng);
    let chosen = ranked[index];
    debug!(
        "{}: picked #{} of {} (r{} x{} y{}, score {:.4}, best {:.4})",
        profile.name,
        index,
        ranked.len(),
        chosen.placement.rotation,
        chosen.placement.x,
        chosen.placement.y,
        chosen.score,
        ranked[0].score
    );
    Some(chosen)
}

fn decision_seed(board: &Board, shape: &Shape, salt: u64) -> u64 {
    let mut bits = shape
        .cells()
        .fold(0u64, |acc, (x, y)| acc | 1 << (y * 4 + x));
    if let Some(piece) = shape.piece() {
        bits |= (piece.index() as u64 + 1) << 16;
    }
    splitmix(board.zobrist_hash() ^ splitmix(bits) ^ salt)
}

fn splitmix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

//! revtris search crate - ranks legal placements and picks one per
//! difficulty profile.

mod profile;
mod select;

pub use profile::{Difficulty, DifficultyProfile, SelectionPolicy, UnknownDifficulty};
pub use select::{
    rank_moves, rank_table, select_move, select_move_with_rng, select_scored, ScoredPlacement,
};

//! Seeded piece streams for headless play and calibration.

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use revtris_core::Piece;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceRule {
    /// Independent uniform draws.
    #[default]
    Uniform,
    /// Shuffled bags of all seven pieces.
    Bag7,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown piece rule {0:?} (expected uniform or bag7)")]
pub struct UnknownPieceRule(pub String);

impl FromStr for PieceRule {
    type Err = UnknownPieceRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(PieceRule::Uniform),
            "bag7" | "7bag" | "bag" => Ok(PieceRule::Bag7),
            _ => Err(UnknownPieceRule(s.to_string())),
        }
    }
}

impl fmt::Display for PieceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceRule::Uniform => f.write_str("uniform"),
            PieceRule::Bag7 => f.write_str("bag7"),
        }
    }
}

/// Endless piece sequence; the same seed and rule always replay the same
/// pieces.
#[derive(Clone, Debug)]
pub struct PieceStream {
    rule: PieceRule,
    rng: StdRng,
    bag: [Piece; 7],
    // 7 forces a refill on the first bag draw
    bag_idx: usize,
}

impl PieceStream {
    pub fn new(seed: u64, rule: PieceRule) -> Self {
        Self {
            rule,
            rng: StdRng::seed_from_u64(seed),
            bag: Piece::ALL,
            bag_idx: 7,
        }
    }

    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    pub fn draw(&mut self) -> Piece {
        match self.rule {
            PieceRule::Uniform => Piece::ALL[self.rng.gen_range(0..Piece::ALL.len())],
            PieceRule::Bag7 => {
                if self.bag_idx >= self.bag.len() {
                    self.bag = Piece::ALL;
                    self.bag.shuffle(&mut self.rng);
                    self.bag_idx = 0;
                }
                let piece = self.bag[self.bag_idx];
                self.bag_idx += 1;
                piece
            }
        }
    }
}

impl Iterator for PieceStream {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        Some(self.draw())
    }
}

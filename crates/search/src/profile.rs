//! Difficulty presets and selection policies.
//!
//! A difficulty is data: heuristic weights plus a policy for picking among
//! the ranked candidates. New difficulties are new profiles, not new code.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use revtris_eval::EvalWeights;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How to pick from candidates ranked best first.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Always the best candidate.
    #[default]
    Greedy,
    /// Uniform among the `k` best.
    TopK { k: usize },
    /// With probability `chance`, uniform among the `window` worst;
    /// otherwise the best.
    Blunder { chance: f32, window: usize },
    /// Uniform among the `k` worst.
    WorstK { k: usize },
}

impl SelectionPolicy {
    /// True when the policy never consults its rng.
    pub fn is_deterministic(&self) -> bool {
        match *self {
            SelectionPolicy::Greedy => true,
            SelectionPolicy::TopK { k } => k <= 1,
            SelectionPolicy::Blunder { chance, .. } => chance.is_nan() || chance <= 0.0,
            SelectionPolicy::WorstK { .. } => false,
        }
    }

    /// Index into a ranked list of `len` candidates. `len` must be non-zero.
    pub fn pick<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> usize {
        debug_assert!(len > 0, "pick from an empty candidate list");
        match *self {
            SelectionPolicy::Greedy => 0,
            SelectionPolicy::TopK { k } => rng.gen_range(0..k.clamp(1, len)),
            SelectionPolicy::WorstK { k } => len - 1 - rng.gen_range(0..k.clamp(1, len)),
            SelectionPolicy::Blunder { chance, window } => {
                let chance = if chance.is_nan() {
                    0.0
                } else {
                    chance.clamp(0.0, 1.0)
                };
                if rng.gen_bool(chance as f64) {
                    len - 1 - rng.gen_range(0..window.clamp(1, len))
                } else {
                    0
                }
            }
        }
    }
}

/// Named bundle of heuristic weights, selection policy and rng salt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: String,
    #[serde(default)]
    pub weights: EvalWeights,
    #[serde(default)]
    pub policy: SelectionPolicy,
    /// Mixed into the per-decision rng seed.
    #[serde(default)]
    pub seed: u64,
}

impl DifficultyProfile {
    pub fn easy() -> Self {
        Self {
            name: "easy".to_string(),
            weights: EvalWeights {
                aggregate_height: -0.4,
                holes: -0.2,
                bumpiness: -0.1,
                completed_lines: 0.5,
                max_height: 0.0,
                wells: 0.0,
            },
            policy: SelectionPolicy::Blunder {
                chance: 0.35,
                window: 8,
            },
            seed: 0x6561_7379,
        }
    }

    pub fn normal() -> Self {
        Self {
            name: "normal".to_string(),
            weights: EvalWeights::default(),
            policy: SelectionPolicy::TopK { k: 3 },
            seed: 0x6e6f_726d,
        }
    }

    pub fn hard() -> Self {
        Self {
            name: "hard".to_string(),
            weights: EvalWeights::default(),
            policy: SelectionPolicy::Greedy,
            seed: 0x6861_7264,
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?} (expected easy, normal or hard)")]
pub struct UnknownDifficulty(pub String);

/// Built-in difficulty names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::easy(),
            Difficulty::Normal => DifficultyProfile::normal(),
            Difficulty::Hard => DifficultyProfile::hard(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == key)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

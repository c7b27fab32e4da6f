//! Placement definition.

use serde::{Deserialize, Serialize};

use crate::Shape;

/// A resting position: the piece turned `rotation` quarter turns clockwise,
/// left edge at column `x`, top edge at row `y`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub rotation: u8,
    pub x: usize,
    pub y: usize,
}

impl Placement {
    pub const fn new(rotation: u8, x: usize, y: usize) -> Self {
        Self { rotation, x, y }
    }

    /// Board coordinates covered by `shape` (already rotated) at this placement.
    /// Cells whose coordinates would overflow `usize` are skipped.
    pub fn cells<'a>(&self, shape: &'a Shape) -> impl Iterator<Item = (usize, usize)> + 'a {
        let (px, py) = (self.x, self.y);
        shape
            .cells()
            .filter_map(move |(dx, dy)| Some((px.checked_add(dx)?, py.checked_add(dy)?)))
    }
}

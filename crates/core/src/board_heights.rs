//! Column heights precomputed once per board for fast evaluation

use smallvec::SmallVec;

use crate::Board;

/// Heights of every column, measured from the floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnHeights {
    heights: SmallVec<[usize; 16]>,
}

impl ColumnHeights {
    pub fn new(board: &Board) -> Self {
        Self {
            heights: (0..board.width()).map(|x| board.column_height(x)).collect(),
        }
    }

    /// O(1) height lookup
    #[inline(always)]
    pub fn height(&self, x: usize) -> usize {
        self.heights[x]
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[usize] {
        &self.heights
    }

    pub fn max_height(&self) -> usize {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all column heights
    pub fn aggregate(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Sum of absolute height differences between neighbouring columns
    pub fn bumpiness(&self) -> usize {
        self.heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum()
    }

    /// Summed depth of columns lower than both neighbours. Walls count as
    /// infinitely high.
    pub fn wells(&self) -> usize {
        let n = self.heights.len();
        (0..n)
            .map(|x| {
                let left = if x == 0 { usize::MAX } else { self.heights[x - 1] };
                let right = if x + 1 == n {
                    usize::MAX
                } else {
                    self.heights[x + 1]
                };
                let rim = left.min(right);
                if n > 1 && rim > self.heights[x] {
                    rim - self.heights[x]
                } else {
                    0
                }
            })
            .sum()
    }
}

//! Inline placement list - no heap allocation for standard boards

use revtris_core::Placement;
use smallvec::SmallVec;

/// Candidates kept inline: 4 rotations x 10 columns covers a standard board.
pub const INLINE_PLACEMENTS: usize = 40;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementList {
    placements: SmallVec<[Placement; INLINE_PLACEMENTS]>,
}

impl PlacementList {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Placement] {
        &self.placements
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }

    pub fn to_vec(&self) -> Vec<Placement> {
        self.placements.to_vec()
    }

    /// True once the list has moved to the heap (boards wider than 10).
    pub fn spilled(&self) -> bool {
        self.placements.spilled()
    }
}

impl<'a> IntoIterator for &'a PlacementList {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

impl IntoIterator for PlacementList {
    type Item = Placement;
    type IntoIter = smallvec::IntoIter<[Placement; INLINE_PLACEMENTS]>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.placements.into_iter()
    }
}

impl std::ops::Index<usize> for PlacementList {
    type Output = Placement;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.placements[index]
    }
}

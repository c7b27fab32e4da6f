//! Piece occupancy matrices and their rotation states.
//!
//! A shape is at most 4x4, stored as one bitmask per row (bit `c` is column
//! `c`, row 0 is the top). Rotation builds a new shape; nothing is mutated.

use std::borrow::Cow;
use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

use crate::Piece;

pub const MAX_SHAPE_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("shape is {width}x{height}, at most 4x4 is supported")]
    TooLarge { width: usize, height: usize },
    #[error("row {0} of the bounding box has no occupied cell")]
    EmptyRow(usize),
    #[error("column {0} of the bounding box has no occupied cell")]
    EmptyColumn(usize),
    #[error("unknown shape glyph {0:?}")]
    UnknownGlyph(char),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Shape {
    rows: [u8; MAX_SHAPE_SIZE],
    width: u8,
    height: u8,
    piece: Option<Piece>,
}

impl Shape {
    /// Build a shape from a rectangular matrix; non-zero entries are occupied.
    pub fn from_matrix<R: AsRef<[u8]>>(matrix: &[R]) -> Result<Self, ShapeError> {
        let height = matrix.len();
        let width = matrix.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        for (row, cells) in matrix.iter().enumerate() {
            let found = cells.as_ref().len();
            if found != width {
                return Err(ShapeError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        if width > MAX_SHAPE_SIZE || height > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut rows = [0u8; MAX_SHAPE_SIZE];
        for (y, cells) in matrix.iter().enumerate() {
            for (x, &cell) in cells.as_ref().iter().enumerate() {
                if cell != 0 {
                    rows[y] |= 1 << x;
                }
            }
        }
        Self::validated(rows, width as u8, height as u8)
    }

    /// Build a shape from ASCII rows: `.` or space is empty, `#` or a piece
    /// letter is occupied.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ShapeError> {
        let mut matrix: Vec<Vec<u8>> = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for glyph in row.chars() {
                let filled = match glyph {
                    '.' | ' ' => 0,
                    '#' => 1,
                    c if Piece::from_letter(c).is_some() => 1,
                    c => return Err(ShapeError::UnknownGlyph(c)),
                };
                cells.push(filled);
            }
            matrix.push(cells);
        }
        Self::from_matrix(&matrix)
    }

    /// Unchecked constructor for the built-in tetromino tables.
    pub(crate) fn from_bits(bits: &[u8], width: u8) -> Self {
        let mut rows = [0u8; MAX_SHAPE_SIZE];
        rows[..bits.len()].copy_from_slice(bits);
        Self {
            rows,
            width,
            height: bits.len() as u8,
            piece: None,
        }
    }

    fn validated(rows: [u8; MAX_SHAPE_SIZE], width: u8, height: u8) -> Result<Self, ShapeError> {
        let mut columns = 0u8;
        for (y, &row) in rows[..height as usize].iter().enumerate() {
            if row == 0 {
                return Err(ShapeError::EmptyRow(y));
            }
            columns |= row;
        }
        if let Some(x) = (0..width as usize).find(|&x| columns & (1 << x) == 0) {
            return Err(ShapeError::EmptyColumn(x));
        }
        Ok(Self {
            rows,
            width,
            height,
            piece: None,
        })
    }

    /// Tag the shape with the tetromino its cells belong to.
    pub fn with_piece(mut self, piece: Piece) -> Self {
        self.piece = Some(piece);
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    #[inline]
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && (self.rows[y] >> x) & 1 == 1
    }

    /// Occupied cells as `(x, y)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |y| {
            (0..self.width()).filter_map(move |x| self.is_filled(x, y).then_some((x, y)))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    /// Lowest occupied row of a column (largest `y`).
    pub fn column_bottom(&self, x: usize) -> Option<usize> {
        (0..self.height()).rev().find(|&y| self.is_filled(x, y))
    }

    /// True when both shapes cover the same cells, ignoring the piece tag.
    pub fn same_cells(&self, other: &Shape) -> bool {
        self.occupancy() == other.occupancy()
    }

    fn occupancy(&self) -> ([u8; MAX_SHAPE_SIZE], u8, u8) {
        (self.rows, self.width, self.height)
    }

    /// Rotate `times` quarter turns clockwise.
    pub fn rotate(&self, times: u32) -> Shape {
        let mut shape = *self;
        for _ in 0..times % 4 {
            shape = shape.rotate_cw();
        }
        shape
    }

    fn rotate_cw(&self) -> Shape {
        let (w, h) = (self.width(), self.height());
        let mut rows = [0u8; MAX_SHAPE_SIZE];
        // new[r][c] = old[h - 1 - c][r]
        for (r, row) in rows.iter_mut().enumerate().take(w) {
            for c in 0..h {
                if self.is_filled(r, h - 1 - c) {
                    *row |= 1 << c;
                }
            }
        }
        Shape {
            rows,
            width: self.height,
            height: self.width,
            piece: self.piece,
        }
    }

    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|y| (0..self.width()).map(|x| self.is_filled(x, y) as u8).collect())
            .collect()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = self.piece.map(Piece::letter).unwrap_or('#');
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(f, "{}", if self.is_filled(x, y) { glyph } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Free-function form of [`Shape::rotate`].
pub fn rotate(shape: &Shape, times: u32) -> Shape {
    shape.rotate(times)
}

/// Distinct rotation states of a shape, each paired with the smallest
/// rotation count that produces it. Ordered by rotation count.
#[derive(Clone, Debug)]
pub struct RotationTable {
    states: SmallVec<[(u8, Shape); 4]>,
}

impl RotationTable {
    pub fn new(base: &Shape) -> Self {
        let mut seen = FxHashSet::default();
        let mut states = SmallVec::new();
        for rotation in 0..4u8 {
            let shape = base.rotate(rotation as u32);
            if seen.insert(shape.occupancy()) {
                states.push((rotation, shape));
            }
        }
        Self { states }
    }

    /// Static table for a tetromino in spawn orientation, a fresh one for
    /// anything else (custom shapes, pre-rotated tetrominoes).
    pub fn for_shape(shape: &Shape) -> Cow<'static, RotationTable> {
        match shape.piece() {
            Some(piece) if piece.shape() == *shape => Cow::Borrowed(piece.rotations()),
            _ => Cow::Owned(RotationTable::new(shape)),
        }
    }

    /// Shape for a rotation count, if that count is one of the distinct states.
    pub fn get(&self, rotation: u8) -> Option<&Shape> {
        self.states
            .iter()
            .find(|(r, _)| *r == rotation)
            .map(|(_, shape)| shape)
    }

    pub fn base(&self) -> &Shape {
        &self.states[0].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Shape)> {
        self.states.iter().map(|(r, shape)| (*r, shape))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_t_clockwise() {
        let t = Piece::T.shape();
        let east = t.rotate(1);
        assert_eq!(east.width(), 2);
        assert_eq!(east.height(), 3);
        assert_eq!(east.to_matrix(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let i = Piece::I.shape();
        let vertical = rotate(&i, 1);
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        assert_eq!(vertical.cell_count(), 4);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        for piece in Piece::ALL {
            assert_eq!(piece.shape().rotate(0), piece.shape());
        }
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for piece in Piece::ALL {
            let base = piece.shape();
            assert_eq!(base.rotate(4), base);
            assert_eq!(base.rotate(1).rotate(1).rotate(1).rotate(1), base);
            assert_eq!(base.rotate(7), base.rotate(3));
        }
    }

    #[test]
    fn test_rotate_keeps_piece_tag() {
        assert_eq!(Piece::L.shape().rotate(3).piece(), Some(Piece::L));
    }

    #[test]
    fn test_from_matrix_matches_builtin() {
        let s = Shape::from_matrix(&[[0u8, 1, 1], [1, 1, 0]]).unwrap();
        assert!(s.same_cells(&Piece::S.shape()));
        assert_ne!(s, Piece::S.shape());
    }

    #[test]
    fn test_from_matrix_rejects_malformed() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(Shape::from_matrix(&empty), Err(ShapeError::Empty));
        assert_eq!(
            Shape::from_matrix(&[vec![1u8, 1], vec![1]]),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Shape::from_matrix(&[[1u8, 1, 1, 1, 1]]),
            Err(ShapeError::TooLarge {
                width: 5,
                height: 1
            })
        );
        assert_eq!(
            Shape::from_matrix(&[[1u8, 1], [0, 0]]),
            Err(ShapeError::EmptyRow(1))
        );
        assert_eq!(
            Shape::from_matrix(&[[1u8, 0], [1, 0]]),
            Err(ShapeError::EmptyColumn(1))
        );
    }

    #[test]
    fn test_from_rows() {
        let shape = Shape::from_rows(&["#..", "###"]).unwrap();
        assert!(shape.same_cells(&Piece::J.shape()));
        assert_eq!(Shape::from_rows(&["#?"]), Err(ShapeError::UnknownGlyph('?')));
    }

    #[test]
    fn test_column_bottom() {
        let t = Piece::T.shape();
        assert_eq!(t.column_bottom(0), Some(1));
        assert_eq!(t.column_bottom(1), Some(1));
        let s = Piece::S.shape().rotate(1);
        // S east: #. / ## / .#
        assert_eq!(s.column_bottom(0), Some(1));
        assert_eq!(s.column_bottom(1), Some(2));
    }

    #[test]
    fn test_rotation_table_keeps_lowest_count() {
        let table = Piece::I.rotations();
        let rotations: Vec<u8> = table.iter().map(|(r, _)| r).collect();
        assert_eq!(rotations, vec![0, 1]);
        assert!(table.get(2).is_none());
        assert_eq!(table.get(1), Some(&Piece::I.shape().rotate(1)));
        assert_eq!(table.base(), &Piece::I.shape());
    }

    #[test]
    fn test_rotation_table_single_cell() {
        let dot = Shape::from_matrix(&[[1u8]]).unwrap();
        let table = RotationTable::new(&dot);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_for_shape_reuses_static_tables() {
        assert!(matches!(
            RotationTable::for_shape(&Piece::T.shape()),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            RotationTable::for_shape(&Piece::T.shape().rotate(1)),
            Cow::Owned(_)
        ));
        let custom = Shape::from_matrix(&[[1u8, 1]]).unwrap();
        assert_eq!(RotationTable::for_shape(&custom).len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Piece::T.shape().to_string(), ".T.\nTTT\n");
    }
}

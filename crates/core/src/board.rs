//! board representation - row-major grid of tagged cells, row 0 on top
//! zobrist hash of the occupancy maintained incrementally on every set

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{Piece, Placement, Shape};

/// One board square. Renderers use the tag; the engine only asks whether
/// the square is occupied.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Piece),
    /// Occupied with no tetromino tag (custom shapes, fixtures).
    Garbage,
}

impl Cell {
    #[inline(always)]
    pub fn is_filled(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(piece) => piece.letter(),
            Cell::Garbage => '#',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            '.' | ' ' => Some(Cell::Empty),
            '#' => Some(Cell::Garbage),
            c => Piece::from_letter(c).map(Cell::Piece),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("a {width}x{height} board has too many cells to allocate")]
    TooLarge { width: usize, height: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
}

/// Per-cell hash key. splitmix64 over the cell coordinates so that boards of
/// any size hash deterministically across runs.
#[inline]
const fn zobrist_key(x: usize, y: usize) -> u64 {
    let mut z = 0xdead_beef_cafe_1234u64 ^ ((y as u64) << 32 | x as u64);
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Fixed-size playfield. Row 0 is the top, `height - 1` the floor.
/// The grid never changes shape, only cell contents.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    hash: u64,
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<Cell>())
            .ok_or(BoardError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; len],
            hash: 0,
        })
    }

    /// Empty 10x20 board.
    pub fn standard() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; Self::DEFAULT_WIDTH * Self::DEFAULT_HEIGHT],
            hash: 0,
        }
    }

    /// Parse ASCII rows, top row first. See [`Cell::from_glyph`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut board = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(BoardError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or(BoardError::UnknownGlyph {
                    glyph,
                    row: y,
                    col: x,
                })?;
                board.set(x, y, cell);
            }
        }
        Ok(board)
    }

    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| self.row(y).iter().map(|c| c.glyph()).collect())
            .collect()
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    #[inline(always)]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_filled()
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        let was_filled = self.cells[idx].is_filled();
        if was_filled != cell.is_filled() {
            self.hash ^= zobrist_key(x, y);
        }
        self.cells[idx] = cell;
    }

    /// Checked [`Board::set`] for callers holding untrusted coordinates.
    pub fn try_set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), BoardError> {
        if !self.in_bounds(x, y) {
            return Err(BoardError::OutOfBounds { x, y });
        }
        self.set(x, y, cell);
        Ok(())
    }

    /// Incremental occupancy hash, O(1)
    #[inline(always)]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|c| c.is_filled())
    }

    /// Rows that are already complete and would go on the next clear.
    pub fn full_row_count(&self) -> usize {
        (0..self.height).filter(|&y| self.is_row_full(y)).count()
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).iter().all(|c| !c.is_filled())
    }

    /// Topmost occupied row of a column, `None` for an empty column.
    pub fn column_top(&self, x: usize) -> Option<usize> {
        (0..self.height).find(|&y| self.is_filled(x, y))
    }

    /// `height - column_top`, 0 for an empty column.
    pub fn column_height(&self, x: usize) -> usize {
        self.column_top(x).map(|top| self.height - top).unwrap_or(0)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Remove full rows, shift everything above down, return the count.
    pub fn clear_lines(&mut self) -> usize {
        let mut write = self.height;
        let mut cleared = 0;
        for read in (0..self.height).rev() {
            if self.is_row_full(read) {
                cleared += 1;
                continue;
            }
            write -= 1;
            if write != read {
                for x in 0..self.width {
                    let cell = self.get(x, read);
                    self.set(x, write, cell);
                }
            }
        }
        for y in 0..write {
            for x in 0..self.width {
                self.set(x, y, Cell::Empty);
            }
        }
        cleared
    }

    /// Write a shape's cells at a placement, tagged with the shape's piece.
    /// Cells falling outside the board are skipped; legality is the
    /// caller's responsibility.
    pub fn place(&mut self, shape: &Shape, placement: &Placement) {
        let cell = shape.piece().map(Cell::Piece).unwrap_or(Cell::Garbage);
        for (x, y) in placement.cells(shape) {
            if self.in_bounds(x, y) {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to empty, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.hash = 0;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<String> = Vec::deserialize(deserializer)?;
        Board::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for cell in self.row(y) {
                write!(f, "{}", if cell.is_filled() { "[]" } else { " ." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

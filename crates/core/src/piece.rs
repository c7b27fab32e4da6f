//! Tetromino types, their base matrices and display colours.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shape::{RotationTable, Shape};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown piece {0:?} (expected one of I, O, T, S, Z, J, L)")]
pub struct ParsePieceError(pub String);

/// Base shapes, row 0 on top, bit `c` set when column `c` is occupied.
const BASE_ROWS: [&[u8]; 7] = [
    &[0b1111],       // I
    &[0b11, 0b11],   // O
    &[0b010, 0b111], // T
    &[0b110, 0b011], // S
    &[0b011, 0b110], // Z
    &[0b001, 0b111], // J
    &[0b100, 0b111], // L
];

const BASE_WIDTHS: [u8; 7] = [4, 2, 3, 3, 3, 3, 3];

static ROTATION_TABLES: OnceLock<[RotationTable; 7]> = OnceLock::new();

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn letter(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }

    pub fn from_letter(letter: char) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|piece| piece.letter() == letter.to_ascii_uppercase())
    }

    /// Colour used by renderers for cells this piece produced.
    pub const fn color(self) -> &'static str {
        match self {
            Piece::I => "#00f0f0",
            Piece::O => "#f0f000",
            Piece::T => "#a000f0",
            Piece::S => "#00f000",
            Piece::Z => "#f00000",
            Piece::J => "#0000f0",
            Piece::L => "#f0a000",
        }
    }

    /// Spawn orientation of the piece, tagged with the piece itself.
    pub fn shape(self) -> Shape {
        let rows = BASE_ROWS[self.index()];
        Shape::from_bits(rows, BASE_WIDTHS[self.index()]).with_piece(self)
    }

    /// Distinct rotation states, built once per process.
    pub fn rotations(self) -> &'static RotationTable {
        let tables =
            ROTATION_TABLES.get_or_init(|| Piece::ALL.map(|p| RotationTable::new(&p.shape())));
        &tables[self.index()]
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_letter(c).ok_or_else(|| ParsePieceError(s.to_string())),
            _ => Err(ParsePieceError(s.to_string())),
        }
    }
}

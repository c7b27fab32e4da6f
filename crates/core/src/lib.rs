//! revtris core crate - board, piece and shape types shared by the engine.

mod board;
mod board_heights;
mod moves;
mod piece;
mod shape;

pub use board::{Board, BoardError, Cell};
pub use board_heights::ColumnHeights;
pub use moves::Placement;
pub use piece::{ParsePieceError, Piece};
pub use shape::{rotate, RotationTable, Shape, ShapeError, MAX_SHAPE_SIZE};

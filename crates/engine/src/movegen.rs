//! Legal placement enumeration for a piece against a board.

use revtris_core::{Board, Placement, RotationTable, Shape};

use crate::collision::drop_row;
use crate::move_list::PlacementList;

/// Every resting position of every distinct rotation state, ordered by
/// rotation then column. Empty when the piece fits nowhere.
pub fn enumerate_placements(board: &Board, table: &RotationTable) -> PlacementList {
    let mut placements = PlacementList::new();
    for (rotation, shape) in table.iter() {
        if shape.width() > board.width() {
            continue;
        }
        for x in 0..=board.width() - shape.width() {
            if let Ok(y) = drop_row(board, shape, x) {
                placements.push(Placement::new(rotation, x, y));
            }
        }
    }
    placements
}

/// [`enumerate_placements`] for a shape without a prebuilt rotation table.
pub fn enumerate_shape(board: &Board, shape: &Shape) -> PlacementList {
    enumerate_placements(board, &RotationTable::for_shape(shape))
}

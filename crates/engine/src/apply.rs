use revtris_core::{Board, Placement, RotationTable, Shape};

/// Apply a placement to a copy of the board and return the resulting board
/// and lines cleared. `shape` must already be in the placement's rotation.
pub fn apply_placement(board: &Board, shape: &Shape, placement: &Placement) -> (Board, usize) {
    let mut next = board.clone();
    let lines = apply_placement_mut(&mut next, shape, placement);
    (next, lines)
}

/// In-place [`apply_placement`] for the board owner. Every full row is
/// removed, but only rows the placement completed are counted.
pub fn apply_placement_mut(board: &mut Board, shape: &Shape, placement: &Placement) -> usize {
    let already_full = board.full_row_count();
    board.place(shape, placement);
    board.clear_lines().saturating_sub(already_full)
}

/// Rotation state a placement refers to, looked up in the shape's table.
pub fn placed_shape(table: &RotationTable, placement: &Placement) -> Option<Shape> {
    table.get(placement.rotation).copied()
}

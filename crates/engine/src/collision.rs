//! collision detection and resting-row resolution - walls, floor, other blocks

use revtris_core::{Board, Shape};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropError {
    #[error("shape of width {width} does not fit at column {x} on a board {board_width} wide")]
    OutOfBounds {
        x: usize,
        width: usize,
        board_width: usize,
    },
    #[error("no room for the shape in these columns")]
    Blocked,
}

/// does the shape overlap a filled cell or leave the board at (x, y)?
pub fn collides(board: &Board, shape: &Shape, x: usize, y: usize) -> bool {
    shape.cells().any(|(dx, dy)| {
        let (Some(cx), Some(cy)) = (x.checked_add(dx), y.checked_add(dy)) else {
            return true;
        };
        !board.in_bounds(cx, cy) || board.is_filled(cx, cy)
    })
}

/// can we place here? (just !collides)
pub fn can_place(board: &Board, shape: &Shape, x: usize, y: usize) -> bool {
    !collides(board, shape, x, y)
}

/// Row the shape comes to rest on when dropped straight down at column `x`.
///
/// Each shape column lands with its lowest cell just above the topmost
/// filled cell of the board column below it (or on the floor); the shape
/// rests on whichever column stops it first.
pub fn drop_row(board: &Board, shape: &Shape, x: usize) -> Result<usize, DropError> {
    if shape.width() > board.width() || x > board.width() - shape.width() {
        return Err(DropError::OutOfBounds {
            x,
            width: shape.width(),
            board_width: board.width(),
        });
    }

    let mut rest = isize::MAX;
    for dx in 0..shape.width() {
        let Some(bottom) = shape.column_bottom(dx) else {
            continue;
        };
        let floor = board.column_top(x + dx).unwrap_or(board.height());
        rest = rest.min(floor as isize - 1 - bottom as isize);
    }

    // rest + shape.height() - 1 is at most height - 1 by construction; only
    // the top edge can leave the board
    if rest < 0 || rest == isize::MAX {
        return Err(DropError::Blocked);
    }
    Ok(rest as usize)
}

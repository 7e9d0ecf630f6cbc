//! Square numbering on the grid.
//!
//! Squares run back and forth: square 1 is bottom-left, the bottom row runs
//! left to right, the next row right to left, and so on up to `size * size`.

use crate::core::Square;

/// Grid cell of a square as `(row, col)`, row 0 at the bottom.
///
/// Returns `None` for square 0 (off the board) and squares past the goal.
///
/// ```
/// use snakes_ladders::presentation::square_to_cell;
///
/// assert_eq!(square_to_cell(10, 1), Some((0, 0)));
/// assert_eq!(square_to_cell(10, 10), Some((0, 9)));
/// assert_eq!(square_to_cell(10, 11), Some((1, 9)));
/// assert_eq!(square_to_cell(10, 100), Some((9, 0)));
/// assert_eq!(square_to_cell(10, 0), None);
/// ```
#[must_use]
pub fn square_to_cell(size: u32, square: Square) -> Option<(u32, u32)> {
    if square == 0 || square > size * size {
        return None;
    }

    let offset = square - 1;
    let row = offset / size;
    let along = offset % size;
    let col = if row % 2 == 0 { along } else { size - 1 - along };
    Some((row, col))
}

/// Inverse of [`square_to_cell`].
#[must_use]
pub fn cell_to_square(size: u32, row: u32, col: u32) -> Option<Square> {
    if row >= size || col >= size {
        return None;
    }

    let along = if row % 2 == 0 { col } else { size - 1 - col };
    Some(row * size + along + 1)
}

//! The extent of a board and the index math for its flat cell storage
//!
//! Cells are stored column-major, matching the `board[x][y]` layout of the
//! persisted format: the cell at `(x, y)` lives at `x * rows + y`.

use crate::errors::BoardError;
use crate::settings::{MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
use crate::types::Position;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A `cols` x `rows` board extent
pub struct Dimensions {
    cols: u8,
    rows: u8,
}

impl Dimensions {
    /// Validates both extents against `[2, 15]`, columns first
    pub fn new(cols: usize, rows: usize) -> Result<Self, BoardError> {
        check_range("cols", cols, MIN_COLS, MAX_COLS)?;
        check_range("rows", rows, MIN_ROWS, MAX_ROWS)?;
        Ok(Dimensions {
            cols: cols as u8,
            rows: rows as u8,
        })
    }

    /// Get the number of columns
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Get the number of rows
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// number of cells
    pub fn area(&self) -> usize {
        self.cols() * self.rows()
    }

    #[allow(missing_docs)]
    pub fn contains(&self, pos: &Position) -> bool {
        !pos.is_out_of_bounds(self.cols(), self.rows())
    }

    /// the flat index of `pos`, failing when it is not on the board
    pub fn index_of(&self, pos: &Position) -> Result<usize, BoardError> {
        if self.contains(pos) {
            Ok(self.index_unchecked(pos))
        } else {
            Err(BoardError::PositionOutOfBounds {
                x: pos.x,
                y: pos.y,
                cols: self.cols(),
                rows: self.rows(),
            })
        }
    }

    pub(crate) fn index_unchecked(&self, pos: &Position) -> usize {
        debug_assert!(self.contains(pos));
        pos.x * self.rows() + pos.y
    }
}

pub(crate) fn check_range(
    what: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), BoardError> {
    if value < min || value > max {
        return Err(BoardError::OutOfRange {
            what,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Dimensions::new(2, 2).is_ok());
        assert!(Dimensions::new(15, 15).is_ok());
        assert_eq!(
            Dimensions::new(1, 5),
            Err(BoardError::OutOfRange {
                what: "cols",
                value: 1,
                min: 2,
                max: 15
            })
        );
        assert_eq!(
            Dimensions::new(5, 16),
            Err(BoardError::OutOfRange {
                what: "rows",
                value: 16,
                min: 2,
                max: 15
            })
        );
    }

    #[test]
    fn test_index_is_column_major() {
        let dims = Dimensions::new(4, 3).unwrap();
        assert_eq!(dims.index_of(&Position::new(0, 2)), Ok(2));
        assert_eq!(dims.index_of(&Position::new(1, 0)), Ok(3));
        let mut index = 0;
        for x in 0..dims.cols() {
            for y in 0..dims.rows() {
                assert_eq!(dims.index_of(&Position::new(x, y)), Ok(index));
                index += 1;
            }
        }
        assert_eq!(index, dims.area());
        assert!(dims.index_of(&Position::new(4, 0)).is_err());
    }
}

#![allow(missing_docs)]
//! types to match the persisted board document
mod field_error;

pub use field_error::FieldError;

use crate::compact_representation::pipe::MAX_PIPE_MASK;
use crate::compact_representation::Board;
use crate::errors::BoardError;
use crate::settings::{MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Struct that matches the `source` object of the document. Either coordinate
/// may be missing so partial input can be reported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceData {
    pub x: Option<i64>,
    pub y: Option<i64>,
}

impl From<Position> for SourceData {
    fn from(pos: Position) -> Self {
        SourceData {
            x: Some(pos.x as i64),
            y: Some(pos.y as i64),
        }
    }
}

/// Root object of a persisted board. `board` is column-major, `board[x][y]`
/// holds the opening mask of the cell at `(x, y)`:
/// ```
/// # use flood_pipe::wire_representation::{BoardData, FieldError};
/// let json = r#"{"source":{"x":0,"y":0},"overflow":false,"board":[[6,3],[12,9]]}"#;
/// let data = BoardData::from_json(json).unwrap();
/// assert_eq!(data.validate(), FieldError::ErrNull);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardData {
    pub source: Option<SourceData>,
    pub overflow: Option<bool>,
    pub board: Option<Vec<Vec<i64>>>,
}

impl BoardData {
    pub fn new(source: Option<SourceData>, overflow: Option<bool>, board: Option<Vec<Vec<i64>>>) -> Self {
        BoardData {
            source,
            overflow,
            board,
        }
    }

    /// a snapshot of `board`, ready to be persisted
    pub fn from_board(board: &Board) -> Self {
        BoardData {
            source: board.source().map(SourceData::from),
            overflow: Some(board.overflow()),
            board: Some(board.to_mask_grid()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reports the first problem with this data, or [`FieldError::ErrNull`] when
    /// it describes a loadable board. The order of the checks is fixed, callers
    /// show the first one only.
    pub fn validate(&self) -> FieldError {
        let source = match self.source {
            Some(source) => source,
            None => return FieldError::ErrNoSource,
        };
        let (x, y) = match (source.x, source.y) {
            (Some(x), Some(y)) => (x, y),
            _ => return FieldError::ErrSourceOnlyOneValue,
        };
        if x < 0 || y < 0 {
            return FieldError::ErrNegativeSource;
        }
        if self.overflow.is_none() {
            return FieldError::ErrNoOverflow;
        }
        let board = match &self.board {
            Some(board) => board,
            None => return FieldError::ErrNoBoard,
        };

        let (x, y) = (x as usize, y as usize);
        let cols = board.len();
        let rows = board.first().map_or(0, |column| column.len());
        if x >= cols || y >= rows {
            return FieldError::ErrSourceOutOfBounds;
        }
        if cols < MIN_COLS || cols > MAX_COLS {
            return FieldError::ErrInvalidCols;
        }
        if rows < MIN_ROWS || rows > MAX_ROWS {
            return FieldError::ErrInvalidRows;
        }
        // a short column x falls through to the uneven check below
        if board[x].get(y) == Some(&0) {
            return FieldError::ErrSourcePositionWall;
        }
        if board.iter().any(|column| column.len() != rows) {
            return FieldError::ErrColsUneven;
        }
        if board.iter().flatten().any(|mask| !(0..=MAX_PIPE_MASK).contains(mask)) {
            return FieldError::ErrWrongPipeValue;
        }
        FieldError::ErrNull
    }
}

impl TryFrom<BoardData> for Board {
    type Error = BoardError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let error = data.validate();
        if error.is_error() {
            return Err(BoardError::InvalidBoardData(error));
        }
        let source = data
            .source
            .and_then(|s| s.x.zip(s.y))
            .map(|(x, y)| Position::try_new(x, y))
            .transpose()?;
        let grid = data.board.unwrap_or_default();
        Board::from_mask_grid(&grid, source, data.overflow.unwrap_or(false))
    }
}

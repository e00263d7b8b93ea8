use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of validating externally supplied board data.
///
/// Validation problems are values, not failures: [`FieldError::ErrNull`] is the
/// "no error" sentinel and every other variant names the first problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldError {
    /// the data is valid
    ErrNull,
    /// there was no data at all
    ErrEmpty,
    #[allow(missing_docs)]
    ErrNoSource,
    /// the source has only one of its two coordinates
    ErrSourceOnlyOneValue,
    #[allow(missing_docs)]
    ErrNegativeSource,
    #[allow(missing_docs)]
    ErrNoOverflow,
    #[allow(missing_docs)]
    ErrNoBoard,
    #[allow(missing_docs)]
    ErrSourceOutOfBounds,
    /// column count outside of `[2, 15]`
    ErrInvalidCols,
    /// row count of the first column outside of `[2, 15]`
    ErrInvalidRows,
    /// the source sits on a cell with mask 0
    ErrSourcePositionWall,
    /// columns of different lengths
    ErrColsUneven,
    /// a cell mask outside of `[0, 14]`
    ErrWrongPipeValue,
}

impl FieldError {
    /// false only for [`FieldError::ErrNull`]
    pub fn is_error(&self) -> bool {
        *self != FieldError::ErrNull
    }

    /// the stable error code, e.g. `ERR_NO_SOURCE`
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::ErrNull => "ERR_NULL",
            FieldError::ErrEmpty => "ERR_EMPTY",
            FieldError::ErrNoSource => "ERR_NO_SOURCE",
            FieldError::ErrSourceOnlyOneValue => "ERR_SOURCE_ONLY_ONE_VALUE",
            FieldError::ErrNegativeSource => "ERR_NEGATIVE_SOURCE",
            FieldError::ErrNoOverflow => "ERR_NO_OVERFLOW",
            FieldError::ErrNoBoard => "ERR_NO_BOARD",
            FieldError::ErrSourceOutOfBounds => "ERR_SOURCE_OUT_OF_BOUNDS",
            FieldError::ErrInvalidCols => "ERR_INVALID_COLS",
            FieldError::ErrInvalidRows => "ERR_INVALID_ROWS",
            FieldError::ErrSourcePositionWall => "ERR_SOURCE_POSITION_WALL",
            FieldError::ErrColsUneven => "ERR_COLS_UNEVEN",
            FieldError::ErrWrongPipeValue => "ERR_WRONG_PIPE_VALUE",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            FieldError::ErrNull => "no error",
            FieldError::ErrEmpty => "there is no board data",
            FieldError::ErrNoSource => "no source position was given",
            FieldError::ErrSourceOnlyOneValue => "the source position needs both coordinates",
            FieldError::ErrNegativeSource => "the source position has a negative coordinate",
            FieldError::ErrNoOverflow => "the overflow flag is missing",
            FieldError::ErrNoBoard => "there is no board",
            FieldError::ErrSourceOutOfBounds => "the source position is not on the board",
            FieldError::ErrInvalidCols => "the board needs between 2 and 15 columns",
            FieldError::ErrInvalidRows => "the board needs between 2 and 15 rows",
            FieldError::ErrSourcePositionWall => "the source position is a wall",
            FieldError::ErrColsUneven => "the columns of the board differ in length",
            FieldError::ErrWrongPipeValue => "a cell value is not between 0 and 14",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_null_is_not_an_error() {
        assert!(!FieldError::ErrNull.is_error());
        assert!(FieldError::ErrEmpty.is_error());
        assert!(FieldError::ErrWrongPipeValue.is_error());
    }

    #[test]
    fn test_codes_match_serde_names() {
        for error in [
            FieldError::ErrNull,
            FieldError::ErrSourceOnlyOneValue,
            FieldError::ErrSourcePositionWall,
            FieldError::ErrColsUneven,
        ]
        .iter()
        {
            let json = serde_json::to_string(error).unwrap();
            assert_eq!(json, format!("\"{}\"", error.code()));
        }
    }

    #[test]
    fn test_display_names_the_code() {
        assert_eq!(
            FieldError::ErrNoBoard.to_string(),
            "there is no board (ERR_NO_BOARD)"
        );
    }
}

//! the structural error channel. these are caller bugs (bad coordinates, bad
//! sizes, bad glyphs), not problems with externally supplied board data, which
//! are reported through [`FieldError`](crate::wire_representation::FieldError)
use thiserror::Error;

use crate::wire_representation::FieldError;

/// Errors raised by board construction and mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// a coordinate was negative
    #[error("coordinate ({x}, {y}) must not be negative")]
    InvalidCoordinate {
        #[allow(missing_docs)]
        x: i64,
        #[allow(missing_docs)]
        y: i64,
    },

    /// a numeric parameter fell outside of its allowed range
    #[error("{what} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        /// name of the offending parameter
        what: &'static str,
        #[allow(missing_docs)]
        value: i64,
        #[allow(missing_docs)]
        min: i64,
        #[allow(missing_docs)]
        max: i64,
    },

    /// a position does not lie on the board
    #[error("position ({x}, {y}) is not on a {cols}x{rows} board")]
    PositionOutOfBounds {
        #[allow(missing_docs)]
        x: usize,
        #[allow(missing_docs)]
        y: usize,
        #[allow(missing_docs)]
        cols: usize,
        #[allow(missing_docs)]
        rows: usize,
    },

    /// the source was placed on a wall
    #[error("the source at ({x}, {y}) must not be a wall")]
    SourceOnWall {
        #[allow(missing_docs)]
        x: usize,
        #[allow(missing_docs)]
        y: usize,
    },

    /// a character that is not one of the fifteen pipe glyphs
    #[error("unknown pipe glyph {0:?}")]
    UnknownGlyph(char),

    /// an opening mask outside of 0..=14
    #[error("opening mask {0} is not a valid pipe")]
    InvalidMask(i64),

    /// glyph rows or mask columns of different lengths, or none at all
    #[error("grid lines must be non-empty and of equal length")]
    RaggedGrid,

    /// the accept/reject loop of the generator ran out of attempts
    #[error("no acceptable board after {attempts} generation attempts")]
    GenerationExhausted {
        #[allow(missing_docs)]
        attempts: u32,
    },

    /// board data was rejected by validation
    #[error("invalid board data: {0}")]
    InvalidBoardData(FieldError),
}

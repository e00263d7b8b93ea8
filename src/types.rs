//! various types that are useful for working with flood-pipe boards
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::errors::BoardError;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x offset, positive is to the right
    pub x: i64,
    /// y offset, positive is downwards (row 0 is the top row)
    pub y: i64,
}

/// One side of a cell. Each direction owns a single bit of the 4 bit opening mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[allow(missing_docs)]
    Top,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Bottom,
    #[allow(missing_docs)]
    Left,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Top => write!(f, "top"),
            Direction::Right => write!(f, "right"),
            Direction::Bottom => write!(f, "bottom"),
            Direction::Left => write!(f, "left"),
        }
    }
}

impl Direction {
    /// returns all directions, in mask order
    pub const fn all() -> [Direction; 4] {
        [
            Direction::Top,
            Direction::Right,
            Direction::Bottom,
            Direction::Left,
        ]
    }

    /// the bit this direction occupies in an opening mask
    pub const fn mask(self) -> u8 {
        match self {
            Direction::Top => 0b0001,
            Direction::Right => 0b0010,
            Direction::Bottom => 0b0100,
            Direction::Left => 0b1000,
        }
    }

    /// the direction facing the other way, TOP<->BOTTOM and LEFT<->RIGHT
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// convert this direction to a unit vector
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Top => Vector { x: 0, y: -1 },
            Direction::Right => Vector { x: 1, y: 0 },
            Direction::Bottom => Vector { x: 0, y: 1 },
            Direction::Left => Vector { x: -1, y: 0 },
        }
    }
}

/// The set of sides a piece is open to, packed in to the low 4 bits of a byte
/// using the [`Direction::mask`] bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Openings(u8);

impl Openings {
    /// no openings at all
    pub const NONE: Openings = Openings(0);

    /// builds an opening set from a raw mask, bits above the low four are dropped
    pub const fn from_mask(mask: u8) -> Self {
        Openings(mask & 0x0F)
    }

    /// the raw mask of this set
    pub const fn mask(self) -> u8 {
        self.0
    }

    /// does this set contain `dir`
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.mask() != 0
    }

    /// returns a copy of this set with `dir` added
    #[must_use]
    pub const fn with(self, dir: Direction) -> Self {
        Openings(self.0 | dir.mask())
    }

    /// adds `dir` to this set
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.mask();
    }

    /// the union of both sets
    #[must_use]
    pub const fn union(self, other: Openings) -> Self {
        Openings(self.0 | other.0)
    }

    /// number of openings in the set
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[allow(missing_docs)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// every opening of `self` is also in `other`
    pub const fn is_subset(self, other: Openings) -> bool {
        self.0 & !other.0 == 0
    }

    /// iterate the contained directions in mask order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        IntoIterator::into_iter(Direction::all()).filter(move |dir| self.contains(*dir))
    }

    /// the set holds TOP and BOTTOM, or LEFT and RIGHT
    pub const fn has_opposing_pair(self) -> bool {
        (self.contains(Direction::Top) && self.contains(Direction::Bottom))
            || (self.contains(Direction::Left) && self.contains(Direction::Right))
    }

    /// the set holds one vertical and one horizontal opening
    pub const fn has_adjacent_pair(self) -> bool {
        (self.contains(Direction::Top) || self.contains(Direction::Bottom))
            && (self.contains(Direction::Left) || self.contains(Direction::Right))
    }
}

impl std::iter::FromIterator<Direction> for Openings {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut openings = Openings::NONE;
        for dir in iter {
            openings.insert(dir);
        }
        openings
    }
}

/// A cell coordinate, `x` is the column and `y` is the row. Both are
/// non-negative by construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// column
    pub x: usize,
    /// row
    pub y: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    /// makes a new position
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// makes a new position from signed coordinates, failing on negative input
    pub fn try_new(x: i64, y: i64) -> Result<Self, BoardError> {
        if x < 0 || y < 0 {
            return Err(BoardError::InvalidCoordinate { x, y });
        }
        Ok(Position::new(x as usize, y as usize))
    }

    /// true if this position lies outside a `cols` x `rows` board
    pub fn is_out_of_bounds(&self, cols: usize, rows: usize) -> bool {
        self.x >= cols || self.y >= rows
    }

    /// The position one step towards `dir` on a `cols` x `rows` board. With
    /// `overflow` the step wraps around the board edges, otherwise stepping off the
    /// board yields `None`.
    pub fn neighbor(
        &self,
        cols: usize,
        rows: usize,
        dir: Direction,
        overflow: bool,
    ) -> Option<Position> {
        let v = dir.to_vector();
        let mut x = self.x as i64 + v.x;
        let mut y = self.y as i64 + v.y;
        if overflow {
            x = wrap(x, cols as i64);
            y = wrap(y, rows as i64);
        }
        if x < 0 || y < 0 {
            return None;
        }
        let pos = Position::new(x as usize, y as usize);
        if pos.is_out_of_bounds(cols, rows) {
            None
        } else {
            Some(pos)
        }
    }
}

fn wrap(coordinate: i64, extent: i64) -> i64 {
    if extent <= 0 {
        // nothing to wrap in to, the bounds check rejects it
        return coordinate;
    }
    if coordinate < 0 {
        extent - 1
    } else {
        coordinate % extent
    }
}

impl TryFrom<(i64, i64)> for Position {
    type Error = BoardError;

    fn try_from((x, y): (i64, i64)) -> Result<Self, Self::Error> {
        Position::try_new(x, y)
    }
}

/// a board for which the size can be determined
pub trait SizeDeterminableBoard {
    #[allow(missing_docs)]
    fn cols(&self) -> usize;
    #[allow(missing_docs)]
    fn rows(&self) -> usize;

    /// all positions of the board, column by column
    fn positions(&self) -> Vec<Position> {
        let rows = self.rows();
        (0..self.cols())
            .flat_map(|x| (0..rows).map(move |y| Position::new(x, y)))
            .collect()
    }
}

/// a board for which the neighbors of a given Position can be determined
pub trait NeighborDeterminableBoard: SizeDeterminableBoard {
    /// returns the neighboring positions, honoring wraparound
    fn neighbors(&self, pos: &Position) -> Vec<(Direction, Position)>;

    /// returns the neighbors which `pos` has a mutually matching opening with
    fn connected_neighbors(&self, pos: &Position) -> Vec<(Direction, Position)>;
}

/// a board which can decide whether it is solved
pub trait SolvedDeterminableBoard {
    /// true when a source exists, no opening dangles and every pipe is fed by the source
    fn is_solved(&self) -> bool;
}

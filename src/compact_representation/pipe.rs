//! pipe pieces. A piece is a type plus one of four rotations, the openings are
//! always derived from that pair and never stored.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::BoardError;
use crate::types::{Direction, Openings};

/// The shape of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeType {
    /// two opposing openings
    Line,
    /// two adjacent openings
    Curve,
    /// three openings
    TPiece,
    /// a single opening
    DeadEnd,
    /// no openings, cannot be rotated
    Wall,
}

impl PipeType {
    /// returns all pipe types
    pub const fn all() -> [PipeType; 5] {
        [
            PipeType::Line,
            PipeType::Curve,
            PipeType::TPiece,
            PipeType::DeadEnd,
            PipeType::Wall,
        ]
    }
}

/// Quarter turn state of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[allow(missing_docs)]
    Normal,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Inverted,
    #[allow(missing_docs)]
    Left,
}

impl Rotation {
    /// returns all rotations in clockwise order
    pub const fn all() -> [Rotation; 4] {
        [
            Rotation::Normal,
            Rotation::Right,
            Rotation::Inverted,
            Rotation::Left,
        ]
    }

    #[allow(missing_docs)]
    pub fn as_index(&self) -> usize {
        match self {
            Rotation::Normal => 0,
            Rotation::Right => 1,
            Rotation::Inverted => 2,
            Rotation::Left => 3,
        }
    }

    /// the rotation one quarter turn clockwise (or counter-clockwise) from this one
    pub fn turned(self, clockwise: bool) -> Rotation {
        let steps = if clockwise { 1 } else { 3 };
        Rotation::all()[(self.as_index() + steps) % 4]
    }
}

// glyph, type, rotation. One entry per distinguishable shape, plus the wall.
const GLYPHS: [(char, PipeType, Rotation); 15] = [
    ('╸', PipeType::DeadEnd, Rotation::Normal),
    ('╹', PipeType::DeadEnd, Rotation::Right),
    ('╺', PipeType::DeadEnd, Rotation::Inverted),
    ('╻', PipeType::DeadEnd, Rotation::Left),
    ('━', PipeType::Line, Rotation::Normal),
    ('┃', PipeType::Line, Rotation::Right),
    ('┏', PipeType::Curve, Rotation::Normal),
    ('┓', PipeType::Curve, Rotation::Right),
    ('┛', PipeType::Curve, Rotation::Inverted),
    ('┗', PipeType::Curve, Rotation::Left),
    ('┣', PipeType::TPiece, Rotation::Normal),
    ('┳', PipeType::TPiece, Rotation::Right),
    ('┫', PipeType::TPiece, Rotation::Inverted),
    ('┻', PipeType::TPiece, Rotation::Left),
    ('╳', PipeType::Wall, Rotation::Normal),
];

/// The largest valid opening mask, an all-open piece does not exist
pub const MAX_PIPE_MASK: i64 = 14;

/// A single piece on the board.
///
/// Equality compares the type and the opening set, not the rotation: a LINE at
/// [`Rotation::Normal`] equals a LINE at [`Rotation::Inverted`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    pipe_type: PipeType,
    rotation: Rotation,
}

impl PartialEq for Pipe {
    fn eq(&self, other: &Self) -> bool {
        self.pipe_type == other.pipe_type && self.openings() == other.openings()
    }
}

impl Eq for Pipe {}

impl Hash for Pipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pipe_type.hash(state);
        self.openings().hash(state);
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl Pipe {
    /// a new piece of the given type at [`Rotation::Normal`]
    pub const fn new(pipe_type: PipeType) -> Self {
        Pipe {
            pipe_type,
            rotation: Rotation::Normal,
        }
    }

    #[allow(missing_docs)]
    pub const fn with_rotation(pipe_type: PipeType, rotation: Rotation) -> Self {
        Pipe {
            pipe_type,
            rotation,
        }
    }

    /// a wall
    pub const fn wall() -> Self {
        Pipe::new(PipeType::Wall)
    }

    #[allow(missing_docs)]
    pub fn pipe_type(&self) -> PipeType {
        self.pipe_type
    }

    #[allow(missing_docs)]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[allow(missing_docs)]
    pub fn is_wall(&self) -> bool {
        self.pipe_type == PipeType::Wall
    }

    /// the sides this piece is open to
    pub fn openings(&self) -> Openings {
        use Direction::*;
        let dirs: &[Direction] = match (self.pipe_type, self.rotation) {
            (PipeType::Wall, _) => &[],
            (PipeType::DeadEnd, Rotation::Normal) => &[Left],
            (PipeType::DeadEnd, Rotation::Right) => &[Top],
            (PipeType::DeadEnd, Rotation::Inverted) => &[Right],
            (PipeType::DeadEnd, Rotation::Left) => &[Bottom],
            (PipeType::Line, Rotation::Normal) | (PipeType::Line, Rotation::Inverted) => {
                &[Left, Right]
            }
            (PipeType::Line, Rotation::Right) | (PipeType::Line, Rotation::Left) => {
                &[Top, Bottom]
            }
            (PipeType::Curve, Rotation::Normal) => &[Right, Bottom],
            (PipeType::Curve, Rotation::Right) => &[Left, Bottom],
            (PipeType::Curve, Rotation::Inverted) => &[Left, Top],
            (PipeType::Curve, Rotation::Left) => &[Right, Top],
            (PipeType::TPiece, Rotation::Normal) => &[Top, Right, Bottom],
            (PipeType::TPiece, Rotation::Right) => &[Right, Bottom, Left],
            (PipeType::TPiece, Rotation::Inverted) => &[Top, Bottom, Left],
            (PipeType::TPiece, Rotation::Left) => &[Top, Right, Left],
        };
        dirs.iter().copied().collect()
    }

    /// the OR of the mask bits of every opening
    pub fn mask(&self) -> u8 {
        self.openings().mask()
    }

    /// Decodes a piece from an opening mask in `0..=14`. The type follows from the
    /// number of openings and the rotation is the canonical one for that set.
    pub fn from_mask(mask: i64) -> Result<Self, BoardError> {
        if !(0..=MAX_PIPE_MASK).contains(&mask) {
            return Err(BoardError::InvalidMask(mask));
        }
        let openings = Openings::from_mask(mask as u8);
        let pipe_type = match openings.len() {
            0 => PipeType::Wall,
            1 => PipeType::DeadEnd,
            2 if openings.has_opposing_pair() => PipeType::Line,
            2 => PipeType::Curve,
            _ => PipeType::TPiece,
        };
        let rotation = canonical_rotation(pipe_type, openings);
        Ok(Pipe::with_rotation(pipe_type, rotation))
    }

    /// decodes one of the fifteen box drawing glyphs
    pub fn from_glyph(glyph: char) -> Result<Self, BoardError> {
        GLYPHS
            .iter()
            .find(|(c, _, _)| *c == glyph)
            .map(|(_, pipe_type, rotation)| Pipe::with_rotation(*pipe_type, *rotation))
            .ok_or(BoardError::UnknownGlyph(glyph))
    }

    /// the box drawing glyph for this piece
    pub fn glyph(&self) -> char {
        let rotation = match (self.pipe_type, self.rotation) {
            (PipeType::Wall, _) => Rotation::Normal,
            (PipeType::Line, Rotation::Inverted) => Rotation::Normal,
            (PipeType::Line, Rotation::Left) => Rotation::Right,
            (_, rotation) => rotation,
        };
        GLYPHS
            .iter()
            .find(|(_, pipe_type, r)| *pipe_type == self.pipe_type && *r == rotation)
            .map(|(c, _, _)| *c)
            .unwrap_or('╳')
    }

    /// a quarter turn, walls never turn
    pub fn rotate(&mut self, clockwise: bool) {
        if !self.is_wall() {
            self.rotation = self.rotation.turned(clockwise);
        }
    }

    /// applies between zero and three clockwise quarter turns
    pub fn random_rotate(&mut self, rng: &mut impl Rng) {
        let turns = rng.gen_range(0..4);
        for _ in 0..turns {
            self.rotate(true);
        }
    }
}

fn canonical_rotation(pipe_type: PipeType, openings: Openings) -> Rotation {
    let has = |dir| openings.contains(dir);
    match pipe_type {
        PipeType::DeadEnd if has(Direction::Left) => Rotation::Normal,
        PipeType::DeadEnd if has(Direction::Right) => Rotation::Inverted,
        PipeType::DeadEnd if has(Direction::Top) => Rotation::Right,
        PipeType::DeadEnd => Rotation::Left,
        PipeType::Line if has(Direction::Left) => Rotation::Normal,
        PipeType::Line => Rotation::Right,
        PipeType::Curve if has(Direction::Right) && has(Direction::Bottom) => Rotation::Normal,
        PipeType::Curve if has(Direction::Left) && has(Direction::Bottom) => Rotation::Right,
        PipeType::Curve if has(Direction::Left) && has(Direction::Top) => Rotation::Inverted,
        PipeType::Curve => Rotation::Left,
        PipeType::TPiece if !has(Direction::Left) => Rotation::Normal,
        PipeType::TPiece if !has(Direction::Right) => Rotation::Inverted,
        PipeType::TPiece if !has(Direction::Top) => Rotation::Right,
        PipeType::TPiece => Rotation::Left,
        PipeType::Wall => Rotation::Normal,
    }
}

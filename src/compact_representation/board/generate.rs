//! random generation of solvable boards
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::compact_representation::dimensions::Dimensions;
use crate::compact_representation::pipe::{Pipe, PipeType};
use crate::errors::BoardError;
use crate::settings::{GenerationLimits, Settings};
use crate::types::{Direction, Openings, Position, SizeDeterminableBoard};

use super::Board;

/// A partially filled grid, `None` marks a cell no branch has reached yet
struct Scaffold {
    dimensions: Dimensions,
    overflow: bool,
    cells: Vec<Option<Pipe>>,
}

impl Scaffold {
    fn new(dimensions: Dimensions, overflow: bool) -> Self {
        Scaffold {
            dimensions,
            overflow,
            cells: vec![None; dimensions.area()],
        }
    }

    fn get(&self, pos: &Position) -> Option<Pipe> {
        self.cells[self.dimensions.index_unchecked(pos)]
    }

    fn set(&mut self, pos: &Position, pipe: Pipe) {
        let index = self.dimensions.index_unchecked(pos);
        self.cells[index] = Some(pipe);
    }

    fn neighbor(&self, pos: &Position, dir: Direction) -> Option<Position> {
        pos.neighbor(
            self.dimensions.cols(),
            self.dimensions.rows(),
            dir,
            self.overflow,
        )
    }

    /// directions towards placed pieces that already open back at `pos`
    fn mandatory(&self, pos: &Position) -> Openings {
        IntoIterator::into_iter(Direction::all())
            .filter(|dir| {
                self.neighbor(pos, *dir)
                    .and_then(|n| self.get(&n))
                    .map_or(false, |pipe| pipe.openings().contains(dir.opposite()))
            })
            .collect()
    }

    /// directions towards cells that are still empty
    fn optional(&self, pos: &Position) -> Openings {
        IntoIterator::into_iter(Direction::all())
            .filter(|dir| {
                self.neighbor(pos, *dir)
                    .map_or(false, |n| self.get(&n).is_none())
            })
            .collect()
    }

    /// the remaining holes become walls
    fn into_board(self) -> Result<Board, BoardError> {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or_else(Pipe::wall))
            .collect();
        Board::from_cells(self.dimensions, cells, None, self.overflow)
    }
}

/// The piece types that can honour every mandatory opening without opening
/// towards anything but an empty cell. An adjacent pair is checked before an
/// opposing one so the chosen shape always has a rotation that fits.
fn candidate_types(mandatory: Openings, optional: Openings) -> Vec<PipeType> {
    let required = mandatory.len();
    let total = required + optional.len();
    let available = mandatory.union(optional);

    let mut candidates = Vec::with_capacity(2);
    if total == 1 {
        candidates.push(PipeType::DeadEnd);
    }
    if required <= 2 && total >= 2 {
        if mandatory.has_adjacent_pair() {
            candidates.push(PipeType::Curve);
        } else if mandatory.has_opposing_pair() {
            candidates.push(PipeType::Line);
        } else if available.has_adjacent_pair() {
            candidates.push(PipeType::Curve);
        } else if available.has_opposing_pair() {
            candidates.push(PipeType::Line);
        }
    }
    if required <= 3 && total >= 3 {
        candidates.push(PipeType::TPiece);
    }
    candidates
}

/// turns a fresh piece clockwise until it covers `mandatory` and stays inside
/// `mandatory | optional`
fn fit_rotation(pipe_type: PipeType, mandatory: Openings, optional: Openings) -> Option<Pipe> {
    let available = mandatory.union(optional);
    let mut pipe = Pipe::new(pipe_type);
    for _ in 0..4 {
        let openings = pipe.openings();
        if mandatory.is_subset(openings) && openings.is_subset(available) {
            return Some(pipe);
        }
        pipe.rotate(true);
    }
    None
}

/// One pass of the fill. Positions are taken from an explicit stack; a cell
/// with no fitting candidate stays empty and later becomes a wall.
fn fill(scaffold: &mut Scaffold, start: Position, rng: &mut impl Rng) {
    let mut pending = vec![start];
    while let Some(pos) = pending.pop() {
        // reached twice through a wrapped or looping path, it already opens back
        if scaffold.get(&pos).is_some() {
            continue;
        }
        let mandatory = scaffold.mandatory(&pos);
        let optional = scaffold.optional(&pos);
        let pipe = match candidate_types(mandatory, optional)
            .choose(rng)
            .and_then(|pipe_type| fit_rotation(*pipe_type, mandatory, optional))
        {
            Some(pipe) => pipe,
            None => continue,
        };
        scaffold.set(&pos, pipe);

        // reversed so the first opened direction is explored first
        let mut next: Vec<Position> = pipe
            .openings()
            .iter()
            .filter(|dir| optional.contains(*dir))
            .filter_map(|dir| scaffold.neighbor(&pos, dir))
            .collect();
        next.reverse();
        pending.extend(next);
    }
}

impl Board {
    /// Generates a solved board for `settings` and puts the source on a random
    /// pipe, giving up after the default number of attempts.
    pub fn generate(settings: &Settings, rng: &mut impl Rng) -> Result<Board, BoardError> {
        Board::generate_with_limits(settings, &GenerationLimits::default(), rng)
    }

    /// Draws boards until one stays within the wall budget and has no dangling
    /// opening. Fails with [`BoardError::GenerationExhausted`] once
    /// `limits.max_attempts` boards were rejected.
    #[instrument(level = "trace", skip_all)]
    pub fn generate_with_limits(
        settings: &Settings,
        limits: &GenerationLimits,
        rng: &mut impl Rng,
    ) -> Result<Board, BoardError> {
        settings.validate()?;
        let dimensions = Dimensions::new(settings.cols, settings.rows)?;
        let budget = settings.wall_budget();

        for attempt in 1..=limits.max_attempts {
            let mut scaffold = Scaffold::new(dimensions, settings.overflow);
            let start = Position::new(
                rng.gen_range(0..dimensions.cols()),
                rng.gen_range(0..dimensions.rows()),
            );
            fill(&mut scaffold, start, rng);
            let mut board = scaffold.into_board()?;

            let walls = board.wall_count();
            if walls > budget {
                debug!(attempt, walls, budget, "rejected board, too many walls");
                continue;
            }
            if !board.all_openings_connected() {
                debug!(attempt, "rejected board, dangling openings");
                continue;
            }

            let source = board
                .positions()
                .into_iter()
                .filter(|pos| !board.cell(pos).is_wall())
                .choose(rng);
            board.set_source(source)?;
            return Ok(board);
        }

        warn!(
            attempts = limits.max_attempts,
            cols = settings.cols,
            rows = settings.rows,
            max_wall_percent = settings.max_wall_percent,
            "giving up on board generation"
        );
        Err(BoardError::GenerationExhausted {
            attempts: limits.max_attempts,
        })
    }
}

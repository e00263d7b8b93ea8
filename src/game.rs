//! The orchestrating layer between a board and whatever draws it.
//!
//! [`Game`] owns one [`Board`] and a move counter and reports every change to a
//! [`Presenter`]. It holds no rendering state of its own.
use std::collections::BTreeMap;
use std::convert::TryFrom;

use fxhash::FxHashSet;
use rand::Rng;
use tracing::{debug, info};

use crate::compact_representation::{Board, Pipe, PipeType};
use crate::errors::BoardError;
use crate::settings::Settings;
use crate::types::{Position, SizeDeterminableBoard};
use crate::wire_representation::{BoardData, FieldError};

/// Receives everything a rendering layer needs to show the board
pub trait Presenter: std::fmt::Debug {
    /// Redraw, revealing the connected cells bucket by bucket. `moves` is only
    /// present once the board is solved.
    fn display_with_animation(
        &mut self,
        pipes: &[Vec<Pipe>],
        buckets: &BTreeMap<usize, Vec<Position>>,
        unconnected: &FxHashSet<Position>,
        moves: Option<u32>,
    );

    /// redraw everything at once
    fn display_without_animation(
        &mut self,
        pipes: &[Vec<Pipe>],
        source: Option<Position>,
        connected: &FxHashSet<Position>,
        solved: bool,
    );

    /// a single pipe was turned
    fn rotate(&mut self, pos: Position, clockwise: bool);

    /// the source moved, `None` when it was removed
    fn change_source(&mut self, source: Option<Position>);

    /// a cell got a new piece
    fn change_cell(&mut self, pos: Position, pipe_type: PipeType);

    /// board data could not be loaded
    fn show_loading_error(&mut self, error: FieldError);
}

/// A running puzzle
#[derive(Debug)]
pub struct Game<P: Presenter> {
    board: Board,
    moves: u32,
    presenter: P,
}

impl<P: Presenter> Game<P> {
    /// Generates a solved board for `settings`, scrambles it and draws it
    pub fn new(settings: &Settings, presenter: P, rng: &mut impl Rng) -> Result<Self, BoardError> {
        let mut board = Board::generate(settings, rng)?;
        board.rotate_randomly(rng);
        Ok(Game::with_board(board, presenter))
    }

    /// starts a game from glyph text, see [`Board::from_glyphs`]
    pub fn from_glyphs(
        glyphs: &str,
        source: Option<Position>,
        overflow: bool,
        presenter: P,
    ) -> Result<Self, BoardError> {
        let board = Board::from_glyphs(glyphs, source, overflow)?;
        Ok(Game::with_board(board, presenter))
    }

    /// starts a game on an existing board and draws it
    pub fn with_board(board: Board, presenter: P) -> Self {
        let mut game = Game {
            board,
            moves: 0,
            presenter,
        };
        game.display();
        game
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// number of rotations since the last reset
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[allow(missing_docs)]
    pub fn source(&self) -> Option<Position> {
        self.board.source()
    }

    #[allow(missing_docs)]
    pub fn overflow(&self) -> bool {
        self.board.overflow()
    }

    /// a source exists and it feeds every pipe without a dangling opening
    pub fn is_solved(&self) -> bool {
        self.board.is_fully_solved()
    }

    /// Turns the pipe at `pos` and counts the move. Walls are ignored and do not
    /// count.
    pub fn rotate(&mut self, pos: &Position, clockwise: bool) -> Result<(), BoardError> {
        if self.board.pipe_type_at(pos)? == PipeType::Wall {
            return Ok(());
        }
        self.moves += 1;
        self.board.rotate(pos, clockwise)?;
        debug!(%pos, clockwise, moves = self.moves, "rotated pipe");
        self.presenter.rotate(*pos, clockwise);
        self.animate();
        Ok(())
    }

    /// Puts a new piece on `pos`. A wall placed on the source removes the source.
    pub fn change_field(&mut self, pos: &Position, pipe_type: PipeType) -> Result<(), BoardError> {
        self.board.pipe_at(pos)?;
        if pipe_type == PipeType::Wall && self.board.source() == Some(*pos) {
            self.board.set_source(None)?;
            debug!(%pos, "removed source");
            self.presenter.change_source(None);
        }
        self.board.replace(pos, pipe_type)?;
        debug!(%pos, ?pipe_type, "replaced pipe");
        self.presenter.change_cell(*pos, pipe_type);
        self.animate();
        Ok(())
    }

    /// moves the source to `pos`, walls are ignored
    pub fn change_source(&mut self, pos: &Position) -> Result<(), BoardError> {
        if self.board.pipe_type_at(pos)? == PipeType::Wall {
            return Ok(());
        }
        self.board.set_source(Some(*pos))?;
        debug!(%pos, "moved source");
        self.presenter.change_source(Some(*pos));
        self.animate();
        Ok(())
    }

    /// resizes horizontally when `cols` differs from the current width
    pub fn change_cols(&mut self, cols: usize) -> Result<(), BoardError> {
        if self.board.cols() != cols {
            self.board.change_cols(cols)?;
            debug!(cols, "changed columns");
        }
        Ok(())
    }

    /// resizes vertically when `rows` differs from the current height
    pub fn change_rows(&mut self, rows: usize) -> Result<(), BoardError> {
        if self.board.rows() != rows {
            self.board.change_rows(rows)?;
            debug!(rows, "changed rows");
        }
        Ok(())
    }

    /// Replaces the board with `data` when it validates, otherwise reports the
    /// problem to the presenter. The move counter is left alone. Returns whether
    /// the board was replaced.
    pub fn load(&mut self, data: Option<BoardData>) -> bool {
        let data = match data {
            Some(data) => data,
            None => return self.reject(FieldError::ErrEmpty),
        };
        match Board::try_from(data) {
            Ok(board) => {
                debug!(cols = board.cols(), rows = board.rows(), "loaded board");
                self.board = board;
                true
            }
            Err(BoardError::InvalidBoardData(error)) => self.reject(error),
            // validated data always converts, treat anything else as an empty load
            Err(_) => self.reject(FieldError::ErrEmpty),
        }
    }

    fn reject(&mut self, error: FieldError) -> bool {
        debug!(%error, "rejected board data");
        self.presenter.show_loading_error(error);
        false
    }

    /// turns every cell in to a wall, removes the source and draws the empty board
    pub fn init_blank(&mut self) {
        self.board.init_blank();
        self.presenter.display_without_animation(
            &self.board.pipes(),
            self.board.source(),
            &FxHashSet::default(),
            false,
        );
    }

    #[allow(missing_docs)]
    pub fn reset_counter(&mut self) {
        self.moves = 0;
    }

    #[allow(missing_docs)]
    pub fn set_overflow(&mut self, overflow: bool) {
        self.board.set_overflow(overflow);
    }

    /// scrambles every pipe, nothing is redrawn
    pub fn rotate_randomly(&mut self, rng: &mut impl Rng) {
        self.board.rotate_randomly(rng);
    }

    /// redraws the whole board without animation
    pub fn display(&mut self) {
        let solved = self.is_solved();
        self.presenter.display_without_animation(
            &self.board.pipes(),
            self.board.source(),
            &self.board.connected_set(),
            solved,
        );
    }

    fn animate(&mut self) {
        let moves = if self.is_solved() {
            info!(moves = self.moves, "board solved");
            Some(self.moves)
        } else {
            None
        };
        self.presenter.display_with_animation(
            &self.board.pipes(),
            &self.board.connected_with_distances(),
            &self.board.unconnected_set(),
            moves,
        );
    }
}

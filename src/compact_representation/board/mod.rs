use std::fmt;

use itertools::Itertools;
use rand::Rng;

use crate::errors::BoardError;
use crate::types::{
    Direction, NeighborDeterminableBoard, Position, SizeDeterminableBoard,
};

use super::dimensions::Dimensions;
use super::pipe::{Pipe, PipeType};

mod connectivity;
mod generate;

/// A rectangular board of pipes with an optional source and an overflow flag.
///
/// Cells live in one flat column-major `Vec`; every read hands out copies, so a
/// caller can never mutate the board through a returned snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<Pipe>,
    dimensions: Dimensions,
    source: Option<Position>,
    overflow: bool,
}

impl Board {
    /// a board of the given size that only holds walls
    pub fn walls(cols: usize, rows: usize, overflow: bool) -> Result<Self, BoardError> {
        let dimensions = Dimensions::new(cols, rows)?;
        Ok(Board {
            cells: vec![Pipe::wall(); dimensions.area()],
            dimensions,
            source: None,
            overflow,
        })
    }

    pub(crate) fn from_cells(
        dimensions: Dimensions,
        cells: Vec<Pipe>,
        source: Option<Position>,
        overflow: bool,
    ) -> Result<Self, BoardError> {
        debug_assert_eq!(cells.len(), dimensions.area());
        let mut board = Board {
            cells,
            dimensions,
            source: None,
            overflow,
        };
        board.set_source(source)?;
        Ok(board)
    }

    /// Parses a board from box drawing glyphs, one line per row:
    /// ```
    /// # use flood_pipe::compact_representation::Board;
    /// # use flood_pipe::types::Position;
    /// let board = Board::from_glyphs("┏┓\n┗┛", Some(Position::new(0, 0)), false).unwrap();
    /// assert_eq!(board.to_string(), "┏┓\n┗┛");
    /// ```
    pub fn from_glyphs(
        glyphs: &str,
        source: Option<Position>,
        overflow: bool,
    ) -> Result<Self, BoardError> {
        let mut lines: Vec<Vec<char>> = glyphs.lines().map(|l| l.chars().collect()).collect();
        while lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        let cols = lines.first().map_or(0, |l| l.len());
        if cols == 0 || !lines.iter().map(|l| l.len()).all_equal() {
            return Err(BoardError::RaggedGrid);
        }
        let dimensions = Dimensions::new(cols, lines.len())?;

        let mut cells = Vec::with_capacity(dimensions.area());
        for x in 0..dimensions.cols() {
            for line in lines.iter() {
                cells.push(Pipe::from_glyph(line[x])?);
            }
        }
        Board::from_cells(dimensions, cells, source, overflow)
    }

    /// Builds a board from a column-major grid of opening masks (`grid[x][y]`)
    pub fn from_mask_grid(
        grid: &[Vec<i64>],
        source: Option<Position>,
        overflow: bool,
    ) -> Result<Self, BoardError> {
        let rows = grid.first().map_or(0, |column| column.len());
        let dimensions = Dimensions::new(grid.len(), rows)?;
        if !grid.iter().map(|column| column.len()).all_equal() {
            return Err(BoardError::RaggedGrid);
        }
        let cells = grid
            .iter()
            .flatten()
            .map(|mask| Pipe::from_mask(*mask))
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_cells(dimensions, cells, source, overflow)
    }

    /// the column-major grid of opening masks, the inverse of [`Board::from_mask_grid`]
    pub fn to_mask_grid(&self) -> Vec<Vec<i64>> {
        self.cells
            .chunks(self.rows())
            .map(|column| column.iter().map(|pipe| pipe.mask() as i64).collect())
            .collect()
    }

    /// a copy of every pipe, indexed `[x][y]`
    pub fn pipes(&self) -> Vec<Vec<Pipe>> {
        self.cells
            .chunks(self.rows())
            .map(|column| column.to_vec())
            .collect()
    }

    /// a copy of the pipe at `pos`
    pub fn pipe_at(&self, pos: &Position) -> Result<Pipe, BoardError> {
        let index = self.dimensions.index_of(pos)?;
        Ok(self.cells[index])
    }

    #[allow(missing_docs)]
    pub fn pipe_type_at(&self, pos: &Position) -> Result<PipeType, BoardError> {
        self.pipe_at(pos).map(|pipe| pipe.pipe_type())
    }

    #[allow(missing_docs)]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[allow(missing_docs)]
    pub fn source(&self) -> Option<Position> {
        self.source
    }

    /// Moves (or clears) the source. The new source has to be on the board and must
    /// not be a wall.
    pub fn set_source(&mut self, source: Option<Position>) -> Result<(), BoardError> {
        if let Some(pos) = source {
            let index = self.dimensions.index_of(&pos)?;
            if self.cells[index].is_wall() {
                return Err(BoardError::SourceOnWall { x: pos.x, y: pos.y });
            }
        }
        self.source = source;
        Ok(())
    }

    /// board edges wrap around
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    #[allow(missing_docs)]
    pub fn set_overflow(&mut self, overflow: bool) {
        self.overflow = overflow;
    }

    /// a quarter turn of the pipe at `pos`, walls stay as they are
    pub fn rotate(&mut self, pos: &Position, clockwise: bool) -> Result<(), BoardError> {
        let index = self.dimensions.index_of(pos)?;
        self.cells[index].rotate(clockwise);
        Ok(())
    }

    /// Puts a fresh pipe of `pipe_type` at [`Rotation::Normal`](super::pipe::Rotation::Normal)
    /// on `pos`.
    ///
    /// This never touches the source. Placing a wall on the source cell leaves the
    /// source pointing at that wall; [`Game::change_field`](crate::game::Game::change_field)
    /// is the operation that clears it.
    pub fn replace(&mut self, pos: &Position, pipe_type: PipeType) -> Result<(), BoardError> {
        let index = self.dimensions.index_of(pos)?;
        self.cells[index] = Pipe::new(pipe_type);
        Ok(())
    }

    /// Changes the board size. Cells inside both the old and the new extent are
    /// kept, new cells are walls and a source that falls off the board is cleared.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<(), BoardError> {
        let dimensions = Dimensions::new(cols, rows)?;
        let old = self.dimensions;
        let mut cells = Vec::with_capacity(dimensions.area());
        for x in 0..cols {
            for y in 0..rows {
                let pos = Position::new(x, y);
                let pipe = if old.contains(&pos) {
                    self.cells[old.index_unchecked(&pos)]
                } else {
                    Pipe::wall()
                };
                cells.push(pipe);
            }
        }
        self.cells = cells;
        self.dimensions = dimensions;
        if let Some(source) = self.source {
            if !dimensions.contains(&source) {
                self.source = None;
            }
        }
        Ok(())
    }

    /// resize keeping the number of rows
    pub fn change_cols(&mut self, cols: usize) -> Result<(), BoardError> {
        self.resize(cols, self.rows())
    }

    /// resize keeping the number of columns
    pub fn change_rows(&mut self, rows: usize) -> Result<(), BoardError> {
        self.resize(self.cols(), rows)
    }

    /// turns every cell in to a wall and clears the source
    pub fn init_blank(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Pipe::wall();
        }
        self.source = None;
    }

    /// gives every pipe a random number of clockwise quarter turns
    pub fn rotate_randomly(&mut self, rng: &mut impl Rng) {
        for cell in self.cells.iter_mut() {
            cell.random_rotate(rng);
        }
    }

    /// number of wall cells
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|pipe| pipe.is_wall()).count()
    }

    /// the overflow-aware position one step from `pos` towards `dir`
    pub fn neighbor(&self, pos: &Position, dir: Direction) -> Option<Position> {
        pos.neighbor(self.cols(), self.rows(), dir, self.overflow)
    }

    pub(crate) fn cell(&self, pos: &Position) -> &Pipe {
        &self.cells[self.dimensions.index_unchecked(pos)]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.cols() {
                write!(f, "{}", self.cell(&Position::new(x, y)))?;
            }
        }
        Ok(())
    }
}

impl SizeDeterminableBoard for Board {
    fn cols(&self) -> usize {
        self.dimensions.cols()
    }

    fn rows(&self) -> usize {
        self.dimensions.rows()
    }
}

impl NeighborDeterminableBoard for Board {
    fn neighbors(&self, pos: &Position) -> Vec<(Direction, Position)> {
        IntoIterator::into_iter(Direction::all())
            .filter_map(|dir| self.neighbor(pos, dir).map(|n| (dir, n)))
            .collect()
    }

    fn connected_neighbors(&self, pos: &Position) -> Vec<(Direction, Position)> {
        if !self.dimensions.contains(pos) {
            return vec![];
        }
        let openings = self.cell(pos).openings();
        self.neighbors(pos)
            .into_iter()
            .filter(|(dir, n)| {
                openings.contains(*dir) && self.cell(n).openings().contains(dir.opposite())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::super::pipe::Rotation;
    use super::*;

    fn loop_board() -> Board {
        Board::from_glyphs("┏┓\n┗┛", Some(Position::new(0, 0)), false).unwrap()
    }

    #[test]
    fn test_non_square_boards_parse() {
        let board = Board::from_glyphs("┏━┳╸\n┃╻┗┓\n", None, false).unwrap();
        assert_eq!(board.cols(), 4);
        assert_eq!(board.rows(), 2);
        assert_eq!(board.to_string(), "┏━┳╸\n┃╻┗┓");
        assert_eq!(
            board.pipe_at(&Position::new(2, 0)).unwrap(),
            Pipe::with_rotation(PipeType::TPiece, Rotation::Right)
        );
    }

    #[test]
    fn test_glyph_errors() {
        assert_eq!(
            Board::from_glyphs("┏┓\n┗", None, false),
            Err(BoardError::RaggedGrid)
        );
        assert_eq!(Board::from_glyphs("", None, false), Err(BoardError::RaggedGrid));
        assert_eq!(
            Board::from_glyphs("┏┓\n┗x", None, false),
            Err(BoardError::UnknownGlyph('x'))
        );
        assert!(matches!(
            Board::from_glyphs("┏\n┗", None, false),
            Err(BoardError::OutOfRange { what: "cols", .. })
        ));
    }

    #[test]
    fn test_source_must_be_on_a_pipe() {
        assert_eq!(
            Board::from_glyphs("┏╳\n┗┛", Some(Position::new(1, 0)), false),
            Err(BoardError::SourceOnWall { x: 1, y: 0 })
        );
        let mut board = loop_board();
        assert!(matches!(
            board.set_source(Some(Position::new(2, 0))),
            Err(BoardError::PositionOutOfBounds { .. })
        ));
        assert_eq!(board.source(), Some(Position::new(0, 0)));
        board.set_source(None).unwrap();
        assert_eq!(board.source(), None);
    }

    #[test]
    fn test_mask_grid_round_trip() {
        let board = Board::from_glyphs("┣━┫\n╹╳╻", Some(Position::new(1, 0)), true).unwrap();
        let grid = board.to_mask_grid();
        assert_eq!(grid, vec![vec![7, 1], vec![10, 0], vec![13, 4]]);
        let rebuilt = Board::from_mask_grid(&grid, board.source(), true).unwrap();
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn test_mask_grid_errors() {
        assert_eq!(
            Board::from_mask_grid(&[vec![1, 2], vec![3]], None, false),
            Err(BoardError::RaggedGrid)
        );
        assert_eq!(
            Board::from_mask_grid(&[vec![1, 2], vec![3, 4], vec![5, 6, 7]], None, false),
            Err(BoardError::RaggedGrid)
        );
        assert_eq!(
            Board::from_mask_grid(&[vec![1, 2], vec![3, 15]], None, false),
            Err(BoardError::InvalidMask(15))
        );
    }

    #[test]
    fn test_snapshots_do_not_alias() {
        let board = loop_board();
        let mut pipes = board.pipes();
        pipes[0][0].rotate(true);
        let mut pipe = board.pipe_at(&Position::new(0, 0)).unwrap();
        pipe.rotate(true);
        assert_eq!(board, loop_board());
    }

    #[test]
    fn test_rotate_and_replace() {
        let mut board = loop_board();
        board.rotate(&Position::new(0, 0), true).unwrap();
        assert_eq!(board.to_string(), "┓┓\n┗┛");
        board.rotate(&Position::new(0, 0), false).unwrap();
        assert_eq!(board, loop_board());

        board.replace(&Position::new(1, 1), PipeType::Wall).unwrap();
        board.rotate(&Position::new(1, 1), true).unwrap();
        assert_eq!(board.to_string(), "┏┓\n┗╳");
        assert!(board.rotate(&Position::new(5, 5), true).is_err());
    }

    #[test]
    fn test_replace_keeps_source() {
        let mut board = loop_board();
        board.replace(&Position::new(0, 0), PipeType::Wall).unwrap();
        assert_eq!(board.source(), Some(Position::new(0, 0)));
        assert_eq!(board.pipe_type_at(&Position::new(0, 0)), Ok(PipeType::Wall));
    }

    #[test]
    fn test_resize_grow_keeps_cells_and_adds_walls() {
        let mut board = loop_board();
        board.resize(3, 4).unwrap();
        assert_eq!(board.to_string(), "┏┓╳\n┗┛╳\n╳╳╳\n╳╳╳");
        assert_eq!(board.source(), Some(Position::new(0, 0)));
        assert_eq!(board.wall_count(), 8);
    }

    #[test]
    fn test_resize_shrink_clears_source_outside() {
        let mut board = Board::from_glyphs("┏━┓\n┃╳┃\n┗━┛", Some(Position::new(2, 1)), false)
            .unwrap();
        board.change_rows(2).unwrap();
        assert_eq!(board.to_string(), "┏━┓\n┃╳┃");
        assert_eq!(board.source(), Some(Position::new(2, 1)));
        board.change_cols(2).unwrap();
        assert_eq!(board.to_string(), "┏━\n┃╳");
        assert_eq!(board.source(), None);
    }

    #[test]
    fn test_resize_out_of_range() {
        let mut board = loop_board();
        assert!(matches!(
            board.resize(16, 2),
            Err(BoardError::OutOfRange { what: "cols", .. })
        ));
        assert!(matches!(
            board.resize(2, 1),
            Err(BoardError::OutOfRange { what: "rows", .. })
        ));
        assert_eq!(board, loop_board());
    }

    #[test]
    fn test_init_blank() {
        let mut board = loop_board();
        board.init_blank();
        assert_eq!(board.wall_count(), 4);
        assert_eq!(board.source(), None);
        assert_eq!(board, Board::walls(2, 2, false).unwrap());
    }

    #[test]
    fn test_rotate_randomly_keeps_types() {
        let mut board = Board::from_glyphs("┣━┫\n╹╳╻", None, false).unwrap();
        let before = board.clone();
        board.rotate_randomly(&mut SmallRng::seed_from_u64(3));
        for pos in board.positions() {
            assert_eq!(board.pipe_type_at(&pos), before.pipe_type_at(&pos));
        }
    }

    #[test]
    fn test_connected_neighbors_need_both_openings() {
        let board = Board::from_glyphs("┏╸\n╹╺", None, false).unwrap();
        let mut neighbors = board.connected_neighbors(&Position::new(0, 0));
        neighbors.sort();
        assert_eq!(
            neighbors,
            vec![
                (Direction::Right, Position::new(1, 0)),
                (Direction::Bottom, Position::new(0, 1)),
            ]
        );
        assert!(board.connected_neighbors(&Position::new(1, 1)).is_empty());
        assert_eq!(board.neighbors(&Position::new(0, 0)).len(), 2);
    }

    #[test]
    fn test_connected_neighbors_across_wrapped_edges() {
        let board = Board::from_glyphs("┗━┛\n╳╳╳\n┏━┓", None, true).unwrap();
        let mut neighbors = board.connected_neighbors(&Position::new(0, 0));
        neighbors.sort();
        assert_eq!(
            neighbors,
            vec![
                (Direction::Top, Position::new(0, 2)),
                (Direction::Right, Position::new(1, 0)),
            ]
        );
        assert_eq!(board.neighbors(&Position::new(1, 1)).len(), 4);
    }
}

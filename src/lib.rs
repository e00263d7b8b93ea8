#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Types for working with flood-pipe boards: a rectangular grid of pipe pieces
//! that all have to be connected to a single source by turning them, optionally
//! with opposite board edges wrapping around.
//!
//! you will likely be most interested in the [`Board`](compact_representation::Board)
//! type, which generates solvable boards and answers connectivity questions, and
//! in [`Game`](game::Game), which drives a board for a rendering layer.
//! ```
//! # use flood_pipe::compact_representation::Board;
//! # use flood_pipe::settings::Settings;
//! # use rand::rngs::SmallRng;
//! # use rand::SeedableRng;
//! let mut rng = SmallRng::seed_from_u64(1);
//! let mut board = Board::generate(&Settings::new(6, 4, 10, false), &mut rng).unwrap();
//! assert!(board.is_fully_solved());
//! board.rotate_randomly(&mut rng);
//! ```

use std::convert::TryFrom;

use compact_representation::Board;
use wire_representation::BoardData;

pub mod compact_representation;
pub mod errors;
pub mod game;
pub mod settings;
pub mod types;
pub mod wire_representation;

/// Loads a fixture from a given string
pub fn board_fixture(board_fixture: &str) -> Board {
    let data: Result<BoardData, _> = serde_json::from_str(board_fixture);
    let data = data.expect("the json literal is valid");
    Board::try_from(data).expect("the fixture describes a valid board")
}

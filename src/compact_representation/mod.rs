//! A compact board representation: pipes stored in one flat column-major array
//! with derived openings. Use [`Board::generate`] for a fresh puzzle or
//! `Board::try_from` on a validated [`BoardData`](crate::wire_representation::BoardData)
//! to hydrate a persisted one.

mod board;
pub mod dimensions;
pub mod pipe;

pub use board::Board;
pub use dimensions::Dimensions;
pub use pipe::{Pipe, PipeType, Rotation};

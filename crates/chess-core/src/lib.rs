//! Core types for chess.
//!
//! This crate provides the value types shared by the engine and its callers:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] with algebraic ("e4") and grid (row/column) conversion
//! - [`CastlingRights`] per color
//! - [`Move`] in coordinate notation
//! - FEN field parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{FenParser, Grid, NotationError};
pub use mov::Move;
pub use piece::Piece;
pub use square::{Square, SquareError};

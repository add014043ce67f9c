//! Chess rules engine over an 8x8 grid.
//!
//! This crate provides:
//! - [`Position`] - Full game state: grid, side to move, castling rights, etc.
//! - [`Board`] - Session state with memoized piece list, FEN and history
//! - [`RuleOptions`] - Switches for rules with more than one reading
//! - Move generation, check detection and perft in [`movegen`]
//!
//! # Architecture
//!
//! The grid is indexed `[row][col]` with row 0 on rank 8. Moves are generated
//! per piece by ray walking and offset tables, then filtered for legality by
//! playing each candidate on a stack copy of the position and testing
//! whether the mover's king is attacked.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Board, GameState, MoveOutcome};
//!
//! let mut board = Board::new();
//! board.apply_uci("e2e4").unwrap();
//! board.apply_uci("e7e5").unwrap();
//! assert_eq!(board.state(), GameState::Active);
//! println!("Position after 1.e4 e5: {}", board.fen());
//!
//! let outcome = board.apply_uci("g1f3").unwrap();
//! assert_eq!(outcome, MoveOutcome::Played(GameState::Active));
//! ```

mod board;
mod error;
pub mod movegen;
mod pieces;
mod position;
pub mod rules;

pub use board::Board;
pub use error::EngineError;
pub use movegen::{is_king_attacked, is_square_attacked, legal_destinations, legal_moves};
pub use pieces::BoardPiece;
pub use position::{CastleSide, Position, Relocation};
pub use rules::{GameState, MoveOutcome, RuleOptions};

//! Errors returned by [`Board`](crate::Board) operations.

use chess_core::{NotationError, Piece, Square, SquareError};
use thiserror::Error;

/// Error type for board operations.
///
/// A failed operation never leaves the board partially updated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The FEN text could not be decoded.
    #[error("malformed FEN: {0}")]
    MalformedNotation(#[from] NotationError),

    /// A square name or grid index was not on the board.
    #[error(transparent)]
    InvalidSquare(#[from] SquareError),

    /// Coordinate move text such as `e2e4` could not be parsed.
    #[error("malformed move text: {0:?}")]
    InvalidMoveText(String),

    /// The square holds no piece.
    #[error("no piece on {0}")]
    NoPieceAt(Square),

    /// The destination is not among the legal moves of the piece.
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// Pawns may only promote to a knight, bishop, rook or queen.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(Piece),

    /// A pawn move is waiting for its promotion choice.
    #[error("promotion {from}{to} is pending")]
    PromotionPending { from: Square, to: Square },
}

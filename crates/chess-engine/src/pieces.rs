//! Piece list derived from a position.

use chess_core::{Color, Piece, Square};

use crate::movegen::legal_destinations;
use crate::rules::RuleOptions;
use crate::Position;

/// One occupied square, as seen by a caller.
///
/// Pieces are plain values rebuilt from the grid after every change; two
/// `BoardPiece`s from different positions are unrelated even if they share a
/// square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPiece {
    pub color: Color,
    pub piece: Piece,
    /// FEN letter, uppercase for White.
    pub code: char,
    pub square: Square,
    /// Legal destinations. Empty for the side not to move.
    pub legal_moves: Vec<Square>,
}

impl BoardPiece {
    /// Builds the piece list of a position in board order (a8 first, h1 last).
    pub fn collect(position: &Position, options: &RuleOptions) -> Vec<BoardPiece> {
        position
            .occupants()
            .map(|(square, piece, color)| {
                let legal_moves = if color == position.side_to_move {
                    legal_destinations(position, square, options)
                        .as_slice()
                        .to_vec()
                } else {
                    Vec::new()
                };
                BoardPiece {
                    color,
                    piece,
                    code: piece.to_fen_char(color),
                    square,
                    legal_moves,
                }
            })
            .collect()
    }

    /// Returns true if the piece may move to `to`.
    #[inline]
    pub fn can_move_to(&self, to: Square) -> bool {
        self.legal_moves.contains(&to)
    }
}

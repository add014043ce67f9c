//! Rule options and game state classification.
//!
//! The engine follows standard chess by default. [`RuleOptions`] exposes the
//! few places where a simpler reading of the rules is selectable, so a caller
//! can reproduce the behavior of older front ends that relied on it.

use serde::{Deserialize, Serialize};

use crate::movegen::{has_legal_move, is_king_attacked};
use crate::Position;

/// Classification of a position after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The side to move has at least one legal move.
    Active,
    /// The side to move has no legal moves and is in check.
    Checkmate,
    /// The side to move has no legal moves and is not in check.
    Stalemate,
}

impl GameState {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameState::Active)
    }
}

/// Result of asking the board to apply a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was applied; the new position classifies as given.
    Played(GameState),
    /// A pawn would reach the last rank. Nothing was applied; the caller must
    /// pick a piece and call `Board::apply_promotion`.
    PromotionRequired,
}

/// Switches for the rules that have more than one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Captures reset the halfmove counter, not only pawn moves.
    pub reset_halfmove_on_capture: bool,

    /// Castling requires the king not to be in check and not to cross an
    /// attacked square.
    pub castling_path_must_be_safe: bool,

    /// A king standing next to the opposing king counts as being in check,
    /// so kings can never become adjacent.
    pub king_contact_is_check: bool,
}

impl RuleOptions {
    /// Standard chess.
    pub const STANDARD: RuleOptions = RuleOptions {
        reset_halfmove_on_capture: true,
        castling_path_must_be_safe: true,
        king_contact_is_check: true,
    };

    /// The lenient reading: only pawn moves reset the halfmove counter,
    /// castling only needs empty squares, and adjacent kings are ignored by
    /// check detection.
    pub const fn lenient() -> Self {
        RuleOptions {
            reset_halfmove_on_capture: false,
            castling_path_must_be_safe: false,
            king_contact_is_check: false,
        }
    }
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Classifies the position for its side to move.
pub fn classify(position: &Position, options: &RuleOptions) -> GameState {
    if has_legal_move(position, options) {
        GameState::Active
    } else if is_king_attacked(position, position.side_to_move, options) {
        GameState::Checkmate
    } else {
        GameState::Stalemate
    }
}

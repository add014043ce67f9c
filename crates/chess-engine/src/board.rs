//! Game session state with history tracking.
//!
//! [`Board`] owns the live [`Position`] and everything derived from it:
//! - the piece list with legal destinations for the side to move
//! - the canonical FEN string
//! - the classification of the position (active, checkmate, stalemate)
//! - the FEN history of every position reached in this session
//!
//! Derived values are computed on first use and dropped on every mutation.

use chess_core::{CastlingRights, Color, Move, Piece, Square};
use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use crate::movegen::{self, is_king_attacked, is_promotion};
use crate::pieces::BoardPiece;
use crate::rules::{classify, GameState, MoveOutcome, RuleOptions};
use crate::{EngineError, Position};

/// A chess position together with its session history.
#[derive(Debug, Clone)]
pub struct Board {
    /// Current position.
    position: Position,
    /// Rule switches used for generation and counters.
    options: RuleOptions,
    /// FEN of every position reached, starting with the initial one.
    history: Vec<String>,
    /// Classification of the current position.
    state: GameState,
    /// A pawn move awaiting its promotion piece.
    pending_promotion: Option<(Square, Square)>,
    pieces: OnceCell<Vec<BoardPiece>>,
    fen: OnceCell<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos(), RuleOptions::default())
    }

    /// Creates a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let position = Position::from_fen(fen)?;
        Ok(Self::from_position(position, RuleOptions::default()))
    }

    /// Creates a board from a position and rule options.
    pub fn from_position(position: Position, options: RuleOptions) -> Self {
        let mut board = Board {
            position,
            options,
            history: Vec::new(),
            state: GameState::Active,
            pending_promotion: None,
            pieces: OnceCell::new(),
            fen: OnceCell::new(),
        };
        board.state = classify(&board.position, &board.options);
        let fen = board.fen().to_string();
        board.history.push(fen);
        board
    }

    /// Returns the board with different rule options.
    ///
    /// Legal moves and the classification are recomputed; the position and
    /// history are kept.
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self.invalidate();
        self.state = classify(&self.position, &self.options);
        self
    }

    /// Replaces the live position with one decoded from FEN.
    ///
    /// The history restarts at the loaded position. If decoding fails the
    /// board is left as it was.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), EngineError> {
        let position = Position::from_fen(fen)?;
        debug!(fen, "loading position");
        *self = Self::from_position(position, self.options);
        Ok(())
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the rule options in use.
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Returns the canonical FEN of the current position.
    pub fn fen(&self) -> &str {
        self.fen.get_or_init(|| self.position.to_fen())
    }

    /// Returns the FEN of every position reached, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns the pieces in board order, a8 first.
    pub fn pieces(&self) -> &[BoardPiece] {
        self.pieces
            .get_or_init(|| BoardPiece::collect(&self.position, &self.options))
    }

    /// Returns the piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<&BoardPiece> {
        self.pieces().iter().find(|p| p.square == sq)
    }

    /// Returns the legal destinations of the piece on `sq`.
    ///
    /// Empty if the square is empty or holds a piece of the side not to move.
    pub fn legal_moves(&self, sq: Square) -> &[Square] {
        self.piece_at(sq)
            .map_or(&[][..], |p| p.legal_moves.as_slice())
    }

    /// Returns the legal destinations of `piece`, provided it still stands on
    /// its square.
    pub fn legal_moves_for(&self, piece: &BoardPiece) -> &[Square] {
        match self.piece_at(piece.square) {
            Some(current) if current.piece == piece.piece && current.color == piece.color => {
                current.legal_moves.as_slice()
            }
            _ => &[],
        }
    }

    /// Returns every legal move of the side to move, promotions expanded.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(&self.position, &self.options)
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns the castling rights of one color.
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        self.position.castling_rights(color)
    }

    /// Returns the en passant target square, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.position.en_passant
    }

    /// Returns the halfmove counter.
    pub fn halfmove_counter(&self) -> u32 {
        self.position.halfmove_clock
    }

    /// Returns the current full move number.
    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmove_number
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_attacked(&self.position, self.position.side_to_move, &self.options)
    }

    /// Returns the classification of the current position.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns true once a hundred halfmoves passed without a pawn move (or a
    /// capture, under standard rules). Never ends the game by itself.
    pub fn fifty_move_claimable(&self) -> bool {
        self.position.halfmove_clock >= 100
    }

    /// Returns the pawn move awaiting a promotion choice, if any.
    pub fn pending_promotion(&self) -> Option<(Square, Square)> {
        self.pending_promotion
    }

    /// Drops a pending promotion so that another move can be played.
    pub fn cancel_promotion(&mut self) {
        self.pending_promotion = None;
    }

    /// Moves `piece` to `to`.
    ///
    /// `piece` must still stand on its square; a stale snapshot is rejected
    /// as an illegal move.
    pub fn apply_move(&mut self, piece: &BoardPiece, to: Square) -> Result<MoveOutcome, EngineError> {
        if self.position.piece_at(piece.square) != Some((piece.piece, piece.color)) {
            warn!(from = %piece.square, %to, "piece is no longer on its square");
            return Err(EngineError::IllegalMove {
                from: piece.square,
                to,
            });
        }
        self.apply_move_from(piece.square, to)
    }

    /// Moves the piece on `from` to `to`.
    ///
    /// A pawn reaching the last rank is not moved: the outcome is
    /// [`MoveOutcome::PromotionRequired`] and the move must be completed with
    /// [`Board::apply_promotion`].
    pub fn apply_move_from(&mut self, from: Square, to: Square) -> Result<MoveOutcome, EngineError> {
        if let Some((from, to)) = self.pending_promotion {
            return Err(EngineError::PromotionPending { from, to });
        }
        self.check_legal(from, to)?;

        if is_promotion(&self.position, from, to) {
            debug!(%from, %to, "promotion required");
            self.pending_promotion = Some((from, to));
            return Ok(MoveOutcome::PromotionRequired);
        }

        Ok(MoveOutcome::Played(self.commit(from, to, None)))
    }

    /// Completes a pawn move onto the last rank with the chosen piece.
    ///
    /// Does not require a preceding [`MoveOutcome::PromotionRequired`], but
    /// if one is pending, `from` and `to` must match it.
    pub fn apply_promotion(
        &mut self,
        from: Square,
        to: Square,
        piece: Piece,
    ) -> Result<GameState, EngineError> {
        if !piece.is_promotion_choice() {
            return Err(EngineError::InvalidPromotion(piece));
        }
        if let Some(pending) = self.pending_promotion {
            if pending != (from, to) {
                return Err(EngineError::PromotionPending {
                    from: pending.0,
                    to: pending.1,
                });
            }
        }
        self.check_legal(from, to)?;
        if !is_promotion(&self.position, from, to) {
            warn!(%from, %to, "not a promotion move");
            return Err(EngineError::IllegalMove { from, to });
        }

        self.pending_promotion = None;
        Ok(self.commit(from, to, Some(piece)))
    }

    /// Plays a move in coordinate notation, e.g. `e2e4` or `e7e8q`.
    ///
    /// A promotion without a suffix yields [`MoveOutcome::PromotionRequired`].
    pub fn apply_uci(&mut self, text: &str) -> Result<MoveOutcome, EngineError> {
        let m = Move::from_uci(text).ok_or_else(|| EngineError::InvalidMoveText(text.to_string()))?;
        match m.promotion() {
            Some(piece) => self
                .apply_promotion(m.from(), m.to(), piece)
                .map(MoveOutcome::Played),
            None => self.apply_move_from(m.from(), m.to()),
        }
    }

    fn check_legal(&self, from: Square, to: Square) -> Result<(), EngineError> {
        if self.position.piece_at(from).is_none() {
            warn!(%from, "no piece to move");
            return Err(EngineError::NoPieceAt(from));
        }
        if !self.legal_moves(from).contains(&to) {
            warn!(%from, %to, "rejected illegal move");
            return Err(EngineError::IllegalMove { from, to });
        }
        Ok(())
    }

    /// Applies a validated move and refreshes everything derived from the
    /// position.
    fn commit(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> GameState {
        let relocation = self.position.play(from, to, promotion, &self.options);
        self.invalidate();

        self.state = classify(&self.position, &self.options);
        let fen = self.fen().to_string();
        debug!(
            %from,
            %to,
            captured = ?relocation.and_then(|r| r.captured),
            state = ?self.state,
            fen = %fen,
            "move applied"
        );
        self.history.push(fen);
        self.state
    }

    fn invalidate(&mut self) {
        self.pieces = OnceCell::new();
        self.fen = OnceCell::new();
    }
}

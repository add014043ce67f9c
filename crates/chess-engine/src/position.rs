//! Chess position representation.

use chess_core::{CastlingRights, Color, FenParser, Grid, NotationError, Piece, Square};

use crate::rules::RuleOptions;

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Grid columns of the rook before and after castling.
    #[inline]
    pub const fn rook_cols(self) -> (u8, u8) {
        match self {
            CastleSide::Kingside => (7, 5),
            CastleSide::Queenside => (0, 3),
        }
    }

    /// Grid column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }
}

/// Grid column of both kings before castling.
pub const KING_HOME_COL: u8 = 4;

/// What a board relocation did, beyond moving one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// The piece that moved, before any promotion.
    pub piece: Piece,
    /// Color of the moving piece.
    pub color: Color,
    /// Piece removed from the board, if any.
    pub captured: Option<Piece>,
    /// True if the capture was en passant.
    pub en_passant: bool,
    /// Set when the move was a castle.
    pub castle: Option<CastleSide>,
}

/// Complete chess position state.
///
/// `Position` is a plain `Copy` value so that hypothetical moves can be played
/// on a stack copy without touching the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Cell contents, `grid[row][col]` with row 0 = rank 8.
    pub grid: Grid,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights indexed by [`Color::index`].
    pub castling: [CastlingRights; 2],

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove counter.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub const fn empty() -> Self {
        Position {
            grid: [[None; 8]; 8],
            side_to_move: Color::White,
            castling: [CastlingRights::None; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, NotationError> {
        Ok(FenParser::parse(fen)?.into())
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        FenParser::from(*self).to_fen()
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.grid[sq.row() as usize][sq.col() as usize]
    }

    /// Overwrites the contents of a square.
    #[inline]
    pub fn set(&mut self, sq: Square, occupant: Option<(Piece, Color)>) {
        self.grid[sq.row() as usize][sq.col() as usize] = occupant;
    }

    /// Castling rights of one color.
    #[inline]
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        self.castling[color.index()]
    }

    /// Iterates over occupied squares in board order (a8 ... h1).
    pub fn occupants(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Finds the king of the given color.
    ///
    /// Positions are assumed to hold one king per color; with several, the
    /// first in board order is returned.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupants()
            .find(|&(_, piece, c)| piece == Piece::King && c == color)
            .map(|(sq, _, _)| sq)
    }

    /// Moves a piece on the grid without touching side to move, castling
    /// rights, en passant target or counters.
    ///
    /// Handles the board side effects of special moves: the pawn removed by
    /// an en passant capture, the rook carried along by a castle, and the
    /// promoted piece when `promotion` is given. Returns `None` if `from` is
    /// empty.
    pub fn relocate(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> Option<Relocation> {
        let (piece, color) = self.piece_at(from)?;
        let mut captured = self.piece_at(to).map(|(p, _)| p);

        self.set(from, None);
        let placed = match (piece, promotion) {
            (Piece::Pawn, Some(choice)) => choice,
            _ => piece,
        };
        self.set(to, Some((placed, color)));

        let mut en_passant = false;
        if piece == Piece::Pawn && self.en_passant == Some(to) && from.col() != to.col() {
            // The captured pawn stands beside the origin, behind the target.
            if let Some(behind) = Square::from_grid(from.row(), to.col()) {
                if self.piece_at(behind) == Some((Piece::Pawn, color.opposite())) {
                    self.set(behind, None);
                    captured = Some(Piece::Pawn);
                    en_passant = true;
                }
            }
        }

        let mut castle = None;
        if piece == Piece::King && from.col().abs_diff(to.col()) == 2 {
            let side = if to.col() > from.col() {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            let (rook_from_col, rook_to_col) = side.rook_cols();
            if let (Some(rook_from), Some(rook_to)) = (
                Square::from_grid(from.row(), rook_from_col),
                Square::from_grid(from.row(), rook_to_col),
            ) {
                let rook = self.piece_at(rook_from);
                self.set(rook_from, None);
                self.set(rook_to, rook);
            }
            castle = Some(side);
        }

        Some(Relocation {
            piece,
            color,
            captured,
            en_passant,
            castle,
        })
    }

    /// Plays a move completely: relocation, castling rights, side to move,
    /// en passant target and both counters.
    ///
    /// The move is not checked for legality. Returns `None` if `from` is
    /// empty.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        options: &RuleOptions,
    ) -> Option<Relocation> {
        let relocation = self.relocate(from, to, promotion)?;
        let us = relocation.color;

        if relocation.piece == Piece::King {
            self.castling[us.index()] = CastlingRights::None;
        }
        // A rook leaving its corner, or anything landing on one, ends castling
        // toward that corner.
        for sq in [from, to] {
            self.revoke_corner(sq);
        }

        self.side_to_move = us.opposite();

        self.en_passant = None;
        if relocation.piece == Piece::Pawn && from.row().abs_diff(to.row()) == 2 {
            self.en_passant = Square::from_grid((from.row() + to.row()) / 2, from.col());
        }

        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        let capture_resets = relocation.captured.is_some() && options.reset_halfmove_on_capture;
        if relocation.piece == Piece::Pawn || capture_resets {
            self.halfmove_clock = 0;
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        Some(relocation)
    }

    fn revoke_corner(&mut self, sq: Square) {
        for color in Color::BOTH {
            if sq.row() != color.home_row() {
                continue;
            }
            let rights = &mut self.castling[color.index()];
            match sq.col() {
                0 => *rights = rights.without_queenside(),
                7 => *rights = rights.without_kingside(),
                _ => {}
            }
        }
    }
}

impl From<FenParser> for Position {
    fn from(parsed: FenParser) -> Self {
        Position {
            grid: parsed.grid,
            side_to_move: parsed.active_color,
            castling: parsed.castling,
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        }
    }
}

impl From<Position> for FenParser {
    fn from(position: Position) -> Self {
        FenParser {
            grid: position.grid,
            active_color: position.side_to_move,
            castling: position.castling,
            en_passant: position.en_passant,
            halfmove_clock: position.halfmove_clock,
            fullmove_number: position.fullmove_number,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
            Err(NotationError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(pos.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(pos.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(pos.piece_at(sq("e4")), None);
    }

    #[test]
    fn occupants_in_board_order() {
        let pos = Position::startpos();
        let occupants: Vec<_> = pos.occupants().collect();
        assert_eq!(occupants.len(), 32);
        assert_eq!(occupants[0], (Square::A8, Piece::Rook, Color::Black));
        assert_eq!(occupants[31], (Square::H1, Piece::Rook, Color::White));
    }

    #[test]
    fn king_square() {
        let pos = Position::startpos();
        assert_eq!(pos.king_square(Color::White), Some(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Position::empty().king_square(Color::White), None);
    }

    #[test]
    fn play_double_push_sets_en_passant() {
        let mut pos = Position::startpos();
        pos.play(sq("e2"), sq("e4"), None, &RuleOptions::default())
            .unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn counters_saturate_at_their_limit() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 4294967295 1").unwrap();
        pos.play(sq("a1"), sq("a2"), None, &RuleOptions::default())
            .unwrap();
        assert_eq!(pos.halfmove_clock, u32::MAX);

        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap();
        pos.play(sq("e8"), sq("d8"), None, &RuleOptions::default())
            .unwrap();
        assert_eq!(pos.fullmove_number, u32::MAX);
        assert_eq!(pos.to_fen(), "3k4/8/8/8/8/8/8/4K3 w - - 1 4294967295");
    }

    #[test]
    fn play_from_empty_square() {
        let mut pos = Position::startpos();
        assert!(pos
            .play(sq("e4"), sq("e5"), None, &RuleOptions::default())
            .is_none());
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn relocate_en_passant_removes_pawn_behind_target() {
        let mut pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        let relocation = pos.relocate(sq("f5"), sq("e6"), None).unwrap();
        assert!(relocation.en_passant);
        assert_eq!(relocation.captured, Some(Piece::Pawn));
        assert_eq!(pos.piece_at(sq("e5")), None);
        assert_eq!(pos.piece_at(sq("e6")), Some((Piece::Pawn, Color::White)));
        // Relocation alone leaves the rest of the state untouched.
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.en_passant, Some(sq("e6")));
    }

    #[test]
    fn castle_moves_rook_and_clears_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
        let relocation = pos
            .play(Square::E1, Square::G1, None, &RuleOptions::default())
            .unwrap();
        assert_eq!(relocation.castle, Some(CastleSide::Kingside));
        assert_eq!(pos.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");

        pos.play(Square::E8, Square::C8, None, &RuleOptions::default())
            .unwrap();
        assert_eq!(pos.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 5 11");
    }

    #[test]
    fn rook_moves_and_captures_narrow_rights() {
        let options = RuleOptions::default();
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        pos.play(Square::A1, Square::A8, None, &options).unwrap();
        assert_eq!(pos.castling_rights(Color::White), CastlingRights::Kingside);
        assert_eq!(pos.castling_rights(Color::Black), CastlingRights::Kingside);
        assert_eq!(pos.halfmove_clock, 0);
    }

    #[test]
    fn capture_reset_follows_options() {
        let fen = "4k3/8/8/3p4/8/8/8/3RK3 w - - 7 20";
        let mut standard = Position::from_fen(fen).unwrap();
        standard
            .play(Square::D1, sq("d5"), None, &RuleOptions::default())
            .unwrap();
        assert_eq!(standard.halfmove_clock, 0);

        let mut lenient = Position::from_fen(fen).unwrap();
        lenient
            .play(Square::D1, sq("d5"), None, &RuleOptions::lenient())
            .unwrap();
        assert_eq!(lenient.halfmove_clock, 8);
    }

    #[test]
    fn promotion_places_chosen_piece() {
        let mut pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        pos.play(sq("e7"), Square::E8, Some(Piece::Knight), &RuleOptions::default())
            .unwrap();
        assert_eq!(pos.piece_at(Square::E8), Some((Piece::Knight, Color::White)));
        assert_eq!(pos.to_fen(), "4N3/8/8/8/8/8/k7/4K3 b - - 0 1");
    }
}

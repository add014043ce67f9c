//! FEN (Forsyth-Edwards Notation) field parsing and validation.
//!
//! [`FenParser`] splits and validates the six fields of a FEN string and
//! decodes each one into typed values. Building a playable position from the
//! decoded fields is left to the engine.

use thiserror::Error;

use crate::{CastlingRights, Color, Piece, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid FEN: expected 6 space-separated fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Cell contents of a decoded board: `grid[row][col]`, row 0 = rank 8.
pub type Grid = [[Option<(Piece, Color)>; 8]; 8];

/// Decoded FEN fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Board layout, rank 8 first.
    pub grid: Grid,
    /// Side to move.
    pub active_color: Color,
    /// Castling rights indexed by [`Color::index`].
    pub castling: [CastlingRights; 2],
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove counter.
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string. Fields must be separated by single spaces.
    pub fn parse(fen: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = fen.split(' ').collect();
        if parts.len() != 6 {
            return Err(NotationError::InvalidPartCount(parts.len()));
        }

        let grid = Self::parse_piece_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(NotationError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parse_counter(parts[4])
            .ok_or_else(|| NotationError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parse_counter(parts[5])
            .ok_or_else(|| NotationError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            grid,
            active_color,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Grid, NotationError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(NotationError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut grid: Grid = [[None; 8]; 8];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            let mut after_run = false;
            for c in rank.chars() {
                let width = match c {
                    '1'..='8' if after_run => {
                        return Err(NotationError::InvalidPiecePlacement(format!(
                            "adjacent empty runs in rank {}",
                            8 - row
                        )))
                    }
                    '1'..='8' => c as usize - '0' as usize,
                    _ => match Piece::from_fen_char(c) {
                        Some(occupant) => {
                            if col < 8 {
                                grid[row][col] = Some(occupant);
                            }
                            1
                        }
                        None => {
                            return Err(NotationError::InvalidPiecePlacement(format!(
                                "invalid character '{}' in rank {}",
                                c,
                                8 - row
                            )))
                        }
                    },
                };
                after_run = c.is_ascii_digit();
                col += width;
            }
            if col != 8 {
                return Err(NotationError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }

        Ok(grid)
    }

    /// Castling letters must appear at most once each, in `KQkq` order.
    fn parse_castling(castling: &str) -> Result<[CastlingRights; 2], NotationError> {
        if castling == "-" {
            return Ok([CastlingRights::None; 2]);
        }
        if castling.is_empty() {
            return Err(NotationError::InvalidCastlingRights(
                "empty field".to_string(),
            ));
        }

        let mut seen = [false; 4];
        let mut last = None;
        for c in castling.chars() {
            let slot = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => {
                    return Err(NotationError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if last.is_some_and(|prev| slot <= prev) {
                return Err(NotationError::InvalidCastlingRights(format!(
                    "'{}' is repeated or out of KQkq order",
                    castling
                )));
            }
            seen[slot] = true;
            last = Some(slot);
        }

        Ok([
            CastlingRights::from_sides(seen[0], seen[1]),
            CastlingRights::from_sides(seen[2], seen[3]),
        ])
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, NotationError> {
        if ep == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(ep) {
            Some(sq) if sq.rank_char() == '3' || sq.rank_char() == '6' => Ok(Some(sq)),
            _ => Err(NotationError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Encodes the fields back into a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for (row, cells) in self.grid.iter().enumerate() {
            let mut empty_count = 0;
            for cell in cells {
                match cell {
                    Some((piece, color)) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char(*color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.active_color.to_fen_char());

        fen.push(' ');
        let [white, black] = self.castling;
        if white.is_none() && black.is_none() {
            fen.push('-');
        } else {
            white.push_fen(Color::White, &mut fen);
            black.push_fen(Color::Black, &mut fen);
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }
}

/// Counters are plain decimal: no sign and no leading zeros.
fn parse_counter(text: &str) -> Option<u32> {
    let canonical = text == "0"
        || (text.starts_with(|c: char| matches!(c, '1'..='9'))
            && text.chars().all(|c| c.is_ascii_digit()));
    if canonical {
        text.parse().ok()
    } else {
        None
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

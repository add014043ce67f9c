//! Per-color castling availability.

use crate::{Color, Piece};

/// Which castling moves a single color may still make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CastlingRights {
    #[default]
    None,
    Kingside,
    Queenside,
    Both,
}

impl CastlingRights {
    /// Builds rights from independent kingside and queenside flags.
    #[inline]
    pub const fn from_sides(kingside: bool, queenside: bool) -> Self {
        match (kingside, queenside) {
            (true, true) => CastlingRights::Both,
            (true, false) => CastlingRights::Kingside,
            (false, true) => CastlingRights::Queenside,
            (false, false) => CastlingRights::None,
        }
    }

    #[inline]
    pub const fn kingside(self) -> bool {
        matches!(self, CastlingRights::Kingside | CastlingRights::Both)
    }

    #[inline]
    pub const fn queenside(self) -> bool {
        matches!(self, CastlingRights::Queenside | CastlingRights::Both)
    }

    /// Drops kingside availability. Rights only ever narrow.
    #[inline]
    pub const fn without_kingside(self) -> Self {
        Self::from_sides(false, self.queenside())
    }

    /// Drops queenside availability.
    #[inline]
    pub const fn without_queenside(self) -> Self {
        Self::from_sides(self.kingside(), false)
    }

    /// Returns true if neither castle remains available.
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, CastlingRights::None)
    }

    /// Appends this color's FEN castling letters ("K", "Q", "KQ" or nothing)
    /// to `out`.
    pub fn push_fen(self, color: Color, out: &mut String) {
        if self.kingside() {
            out.push(Piece::King.to_fen_char(color));
        }
        if self.queenside() {
            out.push(Piece::Queen.to_fen_char(color));
        }
    }
}

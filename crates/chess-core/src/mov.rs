//! Coordinate move representation.

use crate::{Piece, Square};
use std::fmt;

/// A move given as origin and destination squares, with the promotion choice
/// when a pawn reaches the last rank.
///
/// Text form is long algebraic coordinates: `e2e4`, `e7e8q`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
}

impl Move {
    /// Creates a move without a promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a move that promotes to `piece`.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the chosen promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    /// Returns the coordinate notation for this move (e.g. "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(piece) = self.promotion {
            s.push(piece.letter());
        }
        s
    }

    /// Parses a move from coordinate notation.
    ///
    /// The promotion suffix must name a knight, bishop, rook or queen. Whether
    /// the move is legal is for the engine to decide.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s[4..].chars().next() {
            None => Some(Move::new(from, to)),
            Some(c) => {
                let piece = Piece::from_letter(c).filter(|p| p.is_promotion_choice())?;
                Some(Move::with_promotion(from, to, piece))
            }
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn accessors() {
        let m = Move::new(sq("e2"), sq("e4"));
        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));
        assert_eq!(m.promotion(), None);
    }

    #[test]
    fn to_uci() {
        assert_eq!(Move::new(sq("g1"), sq("f3")).to_uci(), "g1f3");
        assert_eq!(
            Move::with_promotion(sq("e7"), sq("e8"), Piece::Knight).to_uci(),
            "e7e8n"
        );
    }

    #[test]
    fn from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m, Move::new(sq("e2"), sq("e4")));

        let promo = Move::from_uci("a2a1Q").unwrap();
        assert_eq!(promo.promotion(), Some(Piece::Queen));

        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
        assert!(Move::from_uci("e7e8k").is_none());
        assert!(Move::from_uci("e7e8p").is_none());
        assert!(Move::from_uci("e7e8x").is_none());
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e4qq").is_none());
        assert!(Move::from_uci("é2e4").is_none());
    }

    #[test]
    fn debug_display() {
        let m = Move::new(sq("e2"), sq("e4"));
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }
}

//! Board square representation and algebraic/grid conversion.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when a square cannot be parsed or built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square name: '{0}'")]
    InvalidName(String),

    #[error("grid index ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: i16, col: i16 },
}

/// A square on the chess board.
///
/// Squares use grid coordinates as the board is printed: row 0 is rank 8 and
/// column 0 is file a, so a8 = 0, h8 = 7, a1 = 56 and h1 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from grid coordinates.
    #[inline]
    pub const fn from_grid(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from signed grid coordinates, reporting the offending
    /// pair when it falls off the board.
    pub fn try_from_grid(row: i16, col: i16) -> Result<Self, SquareError> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Square((row * 8 + col) as u8))
        } else {
            Err(SquareError::OutOfBounds { row, col })
        }
    }

    /// Creates a square from its index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g. "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0];
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square((b'8' - rank) * 8 + (file - b'a')))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Grid row, 0 for rank 8 through 7 for rank 1.
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Grid column, 0 for file a through 7 for file h.
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// File letter, 'a'-'h'.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Rank digit, '1'-'8'.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }

    /// Returns the square shifted by the given grid deltas, or `None` if it
    /// leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Square((row * 8 + col) as u8))
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Iterates over all 64 squares in board order (a8, b8, ..., h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| SquareError::InvalidName(s.to_string()))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_coordinates() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.row(), 4);
        assert_eq!(e4.col(), 4);
        assert_eq!(Square::from_grid(4, 4), Some(e4));
        assert_eq!(Square::A8.row(), 0);
        assert_eq!(Square::H1.row(), 7);
        assert_eq!(Square::H1.col(), 7);
    }

    #[test]
    fn from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic("E4"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("e4".parse::<Square>().unwrap().to_algebraic(), "e4");
        assert_eq!(
            "z9".parse::<Square>(),
            Err(SquareError::InvalidName("z9".to_string()))
        );
        assert_eq!(
            Square::try_from_grid(8, 0),
            Err(SquareError::OutOfBounds { row: 8, col: 0 })
        );
        assert!(Square::try_from_grid(-1, 3).is_err());
        assert_eq!(Square::try_from_grid(7, 7), Ok(Square::H1));
    }

    #[test]
    fn algebraic_roundtrip_all_squares() {
        for sq in Square::all() {
            assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::E1.offset(-1, 0), Square::from_algebraic("e2"));
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::H8.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(1, -1), Square::from_algebraic("g7"));
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", Square::E8), "e8");
        assert_eq!(format!("{:?}", Square::C1), "Square(c1)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offset_stays_on_grid(index in 0u8..64, d_row in -8i8..=8, d_col in -8i8..=8) {
            let sq = Square::from_index(index).unwrap();
            let row = sq.row() as i16 + d_row as i16;
            let col = sq.col() as i16 + d_col as i16;
            match sq.offset(d_row, d_col) {
                Some(target) => {
                    prop_assert_eq!(target.row() as i16, row);
                    prop_assert_eq!(target.col() as i16, col);
                }
                None => prop_assert!(!(0..8).contains(&row) || !(0..8).contains(&col)),
            }
        }

        #[test]
        fn algebraic_name_parses_back(index in 0u8..64) {
            let sq = Square::from_index(index).unwrap();
            prop_assert_eq!(sq.to_algebraic().parse::<Square>(), Ok(sq));
        }
    }
}

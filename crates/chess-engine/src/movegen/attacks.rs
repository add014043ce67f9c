//! Attack detection by ray casting over the grid.

use chess_core::{Color, Piece, Square};

use crate::rules::RuleOptions;
use crate::Position;

/// File and rank directions as (row, col) deltas.
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal directions as (row, col) deltas.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// Knight jumps: every offset with |row| + |col| == 3 and neither zero.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight neighbouring squares.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Walks from `from` in one direction and returns the first occupied square
/// together with its occupant.
#[inline]
pub fn first_hit(
    position: &Position,
    from: Square,
    (d_row, d_col): (i8, i8),
) -> Option<(Square, Piece, Color)> {
    let mut current = from;
    while let Some(next) = current.offset(d_row, d_col) {
        if let Some((piece, color)) = position.piece_at(next) {
            return Some((next, piece, color));
        }
        current = next;
    }
    None
}

/// Returns true if `sq` is attacked by any piece of color `by`.
///
/// Each ray stops at its first occupied square: a rook or queen ends an
/// orthogonal ray with an attack, a bishop or queen a diagonal one, and a
/// pawn does so only from one step away on its capture side. Knights are
/// found by their eight jump offsets. The opposing king counts only when
/// [`RuleOptions::king_contact_is_check`] is set.
pub fn is_square_attacked(
    position: &Position,
    sq: Square,
    by: Color,
    options: &RuleOptions,
) -> bool {
    for dir in ORTHOGONAL {
        if let Some((_, piece, color)) = first_hit(position, sq, dir) {
            if color == by && piece.slides_orthogonally() {
                return true;
            }
        }
    }

    // A pawn of color `by` captures toward its own push direction, so it
    // attacks `sq` from one row behind it.
    let pawn_row = -by.pawn_row_step();
    for dir in DIAGONAL {
        if let Some((hit, piece, color)) = first_hit(position, sq, dir) {
            if color != by {
                continue;
            }
            if piece.slides_diagonally() {
                return true;
            }
            if piece == Piece::Pawn
                && dir.0 == pawn_row
                && hit.row().abs_diff(sq.row()) == 1
            {
                return true;
            }
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if let Some(target) = sq.offset(d_row, d_col) {
            if position.piece_at(target) == Some((Piece::Knight, by)) {
                return true;
            }
        }
    }

    if options.king_contact_is_check {
        for (d_row, d_col) in KING_OFFSETS {
            if let Some(target) = sq.offset(d_row, d_col) {
                if position.piece_at(target) == Some((Piece::King, by)) {
                    return true;
                }
            }
        }
    }

    false
}

/// Returns true if the king of the given color is in check.
///
/// A position without such a king is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color, options: &RuleOptions) -> bool {
    match position.king_square(king_color) {
        Some(king_sq) => is_square_attacked(position, king_sq, king_color.opposite(), options),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn knight_offsets_are_never_straight() {
        for (d_row, d_col) in KNIGHT_OFFSETS {
            assert_ne!(d_row, 0);
            assert_ne!(d_col, 0);
            assert_eq!(d_row.abs() + d_col.abs(), 3);
        }
    }

    #[test]
    fn first_hit_stops_at_blocker() {
        let position = Position::startpos();
        assert_eq!(
            first_hit(&position, sq("e4"), (-1, 0)),
            Some((sq("e2"), Piece::Pawn, Color::White))
        );
        assert_eq!(first_hit(&position, sq("a4"), (0, -1)), None);
    }

    #[test]
    fn square_attacked_startpos() {
        let position = Position::startpos();
        let options = RuleOptions::default();
        assert!(is_square_attacked(&position, sq("e3"), Color::White, &options));
        assert!(is_square_attacked(&position, sq("f6"), Color::Black, &options));
        assert!(!is_square_attacked(&position, sq("e4"), Color::White, &options));
        assert!(!is_square_attacked(&position, sq("e5"), Color::Black, &options));
    }

    #[test]
    fn king_attacked_startpos() {
        let position = Position::startpos();
        let options = RuleOptions::default();
        assert!(!is_king_attacked(&position, Color::White, &options));
        assert!(!is_king_attacked(&position, Color::Black, &options));
    }

    #[test]
    fn slider_checks_and_blocks() {
        let options = RuleOptions::default();
        assert!(is_king_attacked(&pos("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"), Color::Black, &options));
        assert!(!is_king_attacked(&pos("4k3/4p3/8/8/8/8/8/4R1K1 b - - 0 1"), Color::Black, &options));
        assert!(is_king_attacked(&pos("4k3/8/8/1B6/8/8/8/6K1 b - - 0 1"), Color::Black, &options));
        // A rook on a diagonal does not give check.
        assert!(!is_king_attacked(&pos("4k3/8/8/1R6/8/8/8/6K1 b - - 0 1"), Color::Black, &options));
        assert!(is_king_attacked(&pos("4k3/8/8/8/Q7/8/8/6K1 b - - 0 1"), Color::Black, &options));
    }

    #[test]
    fn pawn_checks_only_forward() {
        let options = RuleOptions::default();
        // White pawn on d7 attacks e8.
        assert!(is_king_attacked(&pos("4k3/3P4/8/8/8/8/8/6K1 b - - 0 1"), Color::Black, &options));
        // A white pawn behind the black king does not.
        assert!(!is_king_attacked(&pos("8/3P4/4k3/8/8/8/8/6K1 b - - 0 1"), Color::Black, &options));
        // Black pawn on f2 attacks the white king on g1.
        assert!(is_king_attacked(&pos("4k3/8/8/8/8/8/5p2/6K1 w - - 0 1"), Color::White, &options));
        // A distant pawn on the diagonal is only a blocker.
        assert!(!is_king_attacked(&pos("4k3/8/8/8/8/4p3/8/6K1 w - - 0 1"), Color::White, &options));
    }

    #[test]
    fn knight_checks() {
        let options = RuleOptions::default();
        assert!(is_king_attacked(&pos("4k3/8/3N4/8/8/8/8/6K1 b - - 0 1"), Color::Black, &options));
        assert!(!is_king_attacked(&pos("4k3/8/4N3/8/8/8/8/6K1 b - - 0 1"), Color::Black, &options));
    }

    #[test]
    fn king_contact_follows_options() {
        let position = pos("8/8/8/3kK3/8/8/8/8 w - - 0 1");
        assert!(is_king_attacked(&position, Color::White, &RuleOptions::default()));
        assert!(!is_king_attacked(&position, Color::White, &RuleOptions::lenient()));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let position = pos("8/8/8/8/8/8/8/R7 b - - 0 1");
        assert!(!is_king_attacked(&position, Color::Black, &RuleOptions::default()));
    }
}

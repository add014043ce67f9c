//! Move generation.
//!
//! Moves are produced per piece: first the pseudo-legal destinations given by
//! the piece's movement pattern and the board occupancy, then the legal subset
//! obtained by playing each candidate on a scratch copy of the position and
//! rejecting those that leave the mover's king in check.

mod attacks;
pub mod perft;

use chess_core::{Color, Move, Piece, Square};
use tracing::trace;

use crate::position::{CastleSide, KING_HOME_COL};
use crate::rules::RuleOptions;
use crate::Position;

pub use attacks::{
    first_hit, is_king_attacked, is_square_attacked, DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONAL,
};

/// Destination squares of a single piece, with a fixed capacity.
///
/// A queen reaches at most 27 squares, so the list never spills to the heap.
#[derive(Clone, Copy)]
pub struct Destinations {
    squares: [Square; Self::CAPACITY],
    len: usize,
}

impl Destinations {
    /// More than any single piece can reach.
    pub const CAPACITY: usize = 32;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Destinations {
            squares: [Square::A8; Self::CAPACITY],
            len: 0,
        }
    }

    /// Adds a square to the list.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::CAPACITY);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    /// Returns the number of squares.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the squares.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns true if `sq` is in the list.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Retains only squares for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Destinations {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for Destinations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns true if a pawn moving to `to` must promote.
#[inline]
pub fn is_promotion(position: &Position, from: Square, to: Square) -> bool {
    matches!(position.piece_at(from), Some((Piece::Pawn, color)) if to.row() == color.promotion_row())
}

/// Generates the pseudo-legal destinations of the piece on `from`, for the
/// color that occupies it.
pub fn pseudo_legal_destinations(
    position: &Position,
    from: Square,
    options: &RuleOptions,
) -> Destinations {
    let mut out = Destinations::new();
    let Some((piece, color)) = position.piece_at(from) else {
        return out;
    };

    match piece {
        Piece::Pawn => pawn_destinations(position, from, color, &mut out),
        Piece::Knight => step_destinations(position, from, color, &KNIGHT_OFFSETS, &mut out),
        Piece::Bishop => slide_destinations(position, from, color, &DIAGONAL, &mut out),
        Piece::Rook => slide_destinations(position, from, color, &ORTHOGONAL, &mut out),
        Piece::Queen => {
            slide_destinations(position, from, color, &ORTHOGONAL, &mut out);
            slide_destinations(position, from, color, &DIAGONAL, &mut out);
        }
        Piece::King => {
            step_destinations(position, from, color, &KING_OFFSETS, &mut out);
            castling_destinations(position, from, color, options, &mut out);
        }
    }

    out
}

/// Generates the legal destinations of the piece on `from`.
///
/// Empty when the square is empty or holds a piece that does not belong to
/// the side to move.
pub fn legal_destinations(position: &Position, from: Square, options: &RuleOptions) -> Destinations {
    let color = match position.piece_at(from) {
        Some((_, color)) if color == position.side_to_move => color,
        _ => return Destinations::new(),
    };

    let mut moves = pseudo_legal_destinations(position, from, options);

    // One scratch copy is reused for every candidate.
    let mut scratch = Position::empty();
    moves.retain(|to| {
        scratch.clone_from(position);
        scratch.relocate(from, to, None);
        let legal = !is_king_attacked(&scratch, color, options);
        if !legal {
            trace!(%from, %to, "candidate leaves own king in check");
        }
        legal
    });

    moves
}

/// Returns every legal move of the side to move in board order, with each
/// promotion expanded into one move per promotion piece.
pub fn legal_moves(position: &Position, options: &RuleOptions) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, _, color) in position.occupants() {
        if color != position.side_to_move {
            continue;
        }
        for &to in &legal_destinations(position, from, options) {
            if is_promotion(position, from, to) {
                for piece in Piece::PROMOTION_CHOICES {
                    moves.push(Move::with_promotion(from, to, piece));
                }
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position, options: &RuleOptions) -> bool {
    position.occupants().any(|(from, _, color)| {
        color == position.side_to_move && !legal_destinations(position, from, options).is_empty()
    })
}

fn pawn_destinations(position: &Position, from: Square, color: Color, out: &mut Destinations) {
    let step = color.pawn_row_step();

    if let Some(one) = from.offset(step, 0) {
        if position.piece_at(one).is_none() {
            out.push(one);
            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(step, 0) {
                    if position.piece_at(two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(target) = from.offset(step, d_col) else {
            continue;
        };
        match position.piece_at(target) {
            Some((_, occupant)) if occupant != color => out.push(target),
            // The en passant target is taken even though nothing stands on it.
            None if position.en_passant == Some(target) => out.push(target),
            _ => {}
        }
    }
}

/// Single-step pieces: knight jumps and king steps.
fn step_destinations(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Destinations,
) {
    for &(d_row, d_col) in offsets {
        if let Some(target) = from.offset(d_row, d_col) {
            match position.piece_at(target) {
                Some((_, occupant)) if occupant == color => {}
                _ => out.push(target),
            }
        }
    }
}

/// Ray walk: empty squares are added, the first occupied square is added if it
/// holds an opposing piece, and the ray ends there.
fn slide_destinations(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Destinations,
) {
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match position.piece_at(next) {
                None => out.push(next),
                Some((_, occupant)) => {
                    if occupant != color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

fn castling_destinations(
    position: &Position,
    from: Square,
    color: Color,
    options: &RuleOptions,
    out: &mut Destinations,
) {
    let row = color.home_row();
    if from.row() != row || from.col() != KING_HOME_COL {
        return;
    }
    let rights = position.castling_rights(color);
    if rights.is_none() {
        return;
    }
    if options.castling_path_must_be_safe && is_king_attacked(position, color, options) {
        return;
    }

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        let allowed = match side {
            CastleSide::Kingside => rights.kingside(),
            CastleSide::Queenside => rights.queenside(),
        };
        if !allowed {
            continue;
        }

        let (rook_col, _) = side.rook_cols();
        let rook_sq = Square::from_grid(row, rook_col);
        if rook_sq.and_then(|sq| position.piece_at(sq)) != Some((Piece::Rook, color)) {
            continue;
        }

        let (low, high) = if rook_col < KING_HOME_COL {
            (rook_col + 1, KING_HOME_COL)
        } else {
            (KING_HOME_COL + 1, rook_col)
        };
        let path_clear = (low..high)
            .filter_map(|col| Square::from_grid(row, col))
            .all(|sq| position.piece_at(sq).is_none());
        if !path_clear {
            continue;
        }

        let king_target = side.king_target_col();
        if options.castling_path_must_be_safe {
            // The square the king crosses; the landing square is left to the
            // legality filter.
            let crossed = (KING_HOME_COL + king_target) / 2;
            let crossed_sq = Square::from_grid(row, crossed);
            if crossed_sq.is_some_and(|sq| {
                is_square_attacked(position, sq, color.opposite(), options)
            }) {
                continue;
            }
        }

        if let Some(target) = Square::from_grid(row, king_target) {
            out.push(target);
        }
    }
}

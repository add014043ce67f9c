//! Plain-text board diagram.

use chess_core::Square;
use chess_engine::Board;

/// Draws the board with White at the bottom.
///
/// Empty squares print as `.`, squares listed in `marks` as `*` (or the
/// occupant's letter in brackets when occupied).
pub fn render(board: &Board, marks: &[Square]) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        out.push(char::from(b'8' - row));
        out.push(' ');
        for col in 0..8u8 {
            let Some(sq) = Square::from_grid(row, col) else {
                continue;
            };
            let marked = marks.contains(&sq);
            match (board.position().piece_at(sq), marked) {
                (Some((piece, color)), true) => {
                    out.push('[');
                    out.push(piece.to_fen_char(color));
                    out.push(']');
                }
                (Some((piece, color)), false) => {
                    out.push(' ');
                    out.push(piece.to_fen_char(color));
                    out.push(' ');
                }
                (None, true) => out.push_str(" * "),
                (None, false) => out.push_str(" . "),
            }
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");
    out
}

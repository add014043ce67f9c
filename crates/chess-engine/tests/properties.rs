//! Property-based tests over random legal playouts.

use chess_core::{CastlingRights, Color, Piece};
use chess_engine::{is_king_attacked, Board, MoveOutcome, Position, RuleOptions};
use proptest::prelude::*;
use proptest::sample::Index;

fn options_strategy() -> impl Strategy<Value = RuleOptions> {
    prop_oneof![Just(RuleOptions::STANDARD), Just(RuleOptions::lenient())]
}

fn playout_strategy() -> impl Strategy<Value = Vec<Index>> {
    prop::collection::vec(any::<Index>(), 0..60)
}

/// Plays the legal move picked by `choice`. Returns false once the game has
/// ended.
fn step(board: &mut Board, choice: &Index) -> bool {
    let moves = board.all_legal_moves();
    if moves.is_empty() {
        return false;
    }
    let m = *choice.get(&moves);
    let outcome = board.apply_uci(&m.to_uci());
    assert!(
        matches!(outcome, Ok(MoveOutcome::Played(_))),
        "{m} from {} gave {outcome:?}",
        board.fen()
    );
    true
}

fn narrowed(before: CastlingRights, after: CastlingRights) -> bool {
    (!after.kingside() || before.kingside()) && (!after.queenside() || before.queenside())
}

proptest! {
    #[test]
    fn prop_fen_roundtrip(options in options_strategy(), choices in playout_strategy()) {
        let mut board = Board::new().with_options(options);
        for choice in &choices {
            let fen = board.fen().to_string();
            let decoded = Position::from_fen(&fen).unwrap();
            prop_assert_eq!(&decoded, board.position());
            prop_assert_eq!(decoded.to_fen(), fen);
            if !step(&mut board, choice) {
                break;
            }
        }
    }

    #[test]
    fn prop_legal_moves_never_leave_king_in_check(
        options in options_strategy(),
        choices in playout_strategy(),
    ) {
        let mut board = Board::new().with_options(options);
        for choice in &choices {
            let mover = board.side_to_move();
            for m in board.all_legal_moves() {
                let mut next = *board.position();
                next.play(m.from(), m.to(), m.promotion(), &options);
                prop_assert!(
                    !is_king_attacked(&next, mover, &options),
                    "{} leaves {} in check from {}", m, mover, board.fen()
                );
            }
            if !step(&mut board, choice) {
                break;
            }
        }
    }

    #[test]
    fn prop_castling_rights_only_narrow(choices in playout_strategy()) {
        let mut board = Board::new();
        for choice in &choices {
            let before = Color::BOTH.map(|c| board.castling_rights(c));
            if !step(&mut board, choice) {
                break;
            }
            for (i, color) in Color::BOTH.into_iter().enumerate() {
                prop_assert!(narrowed(before[i], board.castling_rights(color)));
            }
        }
    }

    #[test]
    fn prop_knights_never_move_straight(choices in playout_strategy()) {
        let mut board = Board::new();
        for choice in &choices {
            for piece in board.pieces().iter().filter(|p| p.piece == Piece::Knight) {
                for to in &piece.legal_moves {
                    prop_assert_ne!(to.row(), piece.square.row());
                    prop_assert_ne!(to.col(), piece.square.col());
                }
            }
            if !step(&mut board, choice) {
                break;
            }
        }
    }

    #[test]
    fn prop_pieces_match_grid(choices in playout_strategy()) {
        let mut board = Board::new();
        for choice in &choices {
            let occupants: Vec<_> = board.position().occupants().collect();
            prop_assert_eq!(board.pieces().len(), occupants.len());
            for (piece, (sq, kind, color)) in board.pieces().iter().zip(occupants) {
                prop_assert_eq!(piece.square, sq);
                prop_assert_eq!(piece.piece, kind);
                prop_assert_eq!(piece.color, color);
                prop_assert_eq!(piece.code, kind.to_fen_char(color));
            }
            if !step(&mut board, choice) {
                break;
            }
        }
        prop_assert!(board.history().len() <= choices.len() + 1);
    }

    #[test]
    fn prop_en_passant_target_sits_behind_a_pawn(choices in playout_strategy()) {
        let mut board = Board::new();
        for choice in &choices {
            if !step(&mut board, choice) {
                break;
            }
            if let Some(target) = board.en_passant_target() {
                let mover = board.side_to_move().opposite();
                let pawn = target.offset(mover.pawn_row_step(), 0).unwrap();
                prop_assert_eq!(board.position().piece_at(pawn), Some((Piece::Pawn, mover)));
            }
        }
    }
}

//! JSON rendering of a board for scripting.

use chess_core::Color;
use chess_engine::{Board, GameState};
use serde::Serialize;

/// JSON representation of a board's state.
#[derive(Debug, Serialize)]
pub struct StateJson<'a> {
    /// Canonical FEN.
    pub fen: &'a str,
    /// "white" or "black".
    pub side_to_move: &'static str,
    pub state: GameState,
    pub in_check: bool,
    /// FEN castling field, e.g. "KQkq" or "-".
    pub castling: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en_passant: Option<String>,
    pub halfmove_counter: u32,
    pub fullmove_number: u32,
    pub fifty_move_claimable: bool,
    /// Legal moves in coordinate notation.
    pub legal_moves: Vec<String>,
}

impl<'a> StateJson<'a> {
    pub fn new(board: &'a Board) -> Self {
        let mut castling = String::new();
        for color in Color::BOTH {
            board.castling_rights(color).push_fen(color, &mut castling);
        }
        if castling.is_empty() {
            castling.push('-');
        }

        StateJson {
            fen: board.fen(),
            side_to_move: match board.side_to_move() {
                Color::White => "white",
                Color::Black => "black",
            },
            state: board.state(),
            in_check: board.is_check(),
            castling,
            en_passant: board.en_passant_target().map(|sq| sq.to_algebraic()),
            halfmove_counter: board.halfmove_counter(),
            fullmove_number: board.fullmove_number(),
            fifty_move_claimable: board.fifty_move_claimable(),
            legal_moves: board.all_legal_moves().iter().map(|m| m.to_uci()).collect(),
        }
    }
}

/// Serializes the board state as pretty-printed JSON.
pub fn to_json(board: &Board) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&StateJson::new(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn start_position_json() {
        let value: Value = serde_json::from_str(&to_json(&Board::new()).unwrap()).unwrap();
        assert_eq!(value["side_to_move"], "white");
        assert_eq!(value["state"], "Active");
        assert_eq!(value["castling"], "KQkq");
        assert_eq!(value["in_check"], false);
        assert!(value.get("en_passant").is_none());
        assert_eq!(value["legal_moves"].as_array().unwrap().len(), 20);
    }

    #[test]
    fn checkmate_json() {
        let board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let json = StateJson::new(&board);
        assert_eq!(json.state, GameState::Checkmate);
        assert!(json.in_check);
        assert!(json.legal_moves.is_empty());
    }

    #[test]
    fn en_passant_and_no_castling() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let json = StateJson::new(&board);
        assert_eq!(json.castling, "-");
        assert_eq!(json.en_passant.as_deref(), Some("d6"));
        assert!(json.legal_moves.contains(&"e5d6".to_string()));
    }
}

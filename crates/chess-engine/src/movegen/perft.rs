//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions count once per promotion piece.

use chess_core::Move;

use super::legal_moves;
use crate::rules::RuleOptions;
use crate::Position;

fn child(position: &Position, m: Move, options: &RuleOptions) -> Position {
    let mut next = *position;
    next.play(m.from(), m.to(), m.promotion(), options);
    next
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32, options: &RuleOptions) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position, options);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&child(position, m, options), depth - 1, options))
        .sum()
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32, options: &RuleOptions) -> Vec<(String, u64)> {
    let moves = legal_moves(position, options);
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        let nodes = if depth > 1 {
            perft(&child(position, m, options), depth - 1, options)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

use crate::board::{BoardState, Move};
use crate::search::eval::Evaluator;
use crate::search::{move_at_root, pass_at_root, NodeCounter, SearchResult, INFINITY};

/// Exhaustive depth-limited minimax. Every node within `depth` is visited.
pub fn search(root: &BoardState, eval: &Evaluator, depth: u32) -> SearchResult {
    let mut counter = NodeCounter::default();
    counter.bump();
    if depth == 0 { return pass_at_root(root, eval, &counter); }
    let moves = root.legal_moves();
    if moves.is_empty() { return pass_at_root(root, eval, &counter); }

    let mut best_score = -INFINITY;
    let mut bestmove: Option<Move> = None;
    for m in moves {
        let child = root.apply(&m);
        let score = -negamax(&child, eval, depth - 1, &mut counter);
        log::debug!("minimax root {} -> {}", m, score);
        // Strict: the first move reaching the best value is kept.
        if score > best_score { best_score = score; bestmove = Some(m); }
    }
    match bestmove {
        Some(m) => move_at_root(root, eval, m, best_score, &counter),
        None => pass_at_root(root, eval, &counter),
    }
}

// Value of `state` for its side to move.
fn negamax(state: &BoardState, eval: &Evaluator, depth: u32, counter: &mut NodeCounter) -> i32 {
    counter.bump();
    if depth == 0 { return eval.evaluate_relative(state.board(), state.side_to_move()); }
    let moves = state.legal_moves();
    if moves.is_empty() { return eval.evaluate_relative(state.board(), state.side_to_move()); }
    let mut best = -INFINITY;
    for m in &moves {
        let child = state.apply(m);
        let score = -negamax(&child, eval, depth - 1, counter);
        if score > best { best = score; }
    }
    best
}

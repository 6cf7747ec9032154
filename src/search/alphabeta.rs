use crate::board::{BoardState, Move};
use crate::search::eval::Evaluator;
use crate::search::{move_at_root, pass_at_root, NodeCounter, SearchResult, INFINITY};

/// Depth-limited alpha-beta. Picks the same move and value as minimax, visiting no more nodes.
pub fn search(root: &BoardState, eval: &Evaluator, depth: u32) -> SearchResult {
    let mut counter = NodeCounter::default();
    counter.bump();
    if depth == 0 { return pass_at_root(root, eval, &counter); }
    let moves = root.legal_moves();
    if moves.is_empty() { return pass_at_root(root, eval, &counter); }

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_score = -INFINITY;
    let mut bestmove: Option<Move> = None;
    for m in moves {
        let child = root.apply(&m);
        let score = -alphabeta(&child, eval, depth - 1, -beta, -alpha, &mut counter);
        log::debug!("alphabeta root {} -> {} (alpha {})", m, score, alpha);
        // A later sibling tying alpha comes back as an upper bound <= alpha, so ties keep the first move.
        if score > best_score { best_score = score; bestmove = Some(m); }
        if score > alpha { alpha = score; }
    }
    match bestmove {
        Some(m) => move_at_root(root, eval, m, best_score, &counter),
        None => pass_at_root(root, eval, &counter),
    }
}

// Fail-soft negamax alpha-beta: exact inside (alpha, beta), a bound outside it.
fn alphabeta(
    state: &BoardState,
    eval: &Evaluator,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    counter: &mut NodeCounter,
) -> i32 {
    counter.bump();
    if depth == 0 { return eval.evaluate_relative(state.board(), state.side_to_move()); }
    let moves = state.legal_moves();
    if moves.is_empty() { return eval.evaluate_relative(state.board(), state.side_to_move()); }
    let mut best = -INFINITY;
    for m in &moves {
        let child = state.apply(m);
        let score = -alphabeta(&child, eval, depth - 1, -beta, -alpha, counter);
        if score > best { best = score; }
        if best > alpha { alpha = best; }
        if alpha >= beta { break; }
    }
    best
}

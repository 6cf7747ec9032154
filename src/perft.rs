use crate::board::BoardState;

// Leaf count of the legal move tree; a capture chain counts as one move.
pub fn perft(state: &BoardState, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = state.legal_moves();
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for m in &moves {
        let child = state.apply(m);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Per-root-move leaf counts, in generation order.
pub fn divide(state: &BoardState, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 { return Vec::new(); }
    state.legal_moves().iter().map(|m| (m.to_string(), perft(&state.apply(m), depth - 1))).collect()
}

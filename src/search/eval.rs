use serde::{Deserialize, Serialize};
use crate::board::{Board, Cell, Player, SIZE};

pub const KING_FACTOR: i32 = 2;

/// Largest accepted row weight magnitude. A full board of kings at this weight still
/// leaves the evaluation far inside `i32`, so negating scores in the search cannot overflow.
pub const MAX_ROW_WEIGHT: i32 = 1_000_000;

/// Per-row weights, indexed by how far a piece has advanced from its owner's home row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWeights(pub [i32; SIZE]);

impl RowWeights {
    pub fn weight(&self, owner: Player, row: usize) -> i32 { self.0[owner.advancement(row)] }

    /// First weight outside `-MAX_ROW_WEIGHT..=MAX_ROW_WEIGHT`, if any.
    pub fn out_of_range(&self) -> Option<i32> {
        self.0.iter().copied().find(|w| w.unsigned_abs() > MAX_ROW_WEIGHT as u32)
    }
}

// Value of one piece for its owner.
fn piece_value(weights: &RowWeights, cell: Cell, row: usize) -> i32 {
    match cell {
        Cell::Empty => 0,
        Cell::Man(p) => weights.weight(p, row),
        Cell::King(p) => KING_FACTOR * weights.weight(p, row),
    }
}

/// Static evaluator, always scored for `max_player`.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator {
    pub weights: RowWeights,
    pub max_player: Player,
}

impl Evaluator {
    pub fn new(weights: RowWeights, max_player: Player) -> Self { Self { weights, max_player } }

    pub fn evaluate(&self, board: &Board) -> i32 {
        let mut score = 0;
        for (sq, cell) in board.pieces() {
            let v = piece_value(&self.weights, cell, sq.row as usize);
            if cell.owner() == Some(self.max_player) { score += v; } else { score -= v; }
        }
        score
    }

    // +1 on MAX plies, -1 on MIN plies (negamax-friendly)
    pub fn color(&self, to_move: Player) -> i32 {
        if to_move == self.max_player { 1 } else { -1 }
    }

    /// Evaluation from the side-to-move's perspective.
    pub fn evaluate_relative(&self, board: &Board, to_move: Player) -> i32 {
        self.color(to_move) * self.evaluate(board)
    }
}

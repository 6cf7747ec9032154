pub mod eval;
pub mod minimax;
pub mod alphabeta;

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::board::{BoardState, Move};
use eval::Evaluator;

// Wider than any reachable evaluation; symmetric so negation never overflows.
pub const INFINITY: i32 = i32::MAX;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    #[default]
    Minimax,
    AlphaBeta,
}

impl FromStr for Algorithm {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MINIMAX" => Ok(Algorithm::Minimax),
            "ALPHABETA" | "ALPHA-BETA" => Ok(Algorithm::AlphaBeta),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Algorithm::Minimax => write!(f, "MINIMAX"), Algorithm::AlphaBeta => write!(f, "ALPHABETA") }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub algorithm: Algorithm,
    pub depth: u32,
}

/// Visited-node tally threaded through the recursion by reference.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounter(u64);

impl NodeCounter {
    pub fn bump(&mut self) { self.0 += 1; }
    pub fn get(&self) -> u64 { self.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// `myopic` scores the child reached by `mv`, `farsighted` is the backed-up root value.
    Move { mv: Move, myopic: i32, farsighted: i32 },
    /// No move to make (no legal move, or depth 0); `utility` is the root evaluation.
    Pass { utility: i32 },
}

impl Decision {
    pub fn notation(&self) -> String {
        match self { Decision::Move { mv, .. } => mv.to_string(), Decision::Pass { .. } => "pass".to_string() }
    }

    pub fn myopic(&self) -> i32 {
        match *self { Decision::Move { myopic, .. } => myopic, Decision::Pass { utility } => utility }
    }

    pub fn farsighted(&self) -> i32 {
        match *self { Decision::Move { farsighted, .. } => farsighted, Decision::Pass { utility } => utility }
    }

    pub fn best_move(&self) -> Option<&Move> {
        match self { Decision::Move { mv, .. } => Some(mv), Decision::Pass { .. } => None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub decision: Decision,
    pub nodes: u64,
}

/// Runs the configured algorithm from `root`, scoring for `eval.max_player`.
pub fn search(root: &BoardState, eval: &Evaluator, params: SearchParams) -> SearchResult {
    let res = match params.algorithm {
        Algorithm::Minimax => minimax::search(root, eval, params.depth),
        Algorithm::AlphaBeta => alphabeta::search(root, eval, params.depth),
    };
    log::info!("{} depth {}: {} (myopic {}, farsighted {}), {} nodes",
        params.algorithm, params.depth, res.decision.notation(),
        res.decision.myopic(), res.decision.farsighted(), res.nodes);
    res
}

// Shared root handling: depth 0 and move-less roots pass with the static value.
pub(crate) fn pass_at_root(root: &BoardState, eval: &Evaluator, counter: &NodeCounter) -> SearchResult {
    SearchResult { decision: Decision::Pass { utility: eval.evaluate(root.board()) }, nodes: counter.get() }
}

pub(crate) fn move_at_root(
    root: &BoardState,
    eval: &Evaluator,
    mv: Move,
    best_relative: i32,
    counter: &NodeCounter,
) -> SearchResult {
    let myopic = eval.evaluate(root.apply(&mv).board());
    let farsighted = eval.color(root.side_to_move()) * best_relative;
    SearchResult { decision: Decision::Move { mv, myopic, farsighted }, nodes: counter.get() }
}

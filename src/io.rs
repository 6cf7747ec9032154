//! Game input/output files.
//!
//! Input, one item per line: player to move (`Star`/`Circle`), algorithm
//! (`MINIMAX`/`ALPHABETA`), depth limit, eight board rows of comma-separated
//! cell symbols (`0`, `S`, `C`, `SK`, `CK`), eight comma-separated row weights.
//! Output: move (or `pass`), myopic utility, farsighted utility, node count.

use std::fmt::Write as _;
use thiserror::Error;
use crate::board::{Board, BoardState, Cell, Player, SIZE};
use crate::search::eval::{Evaluator, RowWeights, MAX_ROW_WEIGHT};
use crate::search::{Algorithm, SearchParams, SearchResult};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("missing {0} line")]
    MissingLine(&'static str),
    #[error("unknown player {0:?}")]
    UnknownPlayer(String),
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
    #[error("invalid depth limit {0:?}")]
    BadDepth(String),
    #[error("board row {row} has {len} cells, expected 8")]
    BadRowLength { row: usize, len: usize },
    #[error("unknown cell symbol {symbol:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, symbol: String },
    #[error("expected 8 row weights, got {0}")]
    BadWeightCount(usize),
    #[error("invalid row weight {0:?}")]
    BadWeight(String),
    #[error("row weight {0} is outside -{max}..={max}", max = MAX_ROW_WEIGHT)]
    WeightOutOfRange(i32),
}

/// Everything the game search needs, as read from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInput {
    pub player: Player,
    pub params: SearchParams,
    pub board: Board,
    pub weights: RowWeights,
}

impl GameInput {
    /// Root state with the maximizing player to move.
    pub fn root(&self) -> BoardState { BoardState::new(self.board, self.player) }

    pub fn evaluator(&self) -> Evaluator { Evaluator::new(self.weights, self.player) }
}

pub fn parse_input(text: &str) -> Result<GameInput, InputError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let player_line = lines.next().ok_or(InputError::MissingLine("player"))?;
    let player = player_line.parse::<Player>().map_err(|_| InputError::UnknownPlayer(player_line.to_string()))?;

    let algo_line = lines.next().ok_or(InputError::MissingLine("algorithm"))?;
    let algorithm = algo_line.parse::<Algorithm>().map_err(|_| InputError::UnknownAlgorithm(algo_line.to_string()))?;

    let depth_line = lines.next().ok_or(InputError::MissingLine("depth limit"))?;
    let depth = depth_line.parse::<u32>().map_err(|_| InputError::BadDepth(depth_line.to_string()))?;

    let mut cells = [[Cell::Empty; SIZE]; SIZE];
    for (row, cells_row) in cells.iter_mut().enumerate() {
        let line = lines.next().ok_or(InputError::MissingLine("board row"))?;
        let symbols: Vec<&str> = line.split(',').map(str::trim).collect();
        if symbols.len() != SIZE { return Err(InputError::BadRowLength { row, len: symbols.len() }); }
        for (col, sym) in symbols.iter().enumerate() {
            cells_row[col] = Cell::from_symbol(sym)
                .ok_or_else(|| InputError::UnknownCell { row, col, symbol: sym.to_string() })?;
        }
    }

    let weight_line = lines.next().ok_or(InputError::MissingLine("row weights"))?;
    let raw: Vec<&str> = weight_line.split(',').map(str::trim).collect();
    if raw.len() != SIZE { return Err(InputError::BadWeightCount(raw.len())); }
    let mut weights = [0i32; SIZE];
    for (w, s) in weights.iter_mut().zip(&raw) {
        *w = s.parse().map_err(|_| InputError::BadWeight(s.to_string()))?;
    }
    let weights = RowWeights(weights);
    if let Some(w) = weights.out_of_range() { return Err(InputError::WeightOutOfRange(w)); }

    Ok(GameInput {
        player,
        params: SearchParams { algorithm, depth },
        board: Board::from_cells(cells),
        weights,
    })
}

pub fn format_output(res: &SearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", res.decision.notation());
    let _ = writeln!(out, "{}", res.decision.myopic());
    let _ = writeln!(out, "{}", res.decision.farsighted());
    let _ = writeln!(out, "{}", res.nodes);
    out
}

//! Grid-world MDP with walking and running moves, solved by value iteration.

pub mod iteration;

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use iteration::{best_policy, format_policy, value_iteration, Policy, PolicyAction, Utilities};

#[derive(Debug, Error, PartialEq)]
pub enum MdpError {
    #[error("discount must lie in (0, 1], got {0}")]
    BadDiscount(f64),
    #[error("probability must lie in [0, 1], got {0}")]
    BadProbability(f64),
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfGrid { row: usize, col: usize, rows: usize, cols: usize },
    #[error("grid has no cells")]
    EmptyGrid,
}

/// Grid position, row 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self { Self { row, col } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gait {
    Walk,
    Run,
}

impl Gait {
    fn stride(self) -> isize { match self { Gait::Walk => 1, Gait::Run => 2 } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Right,
    Up,
    Left,
    Down,
}

impl Heading {
    fn delta(self) -> (isize, isize) {
        match self { Heading::Right => (0, 1), Heading::Up => (-1, 0), Heading::Left => (0, -1), Heading::Down => (1, 0) }
    }

    // quarter turn counter-clockwise
    pub fn turn_left(self) -> Self {
        match self { Heading::Right => Heading::Up, Heading::Up => Heading::Left, Heading::Left => Heading::Down, Heading::Down => Heading::Right }
    }

    pub fn turn_right(self) -> Self {
        match self { Heading::Right => Heading::Down, Heading::Down => Heading::Left, Heading::Left => Heading::Up, Heading::Up => Heading::Right }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub gait: Gait,
    pub heading: Heading,
}

impl Action {
    pub const fn new(gait: Gait, heading: Heading) -> Self { Self { gait, heading } }
}

/// Every non-terminal action, in tie-breaking order.
pub const ACTIONS: [Action; 8] = [
    Action::new(Gait::Walk, Heading::Right),
    Action::new(Gait::Run, Heading::Right),
    Action::new(Gait::Walk, Heading::Up),
    Action::new(Gait::Run, Heading::Up),
    Action::new(Gait::Walk, Heading::Left),
    Action::new(Gait::Run, Heading::Left),
    Action::new(Gait::Walk, Heading::Down),
    Action::new(Gait::Run, Heading::Down),
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gait = match self.gait { Gait::Walk => "Walk", Gait::Run => "Run" };
        let heading = match self.heading { Heading::Right => "Right", Heading::Up => "Up", Heading::Left => "Left", Heading::Down => "Down" };
        write!(f, "{gait} {heading}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminalSpec {
    pub row: usize,
    pub col: usize,
    pub reward: f64,
}

/// Serialized description of a grid world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub walls: Vec<Pos>,
    #[serde(default)]
    pub terminals: Vec<TerminalSpec>,
    pub p_walk: f64,
    pub p_run: f64,
    pub reward_walk: f64,
    pub reward_run: f64,
    pub gamma: f64,
}

#[derive(Clone, Debug)]
pub struct GridMdp {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
    terminals: HashMap<Pos, f64>,
    p_walk: f64,
    p_run: f64,
    reward_walk: f64,
    reward_run: f64,
    gamma: f64,
}

impl GridMdp {
    pub fn from_spec(spec: &GridSpec) -> Result<Self, MdpError> {
        if spec.rows == 0 || spec.cols == 0 { return Err(MdpError::EmptyGrid); }
        if !(spec.gamma > 0.0 && spec.gamma <= 1.0) { return Err(MdpError::BadDiscount(spec.gamma)); }
        for p in [spec.p_walk, spec.p_run] {
            if !(0.0..=1.0).contains(&p) { return Err(MdpError::BadProbability(p)); }
        }
        let check = |row: usize, col: usize| {
            if row < spec.rows && col < spec.cols { Ok(Pos::new(row, col)) }
            else { Err(MdpError::OutOfGrid { row, col, rows: spec.rows, cols: spec.cols }) }
        };
        let mut open = vec![true; spec.rows * spec.cols];
        for w in &spec.walls {
            let pos = check(w.row, w.col)?;
            open[pos.row * spec.cols + pos.col] = false;
        }
        let mut terminals = HashMap::new();
        for t in &spec.terminals {
            terminals.insert(check(t.row, t.col)?, t.reward);
        }
        Ok(Self {
            rows: spec.rows,
            cols: spec.cols,
            open,
            terminals,
            p_walk: spec.p_walk,
            p_run: spec.p_run,
            reward_walk: spec.reward_walk,
            reward_run: spec.reward_run,
            gamma: spec.gamma,
        })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn gamma(&self) -> f64 { self.gamma }

    pub fn index(&self, pos: Pos) -> usize { pos.row * self.cols + pos.col }

    /// True for cells the agent can occupy (inside the grid and not a wall).
    pub fn is_state(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols && self.open[self.index(pos)]
    }

    pub fn terminal_reward(&self, pos: Pos) -> Option<f64> { self.terminals.get(&pos).copied() }

    /// All states in row-major order.
    pub fn states(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Pos::new(r, c))).filter(move |p| self.is_state(*p))
    }

    pub fn reward(&self, gait: Gait) -> f64 {
        match gait { Gait::Walk => self.reward_walk, Gait::Run => self.reward_run }
    }

    fn shifted(&self, pos: Pos, heading: Heading, steps: isize) -> Option<Pos> {
        let (dr, dc) = heading.delta();
        let r = pos.row as isize + dr * steps;
        let c = pos.col as isize + dc * steps;
        if r < 0 || c < 0 { return None; }
        let p = Pos::new(r as usize, c as usize);
        if self.is_state(p) { Some(p) } else { None }
    }

    /// Where a move actually lands: blocked moves (walls, edges, or a blocked first half of a run) stay put.
    pub fn go(&self, pos: Pos, gait: Gait, heading: Heading) -> Pos {
        let stride = gait.stride();
        for step in 1..stride {
            if self.shifted(pos, heading, step).is_none() { return pos; }
        }
        self.shifted(pos, heading, stride).unwrap_or(pos)
    }

    /// Outcome distribution of `action` from `pos`: the intended heading, or a sideways slip of the same gait.
    pub fn transitions(&self, pos: Pos, action: Action) -> [(f64, Pos); 3] {
        let p = match action.gait { Gait::Walk => self.p_walk, Gait::Run => self.p_run };
        let slip = (1.0 - p) / 2.0;
        [
            (p, self.go(pos, action.gait, action.heading)),
            (slip, self.go(pos, action.gait, action.heading.turn_left())),
            (slip, self.go(pos, action.gait, action.heading.turn_right())),
        ]
    }
}

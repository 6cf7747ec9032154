use std::fmt;
use super::{Action, Gait, GridMdp, Pos, ACTIONS};

pub const DEFAULT_EPSILON: f64 = 0.1;
// Running total (not a streak) of sweeps whose delta repeats the previous one to 3 decimals;
// past this, iteration gives up on convergence.
const STALL_LIMIT: usize = 10;
const MAX_SWEEPS: usize = 100_000;

/// Utility per grid cell, indexed like [`GridMdp::index`]; walls stay at 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Utilities {
    values: Vec<f64>,
    pub sweeps: usize,
    pub delta: f64,
}

impl Utilities {
    pub fn get(&self, mdp: &GridMdp, pos: Pos) -> Option<f64> {
        if mdp.is_state(pos) { Some(self.values[mdp.index(pos)]) } else { None }
    }
}

fn expected_utility(mdp: &GridMdp, values: &[f64], pos: Pos, action: Action) -> f64 {
    mdp.transitions(pos, action).iter().map(|&(p, s)| p * values[mdp.index(s)]).sum()
}

// Action with the highest expected utility; the earliest action in ACTIONS wins ties.
fn best_action(mdp: &GridMdp, values: &[f64], pos: Pos) -> Action {
    let mut best = (ACTIONS[0], expected_utility(mdp, values, pos, ACTIONS[0]));
    for &a in &ACTIONS[1..] {
        let eu = expected_utility(mdp, values, pos, a);
        if eu > best.1 { best = (a, eu); }
    }
    best.0
}

// Bellman backup: best discounted expected utility plus the step reward of the gait that
// reached it. Walking wins when both gaits reach the same maximum.
fn backup(mdp: &GridMdp, values: &[f64], pos: Pos) -> f64 {
    let best_of = |gait: Gait| {
        ACTIONS.iter().filter(|a| a.gait == gait)
            .map(|&a| expected_utility(mdp, values, pos, a))
            .fold(f64::NEG_INFINITY, f64::max)
    };
    let walk = best_of(Gait::Walk);
    let run = best_of(Gait::Run);
    let (gait, eu) = if walk >= run { (Gait::Walk, walk) } else { (Gait::Run, run) };
    mdp.reward(gait) + mdp.gamma() * eu
}

fn milli(x: f64) -> i64 { (x * 1000.0).round() as i64 }

pub fn value_iteration(mdp: &GridMdp, epsilon: f64) -> Utilities {
    let gamma = mdp.gamma();
    let threshold = epsilon * (1.0 - gamma) / gamma;
    let mut next = vec![0.0; mdp.rows() * mdp.cols()];
    let mut prev_delta = 0.0;
    let mut stalls = 0usize;
    let mut sweeps = 0usize;
    loop {
        let current = next.clone();
        let mut delta: f64 = 0.0;
        for s in mdp.states() {
            let i = mdp.index(s);
            next[i] = match mdp.terminal_reward(s) {
                Some(r) => r,
                None => backup(mdp, &current, s),
            };
            delta = delta.max((next[i] - current[i]).abs());
        }
        sweeps += 1;
        if milli(prev_delta) == milli(delta) { stalls += 1; }
        if delta < threshold || stalls > STALL_LIMIT || sweeps >= MAX_SWEEPS {
            log::info!("value iteration stopped after {} sweeps, delta {:.6}", sweeps, delta);
            return Utilities { values: next, sweeps, delta };
        }
        log::debug!("sweep {}: delta {:.6}", sweeps, delta);
        prev_delta = delta;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyAction {
    Exit,
    Move(Action),
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { PolicyAction::Exit => write!(f, "Exit"), PolicyAction::Move(a) => write!(f, "{a}") }
    }
}

/// Greedy policy per cell (`None` for walls), row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    cols: usize,
    cells: Vec<Option<PolicyAction>>,
}

impl Policy {
    pub fn get(&self, pos: Pos) -> Option<PolicyAction> {
        self.cells.get(pos.row * self.cols + pos.col).copied().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<PolicyAction>]> { self.cells.chunks(self.cols) }
}

/// Greedy policy on expected utility alone; step rewards only enter through `utilities`.
pub fn best_policy(mdp: &GridMdp, utilities: &Utilities) -> Policy {
    let mut cells = vec![None; mdp.rows() * mdp.cols()];
    for s in mdp.states() {
        let choice = if mdp.terminal_reward(s).is_some() {
            PolicyAction::Exit
        } else {
            PolicyAction::Move(best_action(mdp, &utilities.values, s))
        };
        cells[mdp.index(s)] = Some(choice);
    }
    Policy { cols: mdp.cols(), cells }
}

/// One line per grid row, top first: comma-separated actions, `None` for walls.
pub fn format_policy(policy: &Policy) -> String {
    let mut out = String::new();
    for row in policy.rows() {
        let names: Vec<String> = row.iter()
            .map(|c| c.map_or_else(|| "None".to_string(), |a| a.to_string()))
            .collect();
        out.push_str(&names.join(","));
        out.push('\n');
    }
    out
}

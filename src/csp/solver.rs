use std::time::{Duration, Instant};
use super::{Assignment, Csp, Domains, VarId};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveStats {
    /// Tentative variable assignments made.
    pub assignments: u64,
    /// Arc-consistency passes run (search and value ordering).
    pub propagations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    Solved(Assignment<V>),
    Unsatisfiable,
    TimedOut,
}

enum Step<V> {
    Found(Domains<V>),
    Exhausted,
    Timeout,
}

pub struct Solver<'a, V> {
    csp: &'a Csp<V>,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
    stats: SolveStats,
}

impl<'a, V: Clone + PartialEq + 'static> Solver<'a, V> {
    pub fn new(csp: &'a Csp<V>) -> Self {
        Self { csp, time_limit: None, deadline: None, stats: SolveStats::default() }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn stats(&self) -> SolveStats { self.stats }

    pub fn solve(&mut self) -> Outcome<V> {
        self.stats = SolveStats::default();
        self.deadline = self.time_limit.map(|d| Instant::now() + d);
        let initial = self.propagate(self.csp.domains().clone());
        if wiped_out(&initial) {
            log::info!("csp: unsatisfiable before search");
            return Outcome::Unsatisfiable;
        }
        let mut assigned = vec![false; self.csp.num_variables()];
        let outcome = match self.backtrack(&initial, &mut assigned) {
            Step::Found(domains) => {
                let assignment = Assignment::new(domains.into_iter().filter_map(|d| d.into_iter().next()).collect());
                if self.csp.is_consistent(&assignment) {
                    Outcome::Solved(assignment)
                } else {
                    log::warn!("csp: search finished on an assignment that violates a constraint");
                    Outcome::Unsatisfiable
                }
            }
            Step::Exhausted => Outcome::Unsatisfiable,
            Step::Timeout => Outcome::TimedOut,
        };
        log::info!("csp: {} after {} assignments, {} propagations",
            match &outcome { Outcome::Solved(_) => "solved", Outcome::Unsatisfiable => "unsatisfiable", Outcome::TimedOut => "timed out" },
            self.stats.assignments, self.stats.propagations);
        outcome
    }

    fn propagate(&mut self, domains: Domains<V>) -> Domains<V> {
        self.stats.propagations += 1;
        self.csp.enforce_consistency(domains)
    }

    fn backtrack(&mut self, domains: &Domains<V>, assigned: &mut [bool]) -> Step<V> {
        if let Some(dl) = self.deadline { if Instant::now() >= dl { return Step::Timeout; } }
        let Some(var) = select_unassigned(domains, assigned) else { return Step::Found(domains.clone()) };
        let values = self.order_values(var, domains, assigned);
        log::trace!("csp: branching on {} ({} values)", self.csp.name(var), values.len());
        assigned[var.0] = true;
        for value in values {
            self.stats.assignments += 1;
            let mut trial = domains.clone();
            trial[var.0] = vec![value];
            let reduced = self.propagate(trial);
            if wiped_out(&reduced) { continue; }
            match self.backtrack(&reduced, assigned) {
                Step::Exhausted => continue,
                done => return done,
            }
        }
        assigned[var.0] = false;
        Step::Exhausted
    }

    // Least-constraining value first: keep the most options open for the other unassigned variables.
    fn order_values(&mut self, var: VarId, domains: &Domains<V>, assigned: &[bool]) -> Vec<V> {
        let mut scored: Vec<(usize, V)> = Vec::with_capacity(domains[var.0].len());
        for value in &domains[var.0] {
            let mut trial = domains.clone();
            trial[var.0] = vec![value.clone()];
            let reduced = self.propagate(trial);
            let room: usize = reduced.iter().enumerate()
                .filter(|(i, _)| *i != var.0 && !assigned[*i])
                .map(|(_, d)| d.len())
                .sum();
            scored.push((room, value.clone()));
        }
        // stable: equal scores keep domain order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, v)| v).collect()
    }
}

// Most constrained variable; ties go to the lowest id.
fn select_unassigned<V>(domains: &Domains<V>, assigned: &[bool]) -> Option<VarId> {
    (0..domains.len()).filter(|&i| !assigned[i]).min_by_key(|&i| domains[i].len()).map(VarId)
}

fn wiped_out<V>(domains: &Domains<V>) -> bool { domains.iter().any(|d| d.is_empty()) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mrv_prefers_smallest_domain_then_lowest_id() {
        let domains = vec![vec![1, 2, 3], vec![1, 2], vec![4, 5]];
        assert_eq!(select_unassigned(&domains, &[false, false, false]), Some(VarId(1)));
        assert_eq!(select_unassigned(&domains, &[false, true, false]), Some(VarId(2)));
        assert_eq!(select_unassigned(&domains, &[true, true, true]), None);
    }

    #[test]
    fn lcv_orders_by_remaining_room() {
        // x = 1 removes 1 from both neighbours; x = 3 removes nothing.
        let mut csp = Csp::new();
        let x = csp.add_variable("x", vec![1, 2, 3]);
        let y = csp.add_variable("y", vec![1, 2]);
        let z = csp.add_variable("z", vec![1, 2]);
        csp.different(x, y);
        csp.different(x, z);
        let mut solver = Solver::new(&csp);
        let order = solver.order_values(x, csp.domains(), &[false, false, false]);
        assert_eq!(order, vec![3, 1, 2]);
    }
}

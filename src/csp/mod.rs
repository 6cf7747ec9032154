//! Binary constraint satisfaction: arc consistency plus MRV/LCV backtracking.

pub mod solver;
pub mod coloring;

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

pub use solver::{Outcome, SolveStats, Solver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

/// Candidate values per variable, indexed by `VarId`.
pub type Domains<V> = Vec<Vec<V>>;

pub type Relation<V> = Rc<dyn Fn(&V, &V) -> bool>;

/// Directed arc: a `tail` value survives revision while some `head` value relates to it.
#[derive(Clone)]
pub struct Constraint<V> {
    pub head: VarId,
    pub tail: VarId,
    relation: Relation<V>,
}

impl<V> Constraint<V> {
    pub fn holds(&self, head: &V, tail: &V) -> bool { (*self.relation)(head, tail) }
}

impl<V> fmt::Debug for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint({:?} -> {:?})", self.head, self.tail)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<V> {
    values: Vec<V>,
}

impl<V> Assignment<V> {
    pub fn new(values: Vec<V>) -> Self { Self { values } }
    pub fn get(&self, var: VarId) -> Option<&V> { self.values.get(var.0) }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &V)> {
        self.values.iter().enumerate().map(|(i, v)| (VarId(i), v))
    }
}

pub struct Csp<V> {
    names: Vec<String>,
    domains: Domains<V>,
    constraints: Vec<Constraint<V>>,
    // constraint indices keyed by head variable, for re-queueing
    by_head: Vec<Vec<usize>>,
}

impl<V> Default for Csp<V> {
    fn default() -> Self { Self { names: Vec::new(), domains: Vec::new(), constraints: Vec::new(), by_head: Vec::new() } }
}

impl<V: Clone + PartialEq + 'static> Csp<V> {
    pub fn new() -> Self { Self::default() }

    pub fn add_variable(&mut self, name: impl Into<String>, domain: Vec<V>) -> VarId {
        self.names.push(name.into());
        self.domains.push(domain);
        self.by_head.push(Vec::new());
        VarId(self.names.len() - 1)
    }

    /// Adds `relation` in both directions; the reverse arc sees arguments swapped.
    pub fn add_binary<F>(&mut self, a: VarId, b: VarId, relation: F)
    where
        F: Fn(&V, &V) -> bool + 'static,
    {
        let forward: Relation<V> = Rc::new(relation);
        let backward_rel = forward.clone();
        let backward: Relation<V> = Rc::new(move |x: &V, y: &V| (*backward_rel)(y, x));
        self.push_arc(a, b, forward);
        self.push_arc(b, a, backward);
    }

    pub fn different(&mut self, a: VarId, b: VarId) { self.add_binary(a, b, |x, y| x != y); }

    fn push_arc(&mut self, head: VarId, tail: VarId, relation: Relation<V>) {
        self.by_head[head.0].push(self.constraints.len());
        self.constraints.push(Constraint { head, tail, relation });
    }

    pub fn num_variables(&self) -> usize { self.names.len() }
    pub fn name(&self, var: VarId) -> &str { &self.names[var.0] }
    pub fn var_id(&self, name: &str) -> Option<VarId> { self.names.iter().position(|n| n == name).map(VarId) }
    pub fn domains(&self) -> &Domains<V> { &self.domains }
    pub fn constraints(&self) -> &[Constraint<V>] { &self.constraints }

    /// Arc-consistency pass over `domains`. A variable left with an empty domain means no solution
    /// extends the current partial assignment.
    pub fn enforce_consistency(&self, mut domains: Domains<V>) -> Domains<V> {
        let mut queue: VecDeque<usize> = (0..self.constraints.len()).collect();
        while let Some(ci) = queue.pop_front() {
            let c = &self.constraints[ci];
            if revise(c, &mut domains) {
                queue.extend(self.by_head[c.tail.0].iter().copied());
            }
        }
        domains
    }

    pub fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        if assignment.len() != self.num_variables() { return false; }
        self.constraints.iter().all(|c| match (assignment.get(c.head), assignment.get(c.tail)) {
            (Some(h), Some(t)) => c.holds(h, t),
            _ => false,
        })
    }
}

// Drops tail values with no supporting head value. Returns true if anything was removed.
fn revise<V: Clone>(c: &Constraint<V>, domains: &mut Domains<V>) -> bool {
    let heads = domains[c.head.0].clone();
    let tail = &mut domains[c.tail.0];
    let before = tail.len();
    tail.retain(|t| heads.iter().any(|h| c.holds(h, t)));
    tail.len() != before
}

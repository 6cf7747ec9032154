use std::fmt::Write as _;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::{Csp, Outcome, Solver};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColoringError {
    #[error("constraint names unknown variable {0:?}")]
    UnknownVariable(String),
    #[error("duplicate variable {0:?}")]
    DuplicateVariable(String),
}

/// Put every variable in one of `colors` so that each `different` pair ends up apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringProblem {
    pub colors: Vec<String>,
    pub variables: Vec<String>,
    #[serde(default)]
    pub different: Vec<(String, String)>,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

impl ColoringProblem {
    pub fn to_csp(&self) -> Result<Csp<String>, ColoringError> {
        let mut csp = Csp::new();
        for name in &self.variables {
            if csp.var_id(name).is_some() { return Err(ColoringError::DuplicateVariable(name.clone())); }
            csp.add_variable(name.clone(), self.colors.clone());
        }
        for (a, b) in &self.different {
            let va = csp.var_id(a).ok_or_else(|| ColoringError::UnknownVariable(a.clone()))?;
            let vb = csp.var_id(b).ok_or_else(|| ColoringError::UnknownVariable(b.clone()))?;
            csp.different(va, vb);
        }
        Ok(csp)
    }

    pub fn solve(&self) -> Result<Outcome<String>, ColoringError> {
        let csp = self.to_csp()?;
        let mut solver = Solver::new(&csp);
        if let Some(secs) = self.time_limit_secs { solver = solver.with_time_limit(Duration::from_secs(secs)); }
        Ok(solver.solve())
    }

    /// `Yes` and one line per colour listing its variables (blank if unused), or `No`.
    pub fn format_outcome(&self, outcome: &Outcome<String>) -> String {
        let Outcome::Solved(assignment) = outcome else { return "No\n".to_string() };
        let mut out = String::from("Yes\n");
        for color in &self.colors {
            let members: Vec<&str> = self.variables.iter().zip(assignment.iter())
                .filter(|(_, (_, v))| *v == color)
                .map(|(name, _)| name.as_str())
                .collect();
            let _ = writeln!(out, "{}", members.join(","));
        }
        out
    }
}

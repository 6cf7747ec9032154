use pretty_assertions::assert_eq;
use searchkit::csp::coloring::{ColoringError, ColoringProblem};
use searchkit::csp::{Csp, Outcome, Solver, VarId};
use std::time::Duration;

fn australia(colors: &[&str]) -> ColoringProblem {
    let edges = [
        ("WA", "NT"), ("WA", "SA"), ("NT", "SA"), ("NT", "Q"), ("SA", "Q"),
        ("SA", "NSW"), ("SA", "V"), ("Q", "NSW"), ("NSW", "V"),
    ];
    ColoringProblem {
        colors: colors.iter().map(|s| s.to_string()).collect(),
        variables: ["WA", "NT", "SA", "Q", "NSW", "V", "T"].iter().map(|s| s.to_string()).collect(),
        different: edges.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect(),
        time_limit_secs: None,
    }
}

#[test]
fn map_colouring_three_colours_is_solved_and_verified() {
    let problem = australia(&["red", "green", "blue"]);
    let csp = problem.to_csp().expect("valid problem");
    let mut solver = Solver::new(&csp);
    match solver.solve() {
        Outcome::Solved(a) => {
            assert!(csp.is_consistent(&a));
            for (x, y) in &problem.different {
                let vx = csp.var_id(x).expect("known");
                let vy = csp.var_id(y).expect("known");
                assert_ne!(a.get(vx), a.get(vy), "{x} and {y} share a colour");
            }
        }
        other => panic!("expected a solution, got {other:?}"),
    }
    assert!(solver.stats().assignments >= 7);
}

#[test]
fn map_colouring_two_colours_is_unsatisfiable() {
    let problem = australia(&["red", "green"]);
    assert_eq!(problem.solve(), Ok(Outcome::Unsatisfiable));
    assert_eq!(problem.format_outcome(&Outcome::Unsatisfiable), "No\n");
}

#[test]
fn output_lists_members_per_colour() {
    let problem = ColoringProblem {
        colors: vec!["GROUP1".into(), "GROUP2".into()],
        variables: vec!["a".into(), "b".into(), "c".into()],
        different: vec![("a".into(), "b".into()), ("b".into(), "c".into())],
        time_limit_secs: Some(5),
    };
    let outcome = problem.solve().expect("valid problem");
    // Any proper 2-colouring of a path puts both ends together.
    let text = problem.format_outcome(&outcome);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Yes");
    assert_eq!(lines.len(), 3);
    assert!(lines[1..].contains(&"a,c"), "got {text:?}");
    assert!(lines[1..].contains(&"b"), "got {text:?}");
}

#[test]
fn unknown_variable_is_rejected() {
    let mut problem = australia(&["red"]);
    problem.different.push(("WA".into(), "Tasmania".into()));
    assert_eq!(problem.to_csp().err(), Some(ColoringError::UnknownVariable("Tasmania".into())));
}

#[test]
fn n_queens_with_closure_constraints() {
    let n = 6usize;
    let mut csp: Csp<usize> = Csp::new();
    let vars: Vec<VarId> = (0..n).map(|c| csp.add_variable(format!("q{c}"), (0..n).collect())).collect();
    for i in 0..n {
        for j in (i + 1)..n {
            let gap = j - i;
            csp.add_binary(vars[i], vars[j], move |a, b| a != b && a.abs_diff(*b) != gap);
        }
    }
    let outcome = Solver::new(&csp).with_time_limit(Duration::from_secs(30)).solve();
    let Outcome::Solved(a) = outcome else { panic!("6-queens has solutions") };
    assert!(csp.is_consistent(&a));
    assert_eq!(a.len(), n);
}

#[test]
fn empty_domain_is_unsatisfiable_up_front() {
    let mut csp: Csp<u8> = Csp::new();
    let a = csp.add_variable("a", vec![]);
    let b = csp.add_variable("b", vec![1]);
    csp.different(a, b);
    let mut solver = Solver::new(&csp);
    assert_eq!(solver.solve(), Outcome::Unsatisfiable);
    assert_eq!(solver.stats().assignments, 0);
}

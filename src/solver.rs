use std::fmt::Display;

use crate::formula::{Cnf, Model};

mod dpll;

pub use dpll::{
    trail::{Decision, Trail},
    DpllSolver,
};

pub trait Solver {
    /// Creates a new solver instance.
    fn new(formula: Cnf) -> Self;

    /// Solves a CNF SAT problem with the solver.
    /// Returns `Some(Model)` if satisfiable, `None` otherwise.
    fn solve(self) -> Option<Model>;
}

/// Terminal state of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Sat,
    Unsat,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Sat => write!(f, "SAT"),
            Verdict::Unsat => write!(f, "UNSAT"),
        }
    }
}

use crate::{
    assignment::Assignment,
    formula::{Clause, ClauseIdx, Cnf, Model},
    trace::{LogTracer, Tracer},
};

use self::trail::{Decision, Trail};

use super::{Solver, Verdict};

pub mod trail;

/// DPLL-style search over a fixed formula.
///
/// Known limitations of this engine:
/// - Unit propagation runs once before the search and is never iterated to a
///   fixpoint. Two unit clauses on the same variable do not conflict; the later
///   one overwrites the earlier.
/// - A decision that fails after backtracking ends the search with UNSAT.
///   The flipped value is left in the assignment but never evaluated.
#[derive(Debug)]
pub struct DpllSolver<T = LogTracer> {
    formula: Cnf,
    assignment: Assignment,
    trail: Trail,
    tracer: T,
}

impl<T: Tracer> DpllSolver<T> {
    pub fn with_tracer(formula: Cnf, tracer: T) -> Self {
        DpllSolver {
            formula,
            assignment: Assignment::new(),
            trail: Trail::new(),
            tracer,
        }
    }

    pub fn formula(&self) -> &Cnf {
        &self.formula
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Assigns the variable of every unit clause, in clause order, in a single pass.
    pub fn unit_propagation(&mut self) {
        for clause in self.formula.clauses().iter() {
            if let Some(literal) = clause.unit() {
                self.assignment
                    .assign(literal.variable(), literal.positive());
                self.tracer.unit_propagated(literal);
            }
        }
    }

    pub fn clause_satisfied(&self, clause: &Clause) -> bool {
        self.assignment.satisfies_clause(clause)
    }

    pub fn formula_satisfied(&self) -> bool {
        self.formula
            .clauses()
            .iter()
            .all(|clause| self.clause_satisfied(clause))
    }

    /// Assigns the first unassigned literal of the first unsatisfied clause that has one.
    ///
    /// Returns `false` when no clause offers such a literal. In that case the
    /// latest decision is flipped if there is one.
    pub fn decide(&mut self) -> bool {
        for (clause_index, clause) in self.formula.clauses().iter_enumerated() {
            if self.assignment.satisfies_clause(clause) {
                continue;
            }

            for literal in clause.iter() {
                self.tracer.clause_visited(clause_index, clause);

                let variable = literal.variable();
                if !self.assignment.is_assigned(variable) {
                    let decision = Decision::new(variable, literal.positive());
                    self.assignment.assign(variable, decision.value());
                    self.trail.push(decision);
                    self.tracer.decided(decision);
                    return true;
                }
            }
        }

        self.tracer.no_decision();

        if !self.trail.is_empty() {
            self.backtrack();
            return false;
        }

        self.tracer.search_exhausted();
        false
    }

    /// Retries the latest decision with the opposite value.
    /// Does nothing on an empty trail.
    pub fn backtrack(&mut self) {
        let decision = match self.trail.pop() {
            Some(decision) => decision,
            None => {
                self.tracer.nothing_to_backtrack();
                return;
            }
        };

        self.assignment.unassign(decision.variable());

        let flipped = decision.flipped();
        self.assignment.assign(flipped.variable(), flipped.value());
        self.trail.push(flipped);
        self.tracer.backtracked(flipped);
    }

    fn search(&mut self) -> Verdict {
        self.tracer.search_started(&self.formula);
        self.unit_propagation();

        while !self.formula_satisfied() {
            if !self.decide() {
                // The state left by a backtrack is not re-examined.
                return Verdict::Unsat;
            }
        }

        Verdict::Sat
    }

    /// Runs the search to a verdict, reporting every phase to the tracer.
    pub fn run(mut self) -> Option<Model> {
        let verdict = self.search();
        self.tracer.finished(verdict, &self.assignment);

        match verdict {
            Verdict::Sat => {
                let model = Model::new(self.formula, self.assignment);
                debug_assert!(model.is_satisfying());
                Some(model)
            }
            Verdict::Unsat => None,
        }
    }
}

impl Solver for DpllSolver {
    fn new(formula: Cnf) -> Self {
        DpllSolver::with_tracer(formula, LogTracer)
    }

    fn solve(self) -> Option<Model> {
        self.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        formula::{Literal, Variable},
        trace::Event,
    };

    fn cnf(clauses: Vec<Vec<i32>>) -> Cnf {
        Cnf::from_literals(clauses).unwrap()
    }

    fn var(id: u32) -> Variable {
        Variable::new(id).unwrap()
    }

    fn lit(value: i32) -> Literal {
        Literal::from_dimacs(value).unwrap()
    }

    fn silent(clauses: Vec<Vec<i32>>) -> DpllSolver<()> {
        DpllSolver::with_tracer(cnf(clauses), ())
    }

    #[test]
    fn unit_propagation_assigns_required_values() {
        let mut solver = silent(vec![vec![3], vec![1, 2], vec![-4], vec![-1, 5]]);
        solver.unit_propagation();

        assert_eq!(solver.assignment().get(var(3)), Some(true));
        assert_eq!(solver.assignment().get(var(4)), Some(false));
        assert_eq!(solver.assignment().len(), 2);
        assert!(solver.trail().is_empty());
    }

    #[test]
    fn later_unit_clause_overwrites_earlier() {
        let mut solver = silent(vec![vec![2], vec![-2]]);
        solver.unit_propagation();

        assert_eq!(solver.assignment().get(var(2)), Some(false));
    }

    #[test]
    fn unit_propagation_is_single_pass() {
        // (x1) forces x1, which would make (¬x1 ∨ x2) unit. That is not followed up.
        let mut solver = silent(vec![vec![1], vec![-1, 2]]);
        solver.unit_propagation();

        assert_eq!(solver.assignment().get(var(2)), None);
    }

    #[test]
    fn fresh_solver_satisfies_nothing() {
        let solver = silent(vec![vec![1, -2], vec![-3], vec![4, 4]]);
        for clause in solver.formula().clauses().iter() {
            assert!(!solver.clause_satisfied(clause));
        }
        assert!(!solver.formula_satisfied());
    }

    #[test]
    fn empty_formula_is_satisfied() {
        let solver = silent(vec![]);
        assert!(solver.formula_satisfied());

        let model = solver.run().unwrap();
        assert!(model.assignment().is_empty());
    }

    #[test]
    fn decision_takes_first_unassigned_literal_of_first_unsatisfied_clause() {
        let mut solver = silent(vec![vec![1], vec![-1, -2, 3]]);
        solver.unit_propagation();

        assert!(solver.decide());
        assert_eq!(solver.assignment().get(var(2)), Some(false));
        assert_eq!(
            solver.trail().iter().collect::<Vec<_>>(),
            vec![Decision::new(var(2), false)]
        );
    }

    #[test]
    fn decision_skips_falsified_clause() {
        // (x1 ∨ x2) is falsified after propagation; (x3 ∨ x4) still offers x3.
        let mut solver = silent(vec![vec![-1], vec![-2], vec![1, 2], vec![3, 4]]);
        solver.unit_propagation();

        assert!(solver.decide());
        assert_eq!(solver.assignment().get(var(3)), Some(true));
        assert_eq!(solver.trail().len(), 1);
    }

    #[test]
    fn decision_failure_without_trail_has_no_side_effect() {
        let mut solver = silent(vec![vec![1], vec![-1]]);
        solver.unit_propagation();
        let before = solver.assignment().clone();

        assert!(!solver.decide());
        assert_eq!(solver.assignment(), &before);
        assert!(solver.trail().is_empty());
    }

    #[test]
    fn decision_failure_backtracks_latest_decision() {
        let mut solver = silent(vec![vec![-1], vec![1, -2], vec![1, 2]]);
        solver.unit_propagation();

        assert!(solver.decide());
        assert_eq!(solver.assignment().get(var(2)), Some(false));

        assert!(!solver.decide());
        assert_eq!(solver.assignment().get(var(2)), Some(true));
        assert_eq!(
            solver.trail().iter().collect::<Vec<_>>(),
            vec![Decision::new(var(2), true)]
        );
    }

    #[test]
    fn backtrack_on_empty_trail_is_noop() {
        let mut solver = silent(vec![vec![1], vec![2, 3]]);
        solver.unit_propagation();
        let before = solver.assignment().clone();

        solver.backtrack();
        solver.backtrack();

        assert_eq!(solver.assignment(), &before);
        assert!(solver.trail().is_empty());
    }

    #[test]
    fn backtrack_toggles_single_variable() {
        let mut solver = silent(vec![vec![1], vec![2, 3], vec![4, 5]]);
        solver.unit_propagation();
        assert!(solver.decide());
        assert!(solver.decide());
        let before = solver.assignment().clone();

        solver.backtrack();

        assert_eq!(solver.trail().len(), 2);
        assert_eq!(solver.assignment().get(var(4)), Some(false));
        for (variable, value) in before.iter().filter(|(variable, _)| *variable != var(4)) {
            assert_eq!(solver.assignment().get(variable), Some(value));
        }
        assert_eq!(solver.assignment().len(), before.len());

        // A second backtrack flips the same variable back.
        solver.backtrack();
        assert_eq!(solver.assignment(), &before);
        assert_eq!(solver.trail().last(), Some(Decision::new(var(4), true)));
    }

    #[test]
    fn failed_decision_ends_search_even_after_backtrack() {
        // x2 = true falsifies (x1 ∨ ¬x2). Backtracking sets x2 = false, which
        // satisfies every clause, but the verdict is already UNSAT.
        let mut events = Vec::new();
        let formula = cnf(vec![vec![-1], vec![2, -2], vec![1, -2]]);
        let result = DpllSolver::with_tracer(formula, &mut events).run();

        assert!(result.is_none());
        assert_eq!(
            events,
            vec![
                Event::Started,
                Event::UnitPropagated(lit(-1)),
                Event::ClauseVisited(ClauseIdx::from(1)),
                Event::Decided(Decision::new(var(2), true)),
                Event::ClauseVisited(ClauseIdx::from(2)),
                Event::ClauseVisited(ClauseIdx::from(2)),
                Event::NoDecision,
                Event::Backtracked(Decision::new(var(2), false)),
                Event::Finished(Verdict::Unsat),
            ]
        );
    }

    #[test]
    fn exhausted_search_reports_no_backtrack() {
        let mut events = Vec::new();
        let result = DpllSolver::with_tracer(cnf(vec![vec![1], vec![-1]]), &mut events).run();

        assert!(result.is_none());
        assert_eq!(
            events,
            vec![
                Event::Started,
                Event::UnitPropagated(lit(1)),
                Event::UnitPropagated(lit(-1)),
                Event::ClauseVisited(ClauseIdx::from(0)),
                Event::NoDecision,
                Event::Exhausted,
                Event::Finished(Verdict::Unsat),
            ]
        );
    }
}

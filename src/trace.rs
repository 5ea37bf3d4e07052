/*!
Observers for the phases of a search.

The engine reports what it does through a [`Tracer`]; it never prints on its own.
*/

use crate::{
    assignment::Assignment,
    formula::{Clause, ClauseIdx, Cnf, Literal},
    solver::{Decision, Verdict},
};

/// Receives one callback per search phase.
/// Every method defaults to doing nothing.
pub trait Tracer {
    fn search_started(&mut self, _formula: &Cnf) {}

    /// A unit clause forced the literal's variable.
    fn unit_propagated(&mut self, _literal: Literal) {}

    /// The decision step is scanning a literal of an unsatisfied clause.
    fn clause_visited(&mut self, _clause_index: ClauseIdx, _clause: &Clause) {}

    fn decided(&mut self, _decision: Decision) {}

    /// A full scan of the formula found no unassigned literal.
    fn no_decision(&mut self) {}

    /// No decision was possible and the trail was empty.
    fn search_exhausted(&mut self) {}

    /// The latest decision was flipped; `decision` holds the new value.
    fn backtracked(&mut self, _decision: Decision) {}

    fn nothing_to_backtrack(&mut self) {}

    fn finished(&mut self, _verdict: Verdict, _assignment: &Assignment) {}
}

/// Silent tracer.
impl Tracer for () {}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn search_started(&mut self, formula: &Cnf) {
        (**self).search_started(formula)
    }

    fn unit_propagated(&mut self, literal: Literal) {
        (**self).unit_propagated(literal)
    }

    fn clause_visited(&mut self, clause_index: ClauseIdx, clause: &Clause) {
        (**self).clause_visited(clause_index, clause)
    }

    fn decided(&mut self, decision: Decision) {
        (**self).decided(decision)
    }

    fn no_decision(&mut self) {
        (**self).no_decision()
    }

    fn search_exhausted(&mut self) {
        (**self).search_exhausted()
    }

    fn backtracked(&mut self, decision: Decision) {
        (**self).backtracked(decision)
    }

    fn nothing_to_backtrack(&mut self) {
        (**self).nothing_to_backtrack()
    }

    fn finished(&mut self, verdict: Verdict, assignment: &Assignment) {
        (**self).finished(verdict, assignment)
    }
}

/// Writes every phase to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn search_started(&mut self, formula: &Cnf) {
        info!("Running DPLL on {}", formula);
    }

    fn unit_propagated(&mut self, literal: Literal) {
        info!(
            "Unit clause {:>3} assigns {} = {}",
            literal.to_dimacs(),
            literal.variable(),
            literal.positive()
        );
    }

    fn clause_visited(&mut self, clause_index: ClauseIdx, clause: &Clause) {
        trace!("Processing clause {} {}", clause_index, clause);
    }

    fn decided(&mut self, decision: Decision) {
        info!("Decision {} = {}", decision.variable(), decision.value());
    }

    fn no_decision(&mut self) {
        debug!("No decision is possible in any clause");
    }

    fn search_exhausted(&mut self) {
        debug!("No more decisions to make and no backtracking possible");
    }

    fn backtracked(&mut self, decision: Decision) {
        info!(
            "Backtrack {} reassigned to {}",
            decision.variable(),
            decision.value()
        );
    }

    fn nothing_to_backtrack(&mut self) {
        debug!("No decisions to backtrack from");
    }

    fn finished(&mut self, verdict: Verdict, assignment: &Assignment) {
        info!("{} with assignment {}", verdict, assignment);
    }
}

/// A recorded search phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Started,
    UnitPropagated(Literal),
    ClauseVisited(ClauseIdx),
    Decided(Decision),
    NoDecision,
    Exhausted,
    Backtracked(Decision),
    NothingToBacktrack,
    Finished(Verdict),
}

/// Records the phases of a run in order.
impl Tracer for Vec<Event> {
    fn search_started(&mut self, _formula: &Cnf) {
        self.push(Event::Started);
    }

    fn unit_propagated(&mut self, literal: Literal) {
        self.push(Event::UnitPropagated(literal));
    }

    fn clause_visited(&mut self, clause_index: ClauseIdx, _clause: &Clause) {
        self.push(Event::ClauseVisited(clause_index));
    }

    fn decided(&mut self, decision: Decision) {
        self.push(Event::Decided(decision));
    }

    fn no_decision(&mut self) {
        self.push(Event::NoDecision);
    }

    fn search_exhausted(&mut self) {
        self.push(Event::Exhausted);
    }

    fn backtracked(&mut self, decision: Decision) {
        self.push(Event::Backtracked(decision));
    }

    fn nothing_to_backtrack(&mut self) {
        self.push(Event::NothingToBacktrack);
    }

    fn finished(&mut self, verdict: Verdict, _assignment: &Assignment) {
        self.push(Event::Finished(verdict));
    }
}

use std::fmt::Display;

use crate::formula::Variable;

/// A value chosen by the search for an otherwise unforced variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    variable: Variable,
    value: bool,
}

impl Decision {
    pub fn new(variable: Variable, value: bool) -> Self {
        Decision { variable, value }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// The same variable with the opposite value.
    pub fn flipped(&self) -> Self {
        Decision {
            variable: self.variable,
            value: !self.value,
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.variable, self.value)
    }
}

/// Decisions in the order they were made.
/// Propagated variables never appear here.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    decisions: Vec<Decision>,
}

impl Trail {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, decision: Decision) {
        self.decisions.push(decision);
    }

    pub fn pop(&mut self) -> Option<Decision> {
        self.decisions.pop()
    }

    pub fn last(&self) -> Option<Decision> {
        self.decisions.last().copied()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Decision> + '_ {
        self.decisions.iter().copied()
    }
}

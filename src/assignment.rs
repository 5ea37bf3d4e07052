/*!
Partial assignment of truth values to variables.
*/

use std::{collections::BTreeMap, fmt::Display};

use crate::formula::{Clause, Literal, Variable};

/// Mapping from variable to its current value.
/// Looking up an unassigned variable never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    /// Returns the stored value, or `default` if the variable is unassigned.
    pub fn value_or(&self, variable: Variable, default: bool) -> bool {
        self.get(variable).unwrap_or(default)
    }

    pub fn is_assigned(&self, variable: Variable) -> bool {
        self.values.contains_key(&variable)
    }

    /// Stores `value` for `variable`, overwriting any previous value.
    pub fn assign(&mut self, variable: Variable, value: bool) {
        self.values.insert(variable, value);
    }

    /// Removes the variable from the store and returns its old value.
    pub fn unassign(&mut self, variable: Variable) -> Option<bool> {
        self.values.remove(&variable)
    }

    /// Whether the literal holds under the current assignment.
    ///
    /// The lookup default is the opposite of the required value,
    /// so an unassigned variable never satisfies a literal of either polarity.
    pub fn satisfies(&self, literal: Literal) -> bool {
        self.value_or(literal.variable(), !literal.positive()) == literal.positive()
    }

    pub fn satisfies_clause(&self, clause: &Clause) -> bool {
        clause.iter().any(|literal| self.satisfies(literal))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over assigned variables in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values.iter().map(|(&variable, &value)| (variable, value))
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        let mut iter = self.iter();
        if let Some((variable, value)) = iter.next() {
            write!(f, "{}: {}", variable, value)?;
        }
        for (variable, value) in iter {
            write!(f, ", {}: {}", variable, value)?;
        }

        write!(f, "}}")
    }
}

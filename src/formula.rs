/*!
A module to represent conjunctive normal form formula.
*/

use std::{
    convert::{TryFrom, TryInto},
    fmt::Display,
    num::NonZeroU32,
};

use typed_index_collections::{TiSlice, TiVec};

use crate::{assignment::Assignment, prelude::*};

#[derive(Debug, Snafu)]
pub enum LiteralError {
    #[snafu(display("Literal must be a non-zero integer"))]
    ZeroLiteral,
    #[snafu(display("Clause #{} contains an invalid literal", clause))]
    InvalidClause {
        clause: usize,
        source: Box<LiteralError>,
    },
}

/// Position of a clause in its formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClauseIdx(usize);

impl From<usize> for ClauseIdx {
    fn from(index: usize) -> Self {
        ClauseIdx(index)
    }
}

impl From<ClauseIdx> for usize {
    fn from(index: ClauseIdx) -> Self {
        index.0
    }
}

impl Display for ClauseIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID <= MAX_VARIABLE_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroU32);

impl Variable {
    pub const MAX_VARIABLE_ID: usize = std::u32::MAX as usize;

    /// Creates a variable from its 1-based ID.
    /// Returns `None` for zero.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Variable)
    }

    pub fn id(&self) -> u32 {
        self.0.get()
    }

    pub fn as_index(&self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Creates a variable from a raw index.
    /// Returns `None` if the index is invalid.
    pub fn from_index(index: usize) -> Option<Self> {
        let id = index.checked_add(1)?;
        if id > Variable::MAX_VARIABLE_ID {
            return None;
        }
        Some(Variable(NonZeroU32::new(id.try_into().ok()?)?))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable together with the truth value it must take
/// for the literal to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(id: Variable, positive: bool) -> Self {
        Literal { id, positive }
    }

    /// Creates a literal from its signed integer form,
    /// e.g. `3` for `x3` and `-3` for `¬x3`.
    pub fn from_dimacs(value: i32) -> Result<Self, LiteralError> {
        let id = Variable::new(value.unsigned_abs()).context(ZeroLiteral)?;
        Ok(Literal::new(id, value > 0))
    }

    pub fn variable(&self) -> Variable {
        self.id
    }

    /// The value the variable must hold to satisfy this literal.
    pub fn positive(&self) -> bool {
        self.positive
    }

    pub fn to_dimacs(&self) -> i64 {
        let id = i64::from(self.id.id());
        if self.positive {
            id
        } else {
            -id
        }
    }
}

impl TryFrom<i32> for Literal {
    type Error = LiteralError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Literal::from_dimacs(value)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.id)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            id: self.id,
            positive: !self.positive,
        }
    }
}

/// Disjunction of literals.
/// Duplicated literals are kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    /// Returns the only literal of a unit clause.
    pub fn unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " ∨ {}", literal)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Formula representation in Conjunctive Normal Form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    num_variables: usize,
    clauses: TiVec<ClauseIdx, Clause>,
}

impl Cnf {
    pub fn new(num_variables: usize) -> Self {
        assert!(num_variables <= Variable::MAX_VARIABLE_ID);

        Cnf {
            num_variables,
            clauses: TiVec::new(),
        }
    }

    /// Builds a formula from clauses written as signed integers.
    pub fn from_literals<I, C>(clauses: I) -> Result<Self, LiteralError>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = i32>,
    {
        let mut cnf = Cnf::new(0);

        for (index, raw) in clauses.into_iter().enumerate() {
            let literals = raw
                .into_iter()
                .map(Literal::from_dimacs)
                .collect::<Result<Vec<_>, _>>()
                .map_err(Box::new)
                .context(InvalidClause { clause: index })?;
            cnf.add_clause(Clause::new(literals));
        }

        Ok(cnf)
    }

    /// Largest variable ID mentioned by the formula,
    /// or the declared count if it is larger.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn clauses(&self) -> &TiSlice<ClauseIdx, Clause> {
        &self.clauses
    }

    pub fn add_clause(&mut self, clause: Clause) {
        let largest = clause
            .iter()
            .map(|literal| literal.variable().as_index() + 1)
            .max()
            .unwrap_or(0);
        self.num_variables = self.num_variables.max(largest);

        self.clauses.push(clause);
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} variables (", self.num_variables)?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, " ∧ {}", clause)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// A partial assignment paired with the formula it was found for.
/// Variables the search never touched are absent.
#[derive(Debug)]
pub struct Model {
    formula: Cnf,
    assignment: Assignment,
}

impl Model {
    pub fn new(formula: Cnf, assignment: Assignment) -> Self {
        Model {
            formula,
            assignment,
        }
    }

    pub fn formula(&self) -> &Cnf {
        &self.formula
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Re-evaluates every clause of the formula against the assignment.
    pub fn is_satisfying(&self) -> bool {
        self.formula
            .clauses()
            .iter()
            .all(|clause| self.assignment.satisfies_clause(clause))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model for {}\nAssignment:", self.formula)?;
        for (variable, value) in self.assignment.iter() {
            write!(f, "\n  {}: {}", variable, value)?;
        }

        Ok(())
    }
}

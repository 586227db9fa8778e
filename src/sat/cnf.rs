//! The clause store: an immutable 3-CNF formula.

use crate::sat::assignment::PartialAssignment;
use crate::sat::clause::Clause;
use crate::sat::literal::Literal;
use core::fmt;

/// A conjunction of 3-literal clauses.
///
/// `num_vars` is the highest variable index mentioned by any clause, so every
/// literal refers to a variable in `1..=num_vars`. A formula without clauses
/// has no variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Clauses in file order.
    pub clauses: Vec<Clause>,
    /// Highest variable index mentioned by any clause.
    pub num_vars: usize,
}

impl Cnf {
    /// Collects `clauses` and derives `num_vars` from them.
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = clauses.into_iter().collect();
        let num_vars = clauses.iter().map(Clause::max_variable).max().unwrap_or(0);

        Self { clauses, num_vars }
    }

    /// Convenience constructor from raw signed integers; `None` if any is `0`.
    #[must_use]
    pub fn from_i32s(clauses: &[[i32; 3]]) -> Option<Self> {
        clauses
            .iter()
            .map(|&values| Clause::from_i32s(values))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    /// Clauses in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Every literal occurrence, clause by clause.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.iter().flat_map(|clause| clause.literals)
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// The formula has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates every clause directly under a complete assignment.
    ///
    /// Used to double check what the search reports. An assignment of the
    /// wrong length never verifies, and a literal past the end of the
    /// assignment counts as unsatisfied.
    #[must_use]
    pub fn verify(&self, assignment: &PartialAssignment) -> bool {
        assignment.len() == self.num_vars
            && self.iter().all(|clause| clause.is_satisfied_by(assignment))
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// One clause per line in the CSV input format.
impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

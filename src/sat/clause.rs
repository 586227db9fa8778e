use crate::sat::assignment::PartialAssignment;
use crate::sat::literal::{Literal, Variable};
use core::fmt;

/// Number of literals in every clause of a 3-CNF formula.
pub const CLAUSE_WIDTH: usize = 3;

/// A disjunction of exactly three literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    /// The three literals, in file order.
    pub literals: [Literal; CLAUSE_WIDTH],
}

impl Clause {
    /// Wraps three already-validated literals.
    #[must_use]
    pub const fn new(literals: [Literal; CLAUSE_WIDTH]) -> Self {
        Self { literals }
    }

    /// Builds a clause from raw signed integers, rejecting any `0`.
    #[must_use]
    pub fn from_i32s(values: [i32; CLAUSE_WIDTH]) -> Option<Self> {
        let [a, b, c] = values;
        Some(Self::new([
            Literal::from_i32(a)?,
            Literal::from_i32(b)?,
            Literal::from_i32(c)?,
        ]))
    }

    /// Literals in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Highest variable index mentioned by the clause.
    #[must_use]
    pub fn max_variable(&self) -> Variable {
        self.iter().map(|lit| lit.variable()).max().unwrap_or(0)
    }

    /// Some literal is already decided and true under `assignment`.
    ///
    /// Literals whose variable lies past the end of the assignment count as
    /// undecided, never as false.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &PartialAssignment) -> bool {
        self.iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    }

    /// Every literal's variable is covered by an assignment of length `assigned`.
    #[must_use]
    pub fn is_decided(&self, assigned: usize) -> bool {
        self.iter().all(|lit| lit.variable() <= assigned)
    }
}

/// Writes the clause as one CSV line body, e.g. `1,-2,3`.
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.literals;
        write!(f, "{a},{b},{c}")
    }
}

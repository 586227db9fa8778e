use crate::sat::literal::Literal;
use bit_vec::BitVec;
use core::fmt;
use itertools::Itertools;

/// A prefix assignment over variables `1..=len`.
///
/// Bit `i` holds the value of variable `i + 1`; every variable past the end is
/// unassigned. Search nodes never mutate a shared assignment: children are
/// produced with [`PartialAssignment::extended`], which copies the parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PartialAssignment(BitVec);

impl PartialAssignment {
    /// The empty assignment, root of the search tree.
    #[must_use]
    pub fn new() -> Self {
        Self(BitVec::new())
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No variable is assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every one of `num_vars` variables has a value.
    #[must_use]
    pub fn is_complete(&self, num_vars: usize) -> bool {
        self.len() == num_vars
    }

    /// Truth value of `lit`, or `None` while its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.0
            .get(lit.index())
            .map(|value| lit.is_satisfied_by(value))
    }

    /// A copy of this assignment with the next variable set to `value`.
    #[must_use]
    pub fn extended(&self, value: bool) -> Self {
        let mut child = self.clone();
        child.0.push(value);
        child
    }

    /// Values of variables `1..=len`, in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter()
    }
}

impl FromIterator<bool> for PartialAssignment {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Space separated `0`/`1` bits, the form used in result files.
impl fmt::Display for PartialAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().map(u8::from).join(" "))
    }
}
